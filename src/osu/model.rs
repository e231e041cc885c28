//! The beatmap aggregate: all decoded sections plus the layout needed to
//! re-encode the original line sequence exactly.

use super::{
    DecodeConfig, FormatError, Result,
    colour::ColourEntry,
    event::Event,
    hit_object::{HitObject, HitObjectKind},
    section::ClassifiedLines,
    timing_point::TimingPoint,
};

/// One `Key:value` line of a key/value section.
///
/// Both halves are stored exactly as written (the value keeps its leading
/// whitespace) so the line re-encodes byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyValueEntry {
    /// Text before the first `:`.
    pub key: String,
    /// Text after the first `:`, verbatim.
    pub value: String,
}

/// An ordered key/value section (`[General]`, `[Editor]`, `[Metadata]`,
/// `[Difficulty]`). Field order is preserved for faithful re-encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyValueSection {
    /// Entries in file order.
    pub entries: Vec<KeyValueEntry>,
}

impl KeyValueSection {
    pub(crate) fn decode(lines: &[&str]) -> Result<Self> {
        let entries = lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let (key, value) =
                    line.split_once(':')
                        .ok_or_else(|| FormatError::MalformedKeyValue {
                            line: (*line).to_owned(),
                        })?;
                Ok(KeyValueEntry {
                    key: key.to_owned(),
                    value: value.to_owned(),
                })
            })
            .collect::<Result<_>>()?;
        Ok(Self { entries })
    }

    pub(crate) fn encode_into(&self, lines: &mut Vec<String>) {
        for entry in &self.entries {
            lines.push(format!("{}:{}", entry.key, entry.value));
        }
    }

    /// Looks up a value by trimmed key, returning it trimmed.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key.trim() == key)
            .map(|entry| entry.value.trim())
    }

    /// Looks up a numeric value by key.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|value| value.parse().ok())
    }

    /// Updates the value of `key` in place, preserving the entry's position
    /// and the whitespace style of the old value; appends a `Key: value`
    /// entry when the key is new.
    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.key.trim() == key) {
            let indent: String = entry
                .value
                .chars()
                .take_while(|c| c.is_whitespace())
                .collect();
            entry.value = format!("{indent}{value}");
        } else {
            self.entries.push(KeyValueEntry {
                key: key.to_owned(),
                value: format!(" {value}"),
            });
        }
    }
}

/// Identifies a decoded section in the beatmap layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionId {
    /// The `[General]` key/value section.
    General,
    /// The `[Editor]` key/value section.
    Editor,
    /// The `[Metadata]` key/value section.
    Metadata,
    /// The `[Difficulty]` key/value section.
    Difficulty,
    /// The `[Events]` section.
    Events,
    /// The `[TimingPoints]` section.
    TimingPoints,
    /// The `[Colours]` section.
    Colours,
    /// The `[HitObjects]` section.
    HitObjects,
    /// An unrecognized section, stored verbatim at this index of
    /// [`Beatmap::unknown_sections`].
    Unknown(usize),
}

/// Position of one section in the original file, with the blank lines that
/// followed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionLayout {
    /// Which section sits here.
    pub id: SectionId,
    /// Blank lines emitted after the section body.
    pub blank_lines_after: usize,
}

/// A section this codec does not know, preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnknownSection {
    /// The name between the header brackets.
    pub name: String,
    /// Body lines, verbatim.
    pub lines: Vec<String>,
}

/// A fully decoded beatmap.
///
/// The aggregate exclusively owns its entity lists. Re-encoding a beatmap
/// that decoded successfully reproduces the original line sequence.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Beatmap {
    /// Lines before the first section header (the format version stamp).
    pub preamble: Vec<String>,
    /// The `[General]` section.
    pub general: KeyValueSection,
    /// The `[Editor]` section.
    pub editor: KeyValueSection,
    /// The `[Metadata]` section.
    pub metadata: KeyValueSection,
    /// The `[Difficulty]` section.
    pub difficulty: KeyValueSection,
    /// The `[Events]` list in file order.
    pub events: Vec<Event>,
    /// Timing points ordered by time.
    pub timing_points: Vec<TimingPoint>,
    /// Combo and named colours; order defines the combo cycle.
    pub colours: Vec<ColourEntry>,
    /// Hit objects ordered by time.
    pub hit_objects: Vec<HitObject>,
    /// Unrecognized sections, verbatim.
    pub unknown_sections: Vec<UnknownSection>,
    /// Section order and spacing of the original file.
    pub layout: Vec<SectionLayout>,
}

pub(crate) fn assemble(classified: ClassifiedLines<'_>, config: &DecodeConfig) -> Result<Beatmap> {
    let mut beatmap = Beatmap {
        preamble: classified
            .preamble
            .iter()
            .map(|line| (*line).to_owned())
            .collect(),
        ..Beatmap::default()
    };
    for raw in classified.sections {
        let id = match raw.name {
            "General" => {
                beatmap.general = KeyValueSection::decode(&raw.lines)?;
                SectionId::General
            }
            "Editor" => {
                beatmap.editor = KeyValueSection::decode(&raw.lines)?;
                SectionId::Editor
            }
            "Metadata" => {
                beatmap.metadata = KeyValueSection::decode(&raw.lines)?;
                SectionId::Metadata
            }
            "Difficulty" => {
                beatmap.difficulty = KeyValueSection::decode(&raw.lines)?;
                SectionId::Difficulty
            }
            "Events" => {
                beatmap.events = raw
                    .lines
                    .iter()
                    .map(|line| Event::decode(line))
                    .collect::<Result<_>>()?;
                SectionId::Events
            }
            "TimingPoints" => {
                beatmap.timing_points = raw
                    .lines
                    .iter()
                    .filter(|line| !line.trim().is_empty())
                    .map(|line| TimingPoint::decode(line, config))
                    .collect::<Result<_>>()?;
                SectionId::TimingPoints
            }
            "Colours" => {
                beatmap.colours = raw
                    .lines
                    .iter()
                    .filter(|line| !line.trim().is_empty())
                    .map(|line| ColourEntry::decode(line))
                    .collect::<Result<_>>()?;
                SectionId::Colours
            }
            "HitObjects" => {
                beatmap.hit_objects = raw
                    .lines
                    .iter()
                    .filter(|line| !line.trim().is_empty())
                    .map(|line| HitObject::decode(line, config))
                    .collect::<Result<_>>()?;
                SectionId::HitObjects
            }
            name => {
                beatmap.unknown_sections.push(UnknownSection {
                    name: name.to_owned(),
                    lines: raw.lines.iter().map(|line| (*line).to_owned()).collect(),
                });
                SectionId::Unknown(beatmap.unknown_sections.len() - 1)
            }
        };
        beatmap.layout.push(SectionLayout {
            id,
            blank_lines_after: raw.blank_lines_after,
        });
    }
    Ok(beatmap)
}

impl Beatmap {
    /// An empty map with the standard version stamp and section order,
    /// ready for tools that build maps from scratch.
    #[must_use]
    pub fn with_standard_layout() -> Self {
        let order = [
            SectionId::General,
            SectionId::Editor,
            SectionId::Metadata,
            SectionId::Difficulty,
            SectionId::Events,
            SectionId::TimingPoints,
            SectionId::Colours,
            SectionId::HitObjects,
        ];
        Self {
            preamble: vec!["osu file format v14".to_owned(), String::new()],
            layout: order
                .iter()
                .enumerate()
                .map(|(index, &id)| SectionLayout {
                    id,
                    blank_lines_after: usize::from(index + 1 < order.len()),
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Encodes the beatmap back to its line sequence.
    #[must_use]
    pub fn encode_lines(&self) -> Vec<String> {
        let mut lines = self.preamble.clone();
        for section in &self.layout {
            let name = match section.id {
                SectionId::General => "General",
                SectionId::Editor => "Editor",
                SectionId::Metadata => "Metadata",
                SectionId::Difficulty => "Difficulty",
                SectionId::Events => "Events",
                SectionId::TimingPoints => "TimingPoints",
                SectionId::Colours => "Colours",
                SectionId::HitObjects => "HitObjects",
                SectionId::Unknown(index) => self.unknown_sections[index].name.as_str(),
            };
            lines.push(format!("[{name}]"));
            match section.id {
                SectionId::General => self.general.encode_into(&mut lines),
                SectionId::Editor => self.editor.encode_into(&mut lines),
                SectionId::Metadata => self.metadata.encode_into(&mut lines),
                SectionId::Difficulty => self.difficulty.encode_into(&mut lines),
                SectionId::Events => lines.extend(self.events.iter().map(Event::encode)),
                SectionId::TimingPoints => {
                    lines.extend(self.timing_points.iter().map(TimingPoint::encode));
                }
                SectionId::Colours => lines.extend(self.colours.iter().map(ColourEntry::encode)),
                SectionId::HitObjects => {
                    lines.extend(self.hit_objects.iter().map(HitObject::encode));
                }
                SectionId::Unknown(index) => {
                    lines.extend(self.unknown_sections[index].lines.iter().cloned());
                }
            }
            lines.extend(std::iter::repeat_n(String::new(), section.blank_lines_after));
        }
        lines
    }

    /// Encodes the beatmap to text with a trailing newline.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut text = self.encode_lines().join("\n");
        text.push('\n');
        text
    }

    /// The map title from `[Metadata]`.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("Title")
    }

    /// The artist from `[Metadata]`.
    #[must_use]
    pub fn artist(&self) -> Option<&str> {
        self.metadata.get("Artist")
    }

    /// The difficulty name from `[Metadata]`.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.metadata.get("Version")
    }

    /// The audio filename from `[General]`.
    #[must_use]
    pub fn audio_filename(&self) -> Option<&str> {
        self.general.get("AudioFilename")
    }

    /// The stack leniency from `[General]`.
    #[must_use]
    pub fn stack_leniency(&self) -> Option<f64> {
        self.general.get_f64("StackLeniency")
    }

    /// The base slider velocity from `[Difficulty]`, in hundreds of osu!
    /// pixels per beat. Defaults to `1.4` like every client.
    #[must_use]
    pub fn slider_multiplier(&self) -> f64 {
        self.difficulty.get_f64("SliderMultiplier").unwrap_or(1.4)
    }

    /// The slider tick rate from `[Difficulty]`, defaulting to `1`.
    #[must_use]
    pub fn slider_tick_rate(&self) -> f64 {
        self.difficulty.get_f64("SliderTickRate").unwrap_or(1.0)
    }

    /// The last timing point at or before `time`, or `None` when `time`
    /// precedes every point.
    #[must_use]
    pub fn timing_point_at(&self, time: f64) -> Option<&TimingPoint> {
        self.timing_points
            .iter()
            .take_while(|point| point.time <= time)
            .last()
    }

    /// The reigning tempo declaration at `time`. Falls back to the first
    /// uninherited point for times before it.
    #[must_use]
    pub fn uninherited_timing_point_at(&self, time: f64) -> Option<&TimingPoint> {
        self.timing_points
            .iter()
            .filter(|point| point.uninherited)
            .take_while(|point| point.time <= time)
            .last()
            .or_else(|| self.timing_points.iter().find(|point| point.uninherited))
    }

    /// Milliseconds per beat at `time`.
    #[must_use]
    pub fn beat_length_at(&self, time: f64) -> Option<f64> {
        self.uninherited_timing_point_at(time)
            .map(|point| point.beat_length)
    }

    /// The slider velocity multiplier at `time`: the multiplier of the
    /// reigning inherited point, or `1.0` when the reigning point is a
    /// tempo declaration (which resets velocity).
    #[must_use]
    pub fn slider_velocity_at(&self, time: f64) -> f64 {
        let mut multiplier = 1.0;
        for point in self.timing_points.iter().take_while(|p| p.time <= time) {
            multiplier = if point.uninherited {
                1.0
            } else {
                point.sv_multiplier()
            };
        }
        multiplier
    }

    /// Duration in milliseconds of one slider span of `length` osu! pixels
    /// starting at `time`, honoring the difficulty multiplier and the
    /// reigning velocity. `None` without a tempo declaration.
    #[must_use]
    pub fn slider_span_duration(&self, length: f64, time: f64) -> Option<f64> {
        let beat_length = self.beat_length_at(time)?;
        let velocity = 100.0 * self.slider_multiplier() * self.slider_velocity_at(time);
        Some(length / velocity * beat_length)
    }

    /// End time of a hit object: the spinner/hold end, the slider tail
    /// derived from span count and duration, or the start time itself.
    #[must_use]
    pub fn hit_object_end_time(&self, object: &HitObject) -> f64 {
        match &object.kind {
            HitObjectKind::Circle => object.time,
            HitObjectKind::Slider(slider) => {
                let span = self
                    .slider_span_duration(slider.pixel_length, object.time)
                    .unwrap_or(0.0);
                object.time + span * f64::from(slider.repeats)
            }
            HitObjectKind::Spinner { end_time } | HitObjectKind::Hold { end_time } => *end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::osu::{decode_beatmap, default_config};

    const SOURCE: &str = "osu file format v14\n\n[General]\nAudioFilename: audio.mp3\nStackLeniency: 0.7\n\n[Difficulty]\nSliderMultiplier:1.6\nSliderTickRate:1\n\n[TimingPoints]\n0,300,4,2,0,60,1,0\n500,-50,4,2,0,60,0,0\n2000,400,4,2,0,60,1,0\n\n[HitObjects]\n0,0,500,2,0,L|100:0,1,100\n";

    fn decoded() -> Beatmap {
        decode_beatmap(SOURCE, &default_config()).expect("decodes")
    }

    #[test]
    fn accessors_read_sections() {
        let beatmap = decoded();
        assert_eq!(beatmap.audio_filename(), Some("audio.mp3"));
        assert_eq!(beatmap.stack_leniency(), Some(0.7));
        assert_eq!(beatmap.slider_multiplier(), 1.6);
        assert_eq!(beatmap.title(), None);
    }

    #[test]
    fn timing_lookup_at_or_before() {
        let beatmap = decoded();
        assert_eq!(beatmap.timing_point_at(-1.0), None);
        assert_eq!(beatmap.timing_point_at(0.0).map(|p| p.time), Some(0.0));
        assert_eq!(beatmap.timing_point_at(700.0).map(|p| p.time), Some(500.0));
        // Before the first point the tempo still falls back to it.
        assert_eq!(beatmap.beat_length_at(-100.0), Some(300.0));
        assert_eq!(beatmap.beat_length_at(2500.0), Some(400.0));
    }

    #[test]
    fn velocity_resets_on_tempo_change() {
        let beatmap = decoded();
        assert_eq!(beatmap.slider_velocity_at(0.0), 1.0);
        assert_eq!(beatmap.slider_velocity_at(600.0), 2.0);
        assert_eq!(beatmap.slider_velocity_at(2100.0), 1.0);
    }

    #[test]
    fn span_duration_uses_difficulty() {
        let beatmap = decoded();
        // 100px at 1.6 multiplier, 2.0 velocity, 300ms beats.
        let duration = beatmap.slider_span_duration(100.0, 600.0).unwrap();
        assert!((duration - 100.0 / 320.0 * 300.0).abs() < 1e-9);
    }

    #[test]
    fn key_value_set_preserves_style() {
        let mut beatmap = decoded();
        beatmap.general.set("AudioFilename", "other.mp3");
        assert_eq!(beatmap.audio_filename(), Some("other.mp3"));
        assert_eq!(
            beatmap
                .general
                .entries
                .iter()
                .find(|e| e.key == "AudioFilename")
                .map(|e| e.value.as_str()),
            Some(" other.mp3")
        );
        beatmap.difficulty.set("ApproachRate", "9");
        assert_eq!(beatmap.difficulty.get_f64("ApproachRate"), Some(9.0));
    }

    #[test]
    fn standard_layout_encodes_all_sections() {
        let beatmap = Beatmap::with_standard_layout();
        let lines = beatmap.encode_lines();
        assert_eq!(lines[0], "osu file format v14");
        assert!(lines.contains(&"[HitObjects]".to_owned()));
        let reparsed = decode_beatmap(&beatmap.encode(), &default_config()).unwrap();
        assert_eq!(reparsed, beatmap);
    }
}
