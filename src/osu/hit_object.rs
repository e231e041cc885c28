//! The hit object codec.
//!
//! A hit object line is `x,y,time,type,hitSound,objectParams,hitSample`
//! where the params depend on the variant selected by the type bit-field:
//! nothing for circles, the curve/repeats/length group for sliders, an end
//! time for spinners, and a colon-joined `endTime:hitSample` for hold
//! notes. Optional trailing groups are modelled as `Option`s so that their
//! presence in the file round-trips byte-exactly.

use itertools::Itertools;

use super::{
    DecodeConfig, FormatError, Result, field,
    sample::{EdgeSet, HitSample, Hitsound},
};
use crate::geometry::Vec2;
use crate::path::{CurveType, SliderPath};

/// A single object on the playfield.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitObject {
    /// Playfield position (the head position for sliders).
    pub pos: Vec2,
    /// Start time in milliseconds.
    pub time: f64,
    /// Whether this object starts a new combo.
    pub new_combo: bool,
    /// How many combo colours the new combo skips (bits 4..=6).
    pub combo_skip: u8,
    /// Hitsound flags of the object (the head edge for sliders).
    pub hitsound: Hitsound,
    /// The variant payload.
    pub kind: HitObjectKind,
    /// Trailing hit sample descriptor, when the file carried one.
    pub sample: Option<HitSample>,
}

/// The variant payload of a hit object.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitObjectKind {
    /// A plain hit circle.
    Circle,
    /// A slider and its path data.
    Slider(SliderData),
    /// A spinner lasting until `end_time`.
    Spinner {
        /// End time in milliseconds.
        end_time: f64,
    },
    /// A mania hold note lasting until `end_time`.
    Hold {
        /// End time in milliseconds.
        end_time: f64,
    },
}

/// Path and per-edge data of a slider.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliderData {
    /// The curve family of the path.
    pub curve_type: CurveType,
    /// Control points after the head position.
    pub control_points: Vec<Vec2>,
    /// Number of spans the ball travels (`1` = no repeat arrow).
    pub repeats: u32,
    /// Authoritative path length in osu! pixels, overriding the natural
    /// curve length for duration and velocity purposes.
    pub pixel_length: f64,
    /// Per-edge hitsound flags, one per node, when present in the file.
    pub edge_hitsounds: Option<Vec<Hitsound>>,
    /// Per-edge sample set pairs, one per node, when present in the file.
    pub edge_sets: Option<Vec<EdgeSet>>,
}

impl SliderData {
    /// Number of nodes (head, repeats, tail) = `repeats + 1`.
    #[must_use]
    pub const fn node_count(&self) -> u32 {
        self.repeats + 1
    }
}

const TYPE_CIRCLE: u8 = 1;
const TYPE_SLIDER: u8 = 2;
const TYPE_NEW_COMBO: u8 = 4;
const TYPE_SPINNER: u8 = 8;
const TYPE_HOLD: u8 = 128;

impl HitObject {
    /// Decodes one hit object line, dispatching on the type bit-field.
    ///
    /// # Errors
    ///
    /// Fails on a short record, a malformed number, or a bit-field that
    /// selects no (or several) variants.
    pub fn decode(line: &str, config: &DecodeConfig) -> Result<Self> {
        let parts: Vec<&str> = line.split(',').collect();
        let pos = Vec2::new(
            field::parse_number("x", line, field::required(&parts, 0, "x", line)?)?,
            field::parse_number("y", line, field::required(&parts, 1, "y", line)?)?,
        );
        let time = field::parse_number("time", line, field::required(&parts, 2, "time", line)?)?;
        let bits: u8 =
            field::parse_number("type", line, field::required(&parts, 3, "type", line)?)?;
        let hitsound = Hitsound::from_bits(field::parse_number(
            "hitSound",
            line,
            field::required(&parts, 4, "hitSound", line)?,
        )?);
        let new_combo = bits & TYPE_NEW_COMBO != 0;
        let combo_skip = (bits >> 4) & 7;

        let variant_bits = bits & (TYPE_CIRCLE | TYPE_SLIDER | TYPE_SPINNER | TYPE_HOLD);
        let (kind, sample) = match variant_bits {
            TYPE_CIRCLE => {
                let sample = decode_trailing_sample(parts.get(5), line, config)?;
                (HitObjectKind::Circle, sample)
            }
            TYPE_SLIDER => decode_slider_params(&parts, line, config)?,
            TYPE_SPINNER => {
                let end_time = field::parse_number(
                    "endTime",
                    line,
                    field::required(&parts, 5, "endTime", line)?,
                )?;
                let sample = decode_trailing_sample(parts.get(6), line, config)?;
                (HitObjectKind::Spinner { end_time }, sample)
            }
            TYPE_HOLD => {
                let params = field::required(&parts, 5, "endTime", line)?;
                let (end_text, sample_text) = match params.split_once(':') {
                    Some((end, rest)) => (end, Some(rest)),
                    None => (params, None),
                };
                let end_time = field::parse_number("endTime", line, end_text)?;
                let sample = sample_text
                    .map(|text| HitSample::decode(text, line, config))
                    .transpose()?;
                (HitObjectKind::Hold { end_time }, sample)
            }
            _ => {
                return Err(FormatError::UnknownObjectType {
                    bits,
                    line: line.to_owned(),
                });
            }
        };

        Ok(Self {
            pos,
            time,
            new_combo,
            combo_skip,
            hitsound,
            kind,
            sample,
        })
    }

    /// The type bit-field this object is stored as.
    #[must_use]
    pub fn type_bits(&self) -> u8 {
        let variant = match self.kind {
            HitObjectKind::Circle => TYPE_CIRCLE,
            HitObjectKind::Slider(_) => TYPE_SLIDER,
            HitObjectKind::Spinner { .. } => TYPE_SPINNER,
            HitObjectKind::Hold { .. } => TYPE_HOLD,
        };
        variant
            | if self.new_combo { TYPE_NEW_COMBO } else { 0 }
            | (self.combo_skip & 7) << 4
    }

    /// Encodes the object back to its line form. Never fails; when a later
    /// optional group is present, earlier omitted groups are materialized
    /// with their defaults so the output always re-decodes.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut line = format!(
            "{},{},{},{},{}",
            field::format_f64(self.pos.x),
            field::format_f64(self.pos.y),
            field::format_f64(self.time),
            self.type_bits(),
            self.hitsound.to_bits()
        );
        match &self.kind {
            HitObjectKind::Circle => {
                if let Some(sample) = &self.sample {
                    line.push(',');
                    line.push_str(&sample.encode());
                }
            }
            HitObjectKind::Slider(slider) => {
                let curve = std::iter::once(slider.curve_type.letter().to_string())
                    .chain(slider.control_points.iter().map(|point| {
                        format!(
                            "{}:{}",
                            field::format_f64(point.x),
                            field::format_f64(point.y)
                        )
                    }))
                    .join("|");
                line.push_str(&format!(
                    ",{curve},{},{}",
                    slider.repeats,
                    field::format_f64(slider.pixel_length)
                ));

                let want_sets = slider.edge_sets.is_some() || self.sample.is_some();
                let want_hitsounds = slider.edge_hitsounds.is_some() || want_sets;
                if want_hitsounds {
                    let nodes = slider.node_count() as usize;
                    let hitsounds = slider
                        .edge_hitsounds
                        .clone()
                        .unwrap_or_else(|| vec![self.hitsound; nodes]);
                    line.push(',');
                    line.push_str(
                        &hitsounds
                            .iter()
                            .map(|edge| edge.to_bits().to_string())
                            .join("|"),
                    );
                    if want_sets {
                        let sets = slider
                            .edge_sets
                            .clone()
                            .unwrap_or_else(|| vec![EdgeSet::default(); nodes]);
                        line.push(',');
                        line.push_str(&sets.iter().map(|set| set.encode()).join("|"));
                        if let Some(sample) = &self.sample {
                            line.push(',');
                            line.push_str(&sample.encode());
                        }
                    }
                }
            }
            HitObjectKind::Spinner { end_time } => {
                line.push(',');
                line.push_str(&field::format_f64(*end_time));
                if let Some(sample) = &self.sample {
                    line.push(',');
                    line.push_str(&sample.encode());
                }
            }
            HitObjectKind::Hold { end_time } => {
                line.push(',');
                line.push_str(&field::format_f64(*end_time));
                if let Some(sample) = &self.sample {
                    line.push(':');
                    line.push_str(&sample.encode());
                }
            }
        }
        line
    }

    /// Builds the slider's path, head position included; `None` for the
    /// other variants. The path honors the authoritative pixel length
    /// override.
    #[must_use]
    pub fn slider_path(&self) -> Option<SliderPath> {
        let HitObjectKind::Slider(slider) = &self.kind else {
            return None;
        };
        let mut points = Vec::with_capacity(slider.control_points.len() + 1);
        points.push(self.pos);
        points.extend_from_slice(&slider.control_points);
        Some(SliderPath::new(
            slider.curve_type,
            points,
            Some(slider.pixel_length),
        ))
    }

    /// The sample descriptor with absent-field defaults applied.
    #[must_use]
    pub fn sample_or_default(&self) -> HitSample {
        self.sample.clone().unwrap_or_default()
    }
}

fn decode_trailing_sample(
    text: Option<&&str>,
    line: &str,
    config: &DecodeConfig,
) -> Result<Option<HitSample>> {
    text.map(|text| HitSample::decode(text, line, config))
        .transpose()
}

fn decode_slider_params(
    parts: &[&str],
    line: &str,
    config: &DecodeConfig,
) -> Result<(HitObjectKind, Option<HitSample>)> {
    let curve_text = field::required(parts, 5, "curve", line)?;
    let mut curve_pieces = curve_text.split('|');
    let letter = curve_pieces.next().unwrap_or("");
    let curve_type =
        CurveType::from_letter(letter).ok_or_else(|| FormatError::UnknownCurveType {
            curve_type: letter.to_owned(),
            line: line.to_owned(),
        })?;
    let control_points = curve_pieces
        .map(|piece| {
            let (x, y) = piece.split_once(':').ok_or_else(|| FormatError::MissingField {
                field: "curvePointY",
                line: line.to_owned(),
            })?;
            Ok(Vec2::new(
                field::parse_number("curvePointX", line, x)?,
                field::parse_number("curvePointY", line, y)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let repeats = field::parse_number(
        "repeatCount",
        line,
        field::required(parts, 6, "repeatCount", line)?,
    )?;
    let pixel_length = field::parse_number(
        "pixelLength",
        line,
        field::required(parts, 7, "pixelLength", line)?,
    )?;

    let edge_hitsounds = parts
        .get(8)
        .map(|text| {
            text.split('|')
                .map(|edge| {
                    field::parse_number("edgeHitsound", line, edge).map(Hitsound::from_bits)
                })
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;
    let edge_sets = parts
        .get(9)
        .map(|text| {
            text.split('|')
                .map(|edge| EdgeSet::decode(edge, line))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;
    let sample = decode_trailing_sample(parts.get(10), line, config)?;

    Ok((
        HitObjectKind::Slider(SliderData {
            curve_type,
            control_points,
            repeats,
            pixel_length,
            edge_hitsounds,
            edge_sets,
        }),
        sample,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::osu::default_config;
    use crate::osu::sample::SampleSet;

    fn decode(line: &str) -> HitObject {
        HitObject::decode(line, &default_config()).expect("decodes")
    }

    #[test]
    fn circle_roundtrips() {
        let line = "256,192,1000,5,2,0:0:0:0:";
        let object = decode(line);
        assert_eq!(object.kind, HitObjectKind::Circle);
        assert!(object.new_combo);
        assert!(object.hitsound.whistle);
        assert_eq!(object.encode(), line);
    }

    #[test]
    fn circle_without_sample_roundtrips() {
        let line = "100,100,250,1,0";
        let object = decode(line);
        assert_eq!(object.sample, None);
        assert_eq!(object.encode(), line);
    }

    #[test]
    fn slider_full_form_roundtrips() {
        let line = "36,68,6093,2,0,B|136:-4|263:56|348:-28,1,340,2|8,0:0|2:1,0:0:0:70:";
        let object = decode(line);
        let HitObjectKind::Slider(ref slider) = object.kind else {
            panic!("expected slider");
        };
        assert_eq!(slider.curve_type, CurveType::Bezier);
        assert_eq!(slider.control_points.len(), 3);
        assert_eq!(slider.repeats, 1);
        assert_eq!(slider.pixel_length, 340.0);
        assert_eq!(
            slider.edge_sets.as_deref(),
            Some(
                &[
                    EdgeSet::default(),
                    EdgeSet {
                        sample_set: SampleSet::Soft,
                        addition_set: SampleSet::Normal,
                    },
                ][..]
            )
        );
        assert_eq!(object.encode(), line);
    }

    #[test]
    fn slider_minimal_form_roundtrips() {
        let line = "0,0,500,2,0,L|100:0,1,100";
        let object = decode(line);
        assert_eq!(object.encode(), line);
    }

    #[test]
    fn slider_sample_without_edges_materializes_defaults() {
        let mut object = decode("0,0,500,2,0,L|100:0,1,100");
        object.sample = Some(HitSample::default());
        let encoded = object.encode();
        assert_eq!(encoded, "0,0,500,2,0,L|100:0,1,100,0|0,0:0|0:0,0:0:0:0:");
        assert_eq!(decode(&encoded).sample, Some(HitSample::default()));
    }

    #[test]
    fn spinner_roundtrips() {
        let line = "256,192,2000,12,4,3500,0:0:0:0:";
        let object = decode(line);
        assert_eq!(object.kind, HitObjectKind::Spinner { end_time: 3500.0 });
        assert_eq!(object.encode(), line);
    }

    #[test]
    fn hold_note_colon_form_roundtrips() {
        let line = "64,192,1000,128,0,2500:0:0:0:0:";
        let object = decode(line);
        assert_eq!(object.kind, HitObjectKind::Hold { end_time: 2500.0 });
        assert_eq!(object.sample, Some(HitSample::default()));
        assert_eq!(object.encode(), line);

        let bare = "64,192,1000,128,0,2500";
        assert_eq!(decode(bare).encode(), bare);
    }

    #[test]
    fn conflicting_type_bits_fail() {
        let err = HitObject::decode("0,0,0,3,0", &default_config()).unwrap_err();
        assert!(matches!(
            err,
            FormatError::UnknownObjectType { bits: 3, .. }
        ));
        assert!(HitObject::decode("0,0,0,16,0", &default_config()).is_err());
    }

    #[test]
    fn unknown_curve_letter_fails() {
        let err = HitObject::decode("0,0,0,2,0,Q|1:2,1,50", &default_config()).unwrap_err();
        assert!(matches!(err, FormatError::UnknownCurveType { .. }));
    }
}
