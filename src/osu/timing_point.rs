//! The timing point codec.
//!
//! A timing point line is
//! `time,beatLength,meter,sampleSet,sampleIndex,volume,uninherited,effects`.
//! An uninherited point declares tempo; an inherited one stores a slider
//! velocity multiplier encoded as a negative beat length, interpreted
//! relative to the preceding uninherited point.

use super::{DecodeConfig, Result, field, sample::SampleSet};

/// Effect flags of a timing point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effects {
    /// Bit 0: kiai time is active from this point on.
    pub kiai: bool,
    /// Bit 3: omit the first barline (taiko/mania).
    pub omit_first_barline: bool,
}

impl Effects {
    /// Reads the effect flags from their bit-field.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            kiai: bits & 1 != 0,
            omit_first_barline: bits & 8 != 0,
        }
    }

    /// The bit-field these flags are stored as.
    #[must_use]
    pub const fn to_bits(self) -> u32 {
        (self.kiai as u32) | (self.omit_first_barline as u32) << 3
    }
}

/// A tempo or effect declaration effective from `time` onward.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingPoint {
    /// Start of this point's reign, in milliseconds.
    pub time: f64,
    /// Milliseconds per beat for uninherited points; a negative multiplier
    /// encoding for inherited points (see [`TimingPoint::sv_multiplier`]).
    pub beat_length: f64,
    /// Beats per measure.
    pub meter: u32,
    /// Default sample bank from this point on.
    pub sample_set: SampleSet,
    /// Custom sample index (`0` selects the default samples).
    pub sample_index: u32,
    /// Hitsound volume percentage.
    pub volume: f64,
    /// `true` for tempo declarations, `false` for inherited points.
    pub uninherited: bool,
    /// Effect flags.
    pub effects: Effects,
}

impl TimingPoint {
    /// Decodes one timing point line. Only `time` and `beatLength` are
    /// required; the remaining fields fall back to their documented
    /// defaults (volume and sample set from `config`).
    ///
    /// # Errors
    ///
    /// Fails when a present field does not parse.
    pub fn decode(line: &str, config: &DecodeConfig) -> Result<Self> {
        let parts: Vec<&str> = line.split(',').collect();
        let time = field::parse_number("time", line, field::required(&parts, 0, "time", line)?)?;
        let beat_length = field::parse_number(
            "beatLength",
            line,
            field::required(&parts, 1, "beatLength", line)?,
        )?;
        let meter = match parts.get(2) {
            Some(text) => field::parse_number("meter", line, text)?,
            None => 4,
        };
        let sample_set = match parts.get(3) {
            Some(text) => SampleSet::decode(text, line)?,
            None => config.default_sample_set,
        };
        let sample_index = match parts.get(4) {
            Some(text) => field::parse_number("sampleIndex", line, text)?,
            None => 0,
        };
        let volume = match parts.get(5) {
            Some(text) => field::parse_number("volume", line, text)?,
            None => config.default_volume,
        };
        let uninherited = match parts.get(6) {
            Some(text) => field::parse_number::<u8>("uninherited", line, text)? != 0,
            None => true,
        };
        let effects = match parts.get(7) {
            Some(text) => Effects::from_bits(field::parse_number("effects", line, text)?),
            None => Effects::default(),
        };
        Ok(Self {
            time,
            beat_length,
            meter,
            sample_set,
            sample_index,
            volume,
            uninherited,
            effects,
        })
    }

    /// Encodes the timing point in the full eight-field form.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            field::format_f64(self.time),
            field::format_f64(self.beat_length),
            self.meter,
            self.sample_set.to_index(),
            self.sample_index,
            field::format_f64(self.volume),
            u8::from(self.uninherited),
            self.effects.to_bits()
        )
    }

    /// Whether this point stores a velocity multiplier instead of a tempo.
    #[must_use]
    pub fn is_inherited(&self) -> bool {
        !self.uninherited
    }

    /// The slider velocity multiplier this point applies: `-100 /
    /// beatLength` for inherited points, `1.0` for tempo declarations.
    #[must_use]
    pub fn sv_multiplier(&self) -> f64 {
        if self.is_inherited() && self.beat_length < 0.0 {
            -100.0 / self.beat_length
        } else {
            1.0
        }
    }

    /// Beats per minute of an uninherited point.
    #[must_use]
    pub fn bpm(&self) -> Option<f64> {
        self.uninherited.then(|| 60_000.0 / self.beat_length)
    }
}
