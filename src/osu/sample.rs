//! Hitsound flags and hit sample descriptors.

use super::{DecodeConfig, FormatError, Result, field};

/// A sample set bank, stored in the file as an index `0..=3`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleSet {
    /// Inherit from the timing point (index `0`).
    #[default]
    Auto,
    /// The normal bank (index `1`).
    Normal,
    /// The soft bank (index `2`).
    Soft,
    /// The drum bank (index `3`).
    Drum,
}

impl SampleSet {
    /// Reads a sample set from its file index.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Auto),
            1 => Some(Self::Normal),
            2 => Some(Self::Soft),
            3 => Some(Self::Drum),
            _ => None,
        }
    }

    /// The index this sample set is stored as.
    #[must_use]
    pub const fn to_index(self) -> u8 {
        match self {
            Self::Auto => 0,
            Self::Normal => 1,
            Self::Soft => 2,
            Self::Drum => 3,
        }
    }

    pub(crate) fn decode(text: &str, line: &str) -> Result<Self> {
        let index: u8 = field::parse_number("sampleSet", line, text)?;
        Self::from_index(index).ok_or_else(|| FormatError::UnknownSampleSet {
            value: text.trim().to_owned(),
            line: line.to_owned(),
        })
    }
}

/// The four additive hitsound layers of an object edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hitsound {
    /// Bit 0, the normal hit.
    pub normal: bool,
    /// Bit 1, the whistle layer.
    pub whistle: bool,
    /// Bit 2, the finish layer.
    pub finish: bool,
    /// Bit 3, the clap layer.
    pub clap: bool,
}

impl Hitsound {
    /// Reads the hitsound flags from their bit-field. Unassigned bits are
    /// ignored, as every client does.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            normal: bits & 1 != 0,
            whistle: bits & 2 != 0,
            finish: bits & 4 != 0,
            clap: bits & 8 != 0,
        }
    }

    /// The bit-field this hitsound is stored as.
    #[must_use]
    pub const fn to_bits(self) -> u8 {
        (self.normal as u8)
            | (self.whistle as u8) << 1
            | (self.finish as u8) << 2
            | (self.clap as u8) << 3
    }

    /// Whether any audible layer beyond the default hit is set.
    #[must_use]
    pub const fn is_plain(self) -> bool {
        !(self.whistle || self.finish || self.clap)
    }
}

/// A hit sample descriptor: `set:additionSet:index:volume:filename`.
///
/// Trailing components may be omitted in the file; omitted volume falls
/// back to [`DecodeConfig::default_volume`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitSample {
    /// Bank for the normal hit.
    pub sample_set: SampleSet,
    /// Bank for the whistle/finish/clap additions.
    pub addition_set: SampleSet,
    /// Custom sample index (`0` uses the timing point's index).
    pub custom_index: u32,
    /// Volume percentage (`0` inherits the timing point's volume).
    pub volume: f64,
    /// Custom sample filename overriding all banks, often empty.
    pub filename: String,
}

impl HitSample {
    /// Decodes a colon-separated hit sample descriptor.
    pub(crate) fn decode(text: &str, line: &str, config: &DecodeConfig) -> Result<Self> {
        let mut components = text.split(':');
        let sample_set = match components.next() {
            Some(first) => SampleSet::decode(first, line)?,
            None => config.default_sample_set,
        };
        let addition_set = components
            .next()
            .map(|c| SampleSet::decode(c, line))
            .transpose()?
            .unwrap_or(SampleSet::Auto);
        let custom_index = match components.next() {
            Some(c) => field::parse_number("customIndex", line, c)?,
            None => 0,
        };
        let volume = match components.next() {
            Some(c) => field::parse_number("volume", line, c)?,
            None => config.default_volume,
        };
        let filename = components.next().unwrap_or("").to_owned();
        Ok(Self {
            sample_set,
            addition_set,
            custom_index,
            volume,
            filename,
        })
    }

    /// Encodes the descriptor with all five components. An empty filename
    /// yields the conventional trailing colon.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.sample_set.to_index(),
            self.addition_set.to_index(),
            self.custom_index,
            field::format_f64(self.volume),
            self.filename
        )
    }
}

/// A per-edge sample set override pair: `set:additionSet`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeSet {
    /// Bank for the edge's normal hit.
    pub sample_set: SampleSet,
    /// Bank for the edge's additions.
    pub addition_set: SampleSet,
}

impl EdgeSet {
    pub(crate) fn decode(text: &str, line: &str) -> Result<Self> {
        let (set, addition) = text.split_once(':').ok_or_else(|| FormatError::MissingField {
            field: "edgeAdditionSet",
            line: line.to_owned(),
        })?;
        Ok(Self {
            sample_set: SampleSet::decode(set, line)?,
            addition_set: SampleSet::decode(addition, line)?,
        })
    }

    pub(crate) fn encode(self) -> String {
        format!(
            "{}:{}",
            self.sample_set.to_index(),
            self.addition_set.to_index()
        )
    }
}
