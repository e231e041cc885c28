//! The codec module of the osu! beatmap (`.osu`) file format.
//!
//! This module consists of a line classifier and per-entity codecs.
//!
//! [`section`] splits the raw line sequence into a preamble and named
//! `[Section]` bodies. [`field`] provides culture-invariant numeric parsing
//! and formatting. The entity modules ([`hit_object`], [`timing_point`],
//! [`colour`], [`event`], [`sample`]) each provide a symmetric
//! `decode`/`encode` pair, and [`model`] assembles everything into the
//! [`Beatmap`] aggregate.
//!
//! In detail, our policies are:
//!
//! - Decoding a file that decodes successfully and re-encoding it
//!   reproduces the original line sequence exactly.
//! - Decode failures abort the whole file and carry the first offending
//!   line; encoding never fails.
//! - All numeric fields use invariant formatting: period decimal
//!   separator, no grouping separators.
//! - Unknown sections and unrecognized event lines are preserved verbatim
//!   rather than rejected.

pub mod colour;
pub mod event;
pub mod field;
pub mod hit_object;
pub mod model;
pub mod sample;
pub mod section;
pub mod timing_point;

use thiserror::Error;

use self::sample::SampleSet;
pub use self::model::Beatmap;

/// An error occurred while decoding a beatmap file.
///
/// Every variant carries the offending line so callers can report decode
/// failures with full context. The first malformed line aborts the decode
/// of the entire file.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FormatError {
    /// A record was missing a required field.
    #[error("missing {field} in `{line}`")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
        /// The offending line.
        line: String,
    },
    /// A numeric field did not parse under invariant formatting.
    #[error("invalid {field} in `{line}`")]
    InvalidNumber {
        /// Name of the malformed field.
        field: &'static str,
        /// The offending line.
        line: String,
    },
    /// The hit object type bit-field selected no variant, or several.
    #[error("unrecognized hit object type bits {bits} in `{line}`")]
    UnknownObjectType {
        /// The raw type bit-field.
        bits: u8,
        /// The offending line.
        line: String,
    },
    /// The slider curve type letter was not recognized.
    #[error("unknown curve type `{curve_type}` in `{line}`")]
    UnknownCurveType {
        /// The unrecognized curve type discriminator.
        curve_type: String,
        /// The offending line.
        line: String,
    },
    /// A sample set index was outside the documented `0..=3` range.
    #[error("invalid sample set `{value}` in `{line}`")]
    UnknownSampleSet {
        /// The out-of-range index.
        value: String,
        /// The offending line.
        line: String,
    },
    /// A line in a key/value section had no `:` separator.
    #[error("expected `Key: value` but got `{line}`")]
    MalformedKeyValue {
        /// The offending line.
        line: String,
    },
}

impl FormatError {
    /// The offending source line this error was raised for.
    #[must_use]
    pub fn line(&self) -> &str {
        match self {
            Self::MissingField { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::UnknownObjectType { line, .. }
            | Self::UnknownCurveType { line, .. }
            | Self::UnknownSampleSet { line, .. }
            | Self::MalformedKeyValue { line } => line,
        }
    }
}

/// type alias of `core::result::Result<T, FormatError>`
pub(crate) type Result<T> = core::result::Result<T, FormatError>;

/// Decode-time fallback defaults, passed explicitly into the codec instead
/// of being read from any global settings store.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeConfig {
    /// Volume used when a record omits its volume field.
    pub default_volume: f64,
    /// Sample set used when a record omits its sample set field.
    pub default_sample_set: SampleSet,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        default_config()
    }
}

/// The default decode configuration: full volume, normal sample set.
#[must_use]
pub const fn default_config() -> DecodeConfig {
    DecodeConfig {
        default_volume: 100.0,
        default_sample_set: SampleSet::Normal,
    }
}

/// Decodes a whole beatmap source text. Line endings may be LF or CRLF.
///
/// # Errors
///
/// Returns the [`FormatError`] for the first malformed line.
pub fn decode_beatmap(source: &str, config: &DecodeConfig) -> Result<Beatmap> {
    decode_beatmap_lines(source.lines(), config)
}

/// Decodes a beatmap from an explicit line sequence, the form supplied by
/// file-reading facilities.
///
/// # Errors
///
/// Returns the [`FormatError`] for the first malformed line.
pub fn decode_beatmap_lines<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    config: &DecodeConfig,
) -> Result<Beatmap> {
    let classified = section::classify(lines);
    model::assemble(classified, config)
}
