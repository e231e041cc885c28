//! Prelude module for the crate.
//!
//! Re-exports all commonly used types for convenient access. You can use
//! `use osu_map_rs::prelude::*;` to import everything at once.

// Re-export diagnostics when the feature is enabled
#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{SimpleSource, ToAriadne, emit_format_error};

pub use crate::geometry::{Vec2, circumcircle_center};
pub use crate::osu::{
    Beatmap, DecodeConfig, FormatError,
    colour::{ColourEntry, ColourKey, Rgb},
    decode_beatmap, decode_beatmap_lines, default_config,
    event::{BackgroundEvent, BreakEvent, Event},
    field::{format_f64, parse_number, try_parse},
    hit_object::{HitObject, HitObjectKind, SliderData},
    model::{KeyValueEntry, KeyValueSection, SectionId, SectionLayout, UnknownSection},
    sample::{EdgeSet, HitSample, Hitsound, SampleSet},
    section::{ClassifiedLines, RawSection, classify, header_name},
    timing_point::{Effects, TimingPoint},
};
pub use crate::path::{
    CurveType, PathPoint, SliderPath, resampler::PathResampler,
};
pub use crate::timeline::{
    EdgeRole, InvalidStateError, TimelineObject, TimelineOrigin, for_hit_object,
    timeline_objects,
};
pub use crate::util::{format_timestamp, is_subsequence, parse_timestamp};
