//! The osu! beatmap format codec and slider path engine.
//!
//! This crate decodes a line-oriented `.osu` map file into a structured
//! [`osu::Beatmap`] model that re-encodes to the original line sequence
//! exactly, and evaluates the parametric slider paths the format stores:
//! arc-length parametrization, inverse length lookup, timeline event
//! derivation and generic resampling. Hitsound generators, rhythm guides
//! and pattern tools all consume these two surfaces.
//!
//! # Example
//!
//! ```
//! use osu_map_rs::prelude::*;
//!
//! let source = "osu file format v14\n\n[HitObjects]\n0,0,500,2,0,L|100:0,1,100\n";
//! let beatmap = decode_beatmap(source, &default_config())?;
//!
//! // Lossless round trip.
//! assert_eq!(beatmap.encode(), source);
//!
//! // Slider geometry with the authoritative length override applied.
//! let path = beatmap.hit_objects[0].slider_path().expect("a slider");
//! assert_eq!(path.total_length(), 100.0);
//! # Ok::<(), osu_map_rs::osu::FormatError>(())
//! ```
//!
//! All operations are synchronous and pure; decoding many files is
//! embarrassingly parallel at one beatmap per worker.

#[cfg(feature = "diagnostics")]
pub mod diagnostics;
pub mod geometry;
pub mod osu;
pub mod path;
pub mod prelude;
pub mod timeline;
pub mod util;
