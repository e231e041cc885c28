//! Fancy diagnostics support using `ariadne`.
//!
//! Decode errors carry the offending line as text; this module locates
//! that line in the original source and renders an `ariadne::Report`
//! pointing at it, without modifying the error type definitions.
//!
//! # Usage Example
//!
//! ```rust
//! use osu_map_rs::diagnostics::emit_format_error;
//! use osu_map_rs::osu::{decode_beatmap, default_config};
//!
//! let source = "osu file format v14\n\n[TimingPoints]\n0,tempo\n";
//! if let Err(error) = decode_beatmap(source, &default_config()) {
//!     emit_format_error("broken.osu", source, &error);
//! }
//! ```

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::osu::FormatError;

/// Simple source container that holds the filename and source text.
pub struct SimpleSource<'a> {
    /// Name of the source file.
    name: &'a str,
    /// Source text content.
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Create a new source container instance.
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Get source text content.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Get source file name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Byte range of the error's offending line within the source text,
    /// empty when the line cannot be located (e.g. a synthetic error).
    #[must_use]
    pub fn locate(&self, error: &FormatError) -> std::ops::Range<usize> {
        let line = error.line();
        if line.is_empty() {
            return 0..0;
        }
        self.text
            .find(line)
            .map_or(0..0, |start| start..start + line.len())
    }
}

/// Trait for converting decode errors to `ariadne::Report`.
pub trait ToAriadne {
    /// Convert the error to an ariadne Report against `src`.
    fn to_report<'a>(&self, src: &SimpleSource<'a>)
    -> Report<'a, (String, std::ops::Range<usize>)>;
}

impl ToAriadne for FormatError {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        build_report(
            src,
            ReportKind::Error,
            src.locate(self),
            "beatmap decode failed",
            self,
            Color::Red,
        )
    }
}

/// Helper to build a styled ariadne `Report` consistently.
#[must_use]
pub fn build_report<'a>(
    src: &SimpleSource<'a>,
    kind: ReportKind<'a>,
    range: std::ops::Range<usize>,
    title: &str,
    label_message: impl ToString,
    color: Color,
) -> Report<'a, (String, std::ops::Range<usize>)> {
    let filename = src.name().to_string();
    Report::build(kind, (filename.clone(), range.clone()))
        .with_message(title)
        .with_label(
            Label::new((filename, range))
                .with_message(label_message.to_string())
                .with_color(color),
        )
        .finish()
}

/// Convenience method: render a [`FormatError`] against its source text.
pub fn emit_format_error(name: &str, source: &str, error: &FormatError) {
    let simple = SimpleSource::new(name, source);
    let report = error.to_report(&simple);
    let _ = report.print((name.to_string(), Source::from(source)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::osu::{decode_beatmap, default_config};

    #[test]
    fn report_points_at_offending_line() {
        let source = "osu file format v14\n\n[TimingPoints]\n0,tempo\n";
        let error = decode_beatmap(source, &default_config()).unwrap_err();
        let src = SimpleSource::new("broken.osu", source);
        let range = src.locate(&error);
        assert_eq!(&source[range], "0,tempo");
        // Building the report must not panic.
        let _ = error.to_report(&src);
    }
}
