//! The line classifier: splits a raw line sequence into a preamble and
//! named `[Section]` bodies.
//!
//! Classification is total. Everything before the first header line is the
//! preamble (the format version stamp and its surrounding blank lines,
//! kept verbatim); each section runs until the next header. Trailing blank
//! lines of a section body are counted separately so encoding can
//! reproduce the original layout exactly.

/// A raw section: its header name and body lines, still undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection<'a> {
    /// The name between the header brackets, e.g. `TimingPoints`.
    pub name: &'a str,
    /// Body lines in order, trailing blank lines stripped.
    pub lines: Vec<&'a str>,
    /// How many blank lines followed the body before the next header or
    /// the end of the file.
    pub blank_lines_after: usize,
}

/// The output of [`classify`]: preamble plus ordered raw sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLines<'a> {
    /// Lines before the first section header, verbatim.
    pub preamble: Vec<&'a str>,
    /// Sections in file order.
    pub sections: Vec<RawSection<'a>>,
}

/// Returns the section name if the line is a `[SectionName]` header.
#[must_use]
pub fn header_name(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .filter(|name| !name.is_empty())
}

/// Splits a line sequence into the preamble and its raw sections.
pub fn classify<'a>(lines: impl IntoIterator<Item = &'a str>) -> ClassifiedLines<'a> {
    let mut classified = ClassifiedLines::default();
    let mut current: Option<RawSection<'a>> = None;

    for line in lines {
        if let Some(name) = header_name(line) {
            if let Some(finished) = current.take() {
                classified.sections.push(strip_trailing_blanks(finished));
            }
            current = Some(RawSection {
                name,
                lines: Vec::new(),
                blank_lines_after: 0,
            });
        } else {
            match current.as_mut() {
                Some(section) => section.lines.push(line),
                None => classified.preamble.push(line),
            }
        }
    }
    if let Some(finished) = current.take() {
        classified.sections.push(strip_trailing_blanks(finished));
    }
    classified
}

fn strip_trailing_blanks(mut section: RawSection<'_>) -> RawSection<'_> {
    while section.lines.last().is_some_and(|line| line.trim().is_empty()) {
        section.lines.pop();
        section.blank_lines_after += 1;
    }
    section
}
