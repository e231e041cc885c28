//! Small utilities shared across beatmap tooling.

/// Returns `true` if `needle` occurs in `haystack` in order, not
/// necessarily contiguously. The empty slice is a subsequence of anything.
#[must_use]
pub fn is_subsequence<T: PartialEq>(needle: &[T], haystack: &[T]) -> bool {
    let mut candidates = haystack.iter();
    needle.iter().all(|want| candidates.any(|got| got == want))
}

/// Parses an editor timestamp such as `00:01:891 (1,2) -` into signed
/// milliseconds.
///
/// The leading `minutes:seconds:millis` triple is read; everything after it
/// (the selected-object list and trailing dash) is ignored. Negative
/// components resolve into a signed total, so `00:-01:-230` is `-1230`.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let numeric_end = text
        .find(|c: char| !c.is_ascii_digit() && c != ':' && c != '-')
        .unwrap_or(text.len());
    let mut components = text[..numeric_end].splitn(3, ':');
    let minutes: i64 = components.next()?.parse().ok()?;
    let seconds: i64 = components.next()?.parse().ok()?;
    let millis: i64 = components.next()?.parse().ok()?;
    Some(minutes * 60_000 + seconds * 1_000 + millis)
}

/// Formats milliseconds as an editor timestamp triple `mm:ss:mmm`.
#[must_use]
pub fn format_timestamp(total_millis: i64) -> String {
    let magnitude = total_millis.unsigned_abs();
    let sign = if total_millis < 0 { "-" } else { "" };
    format!(
        "{sign}{:02}:{:02}:{:03}",
        magnitude / 60_000,
        magnitude / 1_000 % 60,
        magnitude % 1_000
    )
}
