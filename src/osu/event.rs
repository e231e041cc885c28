//! The events codec for the `[Events]` section.
//!
//! Only the records downstream tools consume (background, break periods)
//! are decoded into structure. Storyboard commands, videos and comments
//! are kept verbatim so the section re-encodes exactly.

use super::{Result, field};

/// One line of the `[Events]` section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// The background image declaration: `0,startTime,filename[,x,y]`.
    Background(BackgroundEvent),
    /// A break period: `2,start,end` (or spelled `Break,start,end`).
    Break(BreakEvent),
    /// Any other event line, preserved verbatim.
    Raw(String),
}

/// A background image declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackgroundEvent {
    /// Start time field, conventionally `0`.
    pub start_time: f64,
    /// Filename field exactly as written, quoting included.
    pub filename: String,
    /// Optional screen offset pair.
    pub offset: Option<(i32, i32)>,
}

impl BackgroundEvent {
    /// The filename with surrounding quotes stripped.
    #[must_use]
    pub fn file_path(&self) -> &str {
        self.filename
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(&self.filename)
    }
}

/// A gameplay break period.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakEvent {
    /// The discriminator as written, `2` or `Break`.
    pub label: String,
    /// Break start time in milliseconds.
    pub start: f64,
    /// Break end time in milliseconds.
    pub end: f64,
}

impl Event {
    /// Decodes one events line. Unrecognized discriminators never fail;
    /// they become [`Event::Raw`].
    ///
    /// # Errors
    ///
    /// Fails when a background or break record carries malformed numbers.
    pub fn decode(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split(',').collect();
        match parts.first().map(|discriminator| discriminator.trim()) {
            Some("0") if parts.len() >= 3 => {
                let start_time = field::parse_number("startTime", line, parts[1])?;
                let filename = parts[2].to_owned();
                let offset = match (parts.get(3), parts.get(4)) {
                    (Some(x), Some(y)) => Some((
                        field::parse_number("xOffset", line, x)?,
                        field::parse_number("yOffset", line, y)?,
                    )),
                    _ => None,
                };
                Ok(Self::Background(BackgroundEvent {
                    start_time,
                    filename,
                    offset,
                }))
            }
            Some(label @ ("2" | "Break")) if parts.len() >= 3 => Ok(Self::Break(BreakEvent {
                label: label.to_owned(),
                start: field::parse_number("breakStart", line, parts[1])?,
                end: field::parse_number("breakEnd", line, parts[2])?,
            })),
            _ => Ok(Self::Raw(line.to_owned())),
        }
    }

    /// Encodes the event back to its line form.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Background(background) => {
                let base = format!(
                    "0,{},{}",
                    field::format_f64(background.start_time),
                    background.filename
                );
                match background.offset {
                    Some((x, y)) => format!("{base},{x},{y}"),
                    None => base,
                }
            }
            Self::Break(break_event) => format!(
                "{},{},{}",
                break_event.label,
                field::format_f64(break_event.start),
                field::format_f64(break_event.end)
            ),
            Self::Raw(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_roundtrips() {
        let line = "0,0,\"bg.jpg\",0,0";
        let event = Event::decode(line).unwrap();
        let Event::Background(ref background) = event else {
            panic!("expected background, got {event:?}");
        };
        assert_eq!(background.file_path(), "bg.jpg");
        assert_eq!(background.offset, Some((0, 0)));
        assert_eq!(event.encode(), line);
    }

    #[test]
    fn break_roundtrips_both_spellings() {
        for line in ["2,24000,32000", "Break,24000,32000"] {
            let event = Event::decode(line).unwrap();
            assert!(matches!(event, Event::Break(_)));
            assert_eq!(event.encode(), line);
        }
    }

    #[test]
    fn storyboard_lines_kept_verbatim() {
        for line in [
            "//Storyboard Layer 0 (Background)",
            "Sprite,Pass,Centre,\"sb/l.png\",320,240",
            " M,0,1500,,320,240",
            "Video,0,\"intro.mp4\"",
        ] {
            let event = Event::decode(line).unwrap();
            assert_eq!(event, Event::Raw(line.to_owned()));
            assert_eq!(event.encode(), line);
        }
    }

    #[test]
    fn malformed_break_fails() {
        assert!(Event::decode("2,start,end").is_err());
    }
}
