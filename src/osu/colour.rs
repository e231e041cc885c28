//! The combo colour codec for `[Colours]` entries.

use super::{FormatError, Result, field};

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// The key of a `[Colours]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColourKey {
    /// `ComboN` — position in the combo colour cycle. File order defines
    /// the cycling index, so entry order is significant.
    Combo(u32),
    /// Any other colour key, such as `SliderTrackOverride`.
    Named(String),
}

/// One `Key : r,g,b[,a]` entry of the `[Colours]` section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColourEntry {
    /// Which colour this entry assigns.
    pub key: ColourKey,
    /// The colour value.
    pub colour: Rgb,
    /// Optional alpha component, kept only when the file carried one.
    pub alpha: Option<u8>,
}

impl ColourEntry {
    /// Decodes one colours line.
    ///
    /// # Errors
    ///
    /// Fails when the separator is missing or a channel does not parse.
    pub fn decode(line: &str) -> Result<Self> {
        let (key_text, value) = line
            .split_once(':')
            .ok_or_else(|| FormatError::MalformedKeyValue {
                line: line.to_owned(),
            })?;
        let key_text = key_text.trim();
        let key = match key_text
            .strip_prefix("Combo")
            .and_then(|n| field::try_parse::<u32>(n))
        {
            Some(number) => ColourKey::Combo(number),
            None => ColourKey::Named(key_text.to_owned()),
        };

        let channels: Vec<&str> = value.split(',').collect();
        let colour = Rgb {
            r: field::parse_number("red", line, field::required(&channels, 0, "red", line)?)?,
            g: field::parse_number("green", line, field::required(&channels, 1, "green", line)?)?,
            b: field::parse_number("blue", line, field::required(&channels, 2, "blue", line)?)?,
        };
        let alpha = channels
            .get(3)
            .map(|text| field::parse_number("alpha", line, text))
            .transpose()?;
        Ok(Self { key, colour, alpha })
    }

    /// Encodes the entry in the conventional `Key : r,g,b[,a]` form.
    #[must_use]
    pub fn encode(&self) -> String {
        let key = match &self.key {
            ColourKey::Combo(number) => format!("Combo{number}"),
            ColourKey::Named(name) => name.clone(),
        };
        let Rgb { r, g, b } = self.colour;
        match self.alpha {
            Some(a) => format!("{key} : {r},{g},{b},{a}"),
            None => format!("{key} : {r},{g},{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combo_entry_roundtrips() {
        let line = "Combo1 : 255,128,0";
        let entry = ColourEntry::decode(line).unwrap();
        assert_eq!(entry.key, ColourKey::Combo(1));
        assert_eq!(entry.colour, Rgb { r: 255, g: 128, b: 0 });
        assert_eq!(entry.alpha, None);
        assert_eq!(entry.encode(), line);
    }

    #[test]
    fn named_entry_with_alpha() {
        let line = "SliderBorder : 10,20,30,200";
        let entry = ColourEntry::decode(line).unwrap();
        assert_eq!(entry.key, ColourKey::Named("SliderBorder".to_owned()));
        assert_eq!(entry.alpha, Some(200));
        assert_eq!(entry.encode(), line);
    }

    #[test]
    fn channel_out_of_range_fails() {
        assert!(ColourEntry::decode("Combo1 : 300,0,0").is_err());
        assert!(ColourEntry::decode("Combo1 : 255,0").is_err());
    }
}
