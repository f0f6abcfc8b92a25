use serde::{Deserialize, Serialize};

/// Closed set of scripts a token can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptTag {
    Latin,
    Devanagari,
    Bengali,
    Tamil,
    Telugu,
    Gujarati,
    Kannada,
    Malayalam,
    Punjabi,
    Odia,
    Arabic,
    Number,
    Space,
    Other,
}

impl ScriptTag {
    /// True for any of the native Indic scripts (excludes Latin, Arabic,
    /// Number, Space, Other).
    pub fn is_native_indic(&self) -> bool {
        matches!(
            self,
            Self::Devanagari
                | Self::Bengali
                | Self::Tamil
                | Self::Telugu
                | Self::Gujarati
                | Self::Kannada
                | Self::Malayalam
                | Self::Punjabi
                | Self::Odia
        )
    }

    /// Classify a single character by Unicode block.
    pub fn of_char(c: char) -> Self {
        if c.is_whitespace() {
            return Self::Space;
        }
        if c.is_ascii_digit() {
            return Self::Number;
        }
        let cp = c as u32;
        match cp {
            0x0041..=0x005A | 0x0061..=0x007A => Self::Latin,
            0x0900..=0x097F => Self::Devanagari,
            0x0980..=0x09FF => Self::Bengali,
            0x0B80..=0x0BFF => Self::Tamil,
            0x0C00..=0x0C7F => Self::Telugu,
            0x0A80..=0x0AFF => Self::Gujarati,
            0x0C80..=0x0CFF => Self::Kannada,
            0x0D00..=0x0D7F => Self::Malayalam,
            0x0A00..=0x0A7F => Self::Punjabi,
            0x0B00..=0x0B7F => Self::Odia,
            0x0600..=0x06FF => Self::Arabic,
            _ if c.is_numeric() => Self::Number,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_latin_and_devanagari() {
        assert_eq!(ScriptTag::of_char('a'), ScriptTag::Latin);
        assert_eq!(ScriptTag::of_char('अ'), ScriptTag::Devanagari);
        assert_eq!(ScriptTag::of_char(' '), ScriptTag::Space);
        assert_eq!(ScriptTag::of_char('5'), ScriptTag::Number);
        assert_eq!(ScriptTag::of_char('ড'), ScriptTag::Bengali);
    }

    #[test]
    fn native_indic_excludes_latin() {
        assert!(ScriptTag::Devanagari.is_native_indic());
        assert!(!ScriptTag::Latin.is_native_indic());
        assert!(!ScriptTag::Arabic.is_native_indic());
    }
}
