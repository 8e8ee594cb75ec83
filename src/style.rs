use bitflags::bitflags;

bitflags! {
    /// Text attributes applied before a title and reset right after it.
    ///
    /// The low byte holds the `ESC !` print mode bits as the firmware reads
    /// them; alignment and inversion are separate commands and live above it.
    #[derive(Default)]
    pub struct TextStyle: u16 {
        const EMPHASIZED    = 0b0000_1000;
        const DOUBLE_HEIGHT = 0b0001_0000;
        const DOUBLE_WIDTH  = 0b0010_0000;
        const CENTERED      = 0b0001_0000_0000;
        const INVERTED      = 0b0010_0000_0000;
    }
}

impl TextStyle {
    /// Print mode byte for `ESC ! n`.
    pub fn print_mode(&self) -> u8 {
        (*self & (Self::EMPHASIZED | Self::DOUBLE_HEIGHT | Self::DOUBLE_WIDTH)).bits() as u8
    }
}

/// Named style preset used for titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleLevel {
    /// Bold, double height and double width, left aligned.
    Banner,
    /// Centered, bold and inverted.
    Highlight,
    /// Centered only.
    Plain,
}

impl TitleLevel {
    /// Level 1 is a banner, level 2 a highlight, anything else is plain.
    pub fn from_level(level: u8) -> Self {
        match level {
            1 => Self::Banner,
            2 => Self::Highlight,
            _ => Self::Plain,
        }
    }

    pub fn style(&self) -> TextStyle {
        match self {
            Self::Banner => {
                TextStyle::EMPHASIZED | TextStyle::DOUBLE_HEIGHT | TextStyle::DOUBLE_WIDTH
            }
            Self::Highlight => TextStyle::CENTERED | TextStyle::EMPHASIZED | TextStyle::INVERTED,
            Self::Plain => TextStyle::CENTERED,
        }
    }
}

impl Default for TitleLevel {
    fn default() -> Self {
        Self::Highlight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_mode_ignores_alignment_and_invert() {
        assert_eq!(TitleLevel::Banner.style().print_mode(), 0b0011_1000);
        assert_eq!(TitleLevel::Highlight.style().print_mode(), 0b0000_1000);
        assert_eq!(TitleLevel::Plain.style().print_mode(), 0);
        assert_eq!(TextStyle::empty().print_mode(), 0);
    }

    #[test]
    fn test_from_level() {
        assert_eq!(TitleLevel::from_level(1), TitleLevel::Banner);
        assert_eq!(TitleLevel::from_level(2), TitleLevel::Highlight);
        assert_eq!(TitleLevel::from_level(3), TitleLevel::Plain);
        assert_eq!(TitleLevel::from_level(0), TitleLevel::Plain);
        assert_eq!(TitleLevel::from_level(9), TitleLevel::Plain);
    }
}
