//! Dashboard palette for terminal output

use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

type Rgb = (u8, u8, u8);

pub mod palette {
    use super::Rgb;

    pub const PRIMARY: Rgb = (0x43, 0x61, 0xEE);
    pub const SECONDARY: Rgb = (0x3A, 0x0C, 0xA3);
    pub const ACCENT: Rgb = (0x72, 0x09, 0xB7);
    pub const HIGHLIGHT: Rgb = (0xF7, 0x25, 0x85);
    pub const TEXT: Rgb = (0xF8, 0xFA, 0xFC);
    pub const MUTED: Rgb = (0x94, 0xA3, 0xB8);

    /// Rating 1 (red) through 5 (green)
    pub const RATINGS: [Rgb; 5] = [
        (0xF9, 0x41, 0x44),
        (0xF8, 0x96, 0x1E),
        (0xF9, 0xC7, 0x4F),
        (0x90, 0xBE, 0x6D),
        (0x43, 0xAA, 0x8B),
    ];
}

fn fg((r, g, b): Rgb) -> Style {
    Style::new().truecolor(r, g, b)
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub subheader: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub dim: Style,
    pub figure: Style,
    ratings: [Style; 5],
}

impl Theme {
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            header: fg(palette::PRIMARY).bold(),
            subheader: fg(palette::SECONDARY),
            success: fg(palette::RATINGS[4]).bold(),
            error: fg(palette::HIGHLIGHT).bold(),
            warn: fg(palette::RATINGS[1]).bold(),
            info: fg(palette::ACCENT),
            dim: fg(palette::MUTED),
            figure: fg(palette::TEXT).bold(),
            ratings: palette::RATINGS.map(fg),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            subheader: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            figure: Style::new(),
            ratings: std::array::from_fn(|_| Style::new()),
        }
    }

    /// Style for a 1-5 performance rating; unstyled outside that range
    pub fn rating(&self, rating: i64) -> Style {
        usize::try_from(rating - 1)
            .ok()
            .and_then(|i| self.ratings.get(i))
            .cloned()
            .unwrap_or_else(Style::new)
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_rating_colors() {
        let theme = Theme::colored();
        assert_eq!(
            format!("{}", "1".style(theme.rating(1))),
            "\x1b[38;2;249;65;68m1\x1b[0m"
        );
        assert!(format!("{}", "5".style(theme.rating(5))).contains("38;2;67;170;139"));
        assert_eq!(format!("{}", "0".style(theme.rating(0))), "0");
        assert_eq!(format!("{}", "6".style(theme.rating(6))), "6");
    }

    #[test]
    fn test_plain_has_no_escapes() {
        let theme = Theme::plain();
        for r in 1..=5 {
            assert_eq!(format!("{}", "x".style(theme.rating(r))), "x");
        }
        assert_eq!(format!("{}", "x".style(theme.header.clone())), "x");
    }
}
