use ratatui::style::Color;
use tracing::warn;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Semantic colors
    pub accent: Color,
    pub rating: Color,
    pub progress: Color,
    pub progress_track: Color,
    pub focus: Color,
    pub placeholder: Color,
    pub error: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        cinema()
    }
}

/// Dark theme with a red accent, the default
pub fn cinema() -> Theme {
    Theme {
        bg0: Color::Rgb(0x14, 0x14, 0x14),
        bg1: Color::Rgb(0x1f, 0x1f, 0x1f),
        bg2: Color::Rgb(0x2f, 0x2f, 0x2f),
        fg0: Color::Rgb(0xf5, 0xf5, 0xf1),
        fg1: Color::Rgb(0xd2, 0xd2, 0xd2),
        grey0: Color::Rgb(0x6d, 0x6d, 0x6e),
        grey1: Color::Rgb(0xa3, 0xa3, 0xa3),
        accent: Color::Rgb(0xe5, 0x09, 0x14),
        rating: Color::Rgb(0xf5, 0xc5, 0x18),
        progress: Color::Rgb(0xe5, 0x09, 0x14),
        progress_track: Color::Rgb(0x4d, 0x4d, 0x4d),
        focus: Color::Rgb(0xff, 0xff, 0xff),
        placeholder: Color::Rgb(0x33, 0x33, 0x3a),
        error: Color::Rgb(0xff, 0x5f, 0x56),
        info: Color::Rgb(0x46, 0xd3, 0x69),
    }
}

/// Blue-tinted dark variant
pub fn midnight() -> Theme {
    Theme {
        bg0: Color::Rgb(0x0b, 0x10, 0x20),
        bg1: Color::Rgb(0x13, 0x1a, 0x2e),
        bg2: Color::Rgb(0x1f, 0x29, 0x44),
        fg0: Color::Rgb(0xe6, 0xea, 0xf5),
        fg1: Color::Rgb(0xc3, 0xca, 0xdd),
        grey0: Color::Rgb(0x5a, 0x65, 0x80),
        grey1: Color::Rgb(0x8c, 0x96, 0xb0),
        accent: Color::Rgb(0x3d, 0x8b, 0xfd),
        rating: Color::Rgb(0xff, 0xc8, 0x57),
        progress: Color::Rgb(0x3d, 0x8b, 0xfd),
        progress_track: Color::Rgb(0x2c, 0x36, 0x52),
        focus: Color::Rgb(0xff, 0xff, 0xff),
        placeholder: Color::Rgb(0x1c, 0x24, 0x3a),
        error: Color::Rgb(0xff, 0x6b, 0x6b),
        info: Color::Rgb(0x5e, 0xd3, 0xb4),
    }
}

/// Nord palette
/// https://www.nordtheme.com/
pub fn nord() -> Theme {
    Theme {
        bg0: Color::Rgb(0x2e, 0x34, 0x40), // nord0
        bg1: Color::Rgb(0x3b, 0x42, 0x52), // nord1
        bg2: Color::Rgb(0x43, 0x4c, 0x5e), // nord2
        fg0: Color::Rgb(0xec, 0xef, 0xf4), // nord6
        fg1: Color::Rgb(0xe5, 0xe9, 0xf0), // nord5
        grey0: Color::Rgb(0x4c, 0x56, 0x6a), // nord3
        grey1: Color::Rgb(0xd8, 0xde, 0xe9), // nord4
        accent: Color::Rgb(0x88, 0xc0, 0xd0), // nord8
        rating: Color::Rgb(0xeb, 0xcb, 0x8b), // nord13
        progress: Color::Rgb(0xbf, 0x61, 0x6a), // nord11
        progress_track: Color::Rgb(0x4c, 0x56, 0x6a),
        focus: Color::Rgb(0xec, 0xef, 0xf4),
        placeholder: Color::Rgb(0x3b, 0x42, 0x52),
        error: Color::Rgb(0xbf, 0x61, 0x6a),
        info: Color::Rgb(0xa3, 0xbe, 0x8c), // nord14
    }
}

/// Names accepted by `ui.theme`
pub fn available_themes() -> Vec<&'static str> {
    vec!["cinema", "midnight", "nord"]
}

/// Load a theme by name, falling back to `cinema`
pub fn load_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "cinema" => cinema(),
        "midnight" => midnight(),
        "nord" => nord(),
        other => {
            warn!("Unknown theme '{}', using cinema", other);
            cinema()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_theme_by_name() {
        assert_eq!(load_theme("Nord").bg0, nord().bg0);
        assert_eq!(load_theme("midnight").accent, midnight().accent);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        assert_eq!(load_theme("solarized").accent, cinema().accent);
        assert!(available_themes().contains(&"cinema"));
    }
}
