mod content_row;
mod hero;
mod media_card;
mod page;
mod popup;
mod splash;
mod status_bar;

pub use content_row::{ContentRowWidget, RowContext};
pub use hero::HeroWidget;
pub use media_card::MediaCardWidget;
pub use page::PageWidget;
pub use popup::PopupWidget;
pub use splash::SplashWidget;
pub use status_bar::StatusBarWidget;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate to `max_width` terminal columns, ending with an ellipsis when cut
pub(crate) fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

/// Left offset that centers `content_width` columns in `available`
pub(crate) fn center_offset(available: u16, content_width: usize) -> u16 {
    available.saturating_sub(content_width.min(usize::from(u16::MAX)) as u16) / 2
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Short", 10), "Short");
        assert_eq!(truncate_to_width("Trending Film 12", 8), "Trendin…");
        assert_eq!(truncate_to_width("anything", 0), "");
        // Wide glyphs count two columns
        assert_eq!(truncate_to_width("映画映画映画", 5), "映画…");
    }

    #[test]
    fn test_center_offset() {
        assert_eq!(center_offset(20, 10), 5);
        assert_eq!(center_offset(5, 10), 0);
    }
}
