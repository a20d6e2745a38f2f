use cinerow_core::carousel::{CardOverlay, CardView, ImageSource, ProgressIndicator};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use super::{center_offset, truncate_to_width};
use crate::app::POSTER_ROWS;
use crate::images::HalfBlockImage;
use crate::theme::Theme;

pub struct MediaCardWidget;

impl MediaCardWidget {
    /// Draw a card: poster (or placeholder) on top, title on the last line,
    /// and the metadata overlay over the poster while expanded.
    pub fn render(
        buf: &mut Buffer,
        area: Rect,
        card: &CardView<'_>,
        poster: Option<&HalfBlockImage>,
        theme: &Theme,
    ) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }

        let poster_height = area.height.saturating_sub(1).min(POSTER_ROWS);
        let poster_area = Rect::new(area.x, area.y, area.width, poster_height);

        match poster {
            Some(image) => image.render(buf, poster_area, 1.0),
            None => render_placeholder(buf, poster_area, card.image, theme),
        }

        if let Some(overlay) = &card.overlay {
            render_overlay(buf, poster_area, overlay, theme);
        }

        if area.height > poster_height {
            let title_y = area.y + poster_height;
            render_title(buf, Rect::new(area.x, title_y, area.width, 1), card, theme);
        }
    }
}

fn render_placeholder(buf: &mut Buffer, area: Rect, image: ImageSource<'_>, theme: &Theme) {
    if area.is_empty() {
        return;
    }
    buf.set_style(area, Style::default().bg(theme.placeholder));

    let label = match image {
        ImageSource::Placeholder => "No Image",
        ImageSource::Poster(_) => "···",
    };
    let label = truncate_to_width(label, usize::from(area.width));
    let x = area.x + center_offset(area.width, label.width());
    let y = area.y + area.height / 2;
    buf.set_string(
        x,
        y,
        label,
        Style::default().fg(theme.grey1).bg(theme.placeholder),
    );
}

/// Overlay rows from the bottom of the poster up:
/// progress bar, progress label, play button, rating and genre.
fn render_overlay(buf: &mut Buffer, area: Rect, overlay: &CardOverlay<'_>, theme: &Theme) {
    if area.is_empty() {
        return;
    }
    let width = usize::from(area.width);
    let band = Style::default().bg(theme.bg0);
    let mut y = area.bottom();

    let mut next_row = |buf: &mut Buffer| -> Option<u16> {
        if y <= area.y {
            return None;
        }
        y -= 1;
        buf.set_style(Rect::new(area.x, y, area.width, 1), band);
        Some(y)
    };

    if let Some(progress) = overlay.progress {
        if let Some(row) = next_row(buf) {
            render_progress_bar(buf, Rect::new(area.x, row, area.width, 1), progress, theme);
        }
        if let Some(row) = next_row(buf) {
            let label = truncate_to_width(&progress.label(), width.saturating_sub(1));
            buf.set_string(area.x + 1, row, label, band.fg(theme.fg1));
        }
    }

    if overlay.play {
        if let Some(row) = next_row(buf) {
            let button = truncate_to_width(" ▶ Play ", width.saturating_sub(1));
            buf.set_string(
                area.x + 1,
                row,
                button,
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.fg0)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }

    if let Some(row) = next_row(buf) {
        let rating = format!("★ {}", overlay.rating);
        let (x, _) = buf.set_stringn(
            area.x + 1,
            row,
            &rating,
            width.saturating_sub(1),
            band.fg(theme.rating),
        );
        let used = rating.width() + 1;
        if width > used + 3 {
            let genre = truncate_to_width(overlay.genre, width - used - 3);
            buf.set_string(x, row, format!(" · {}", genre), band.fg(theme.fg1));
        }
    }
}

fn render_progress_bar(buf: &mut Buffer, area: Rect, progress: ProgressIndicator, theme: &Theme) {
    let filled = (progress.fraction() * f64::from(area.width)).round() as u16;
    for dx in 0..area.width {
        let color = if dx < filled {
            theme.progress
        } else {
            theme.progress_track
        };
        buf[(area.x + dx, area.y)]
            .set_symbol("▁")
            .set_fg(color)
            .set_bg(theme.bg0);
    }
}

fn render_title(buf: &mut Buffer, area: Rect, card: &CardView<'_>, theme: &Theme) {
    let style = if card.focused {
        Style::default()
            .fg(theme.bg0)
            .bg(theme.focus)
            .add_modifier(Modifier::BOLD)
    } else if card.expanded {
        Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg1)
    };
    buf.set_style(area, style);
    let title = truncate_to_width(card.title, usize::from(area.width));
    buf.set_string(area.x, area.y, title, style);
}
