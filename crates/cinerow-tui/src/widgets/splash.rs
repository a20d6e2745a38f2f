use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::Theme;

/// Full-area screens shown instead of the rows
pub struct SplashWidget;

impl SplashWidget {
    pub fn render_loading(buf: &mut Buffer, area: Rect, spinner: &str, theme: &Theme) {
        let lines = vec![Line::from(vec![
            Span::styled(spinner, Style::default().fg(theme.accent)),
            Span::styled(" Loading catalog...", Style::default().fg(theme.fg1)),
        ])];
        render_centered(buf, area, lines, theme);
    }

    pub fn render_error(buf: &mut Buffer, area: Rect, message: &str, theme: &Theme) {
        let lines = vec![
            Line::from(Span::styled(
                "Something went wrong",
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(theme.fg1))),
            Line::from(""),
            Line::from(vec![
                Span::styled("r", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
                Span::styled(" to retry  ", Style::default().fg(theme.grey1)),
                Span::styled("q", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
                Span::styled(" to quit", Style::default().fg(theme.grey1)),
            ]),
        ];
        render_centered(buf, area, lines, theme);
    }
}

fn render_centered(buf: &mut Buffer, area: Rect, lines: Vec<Line<'_>>, theme: &Theme) {
    let area = area.intersection(buf.area);
    if area.is_empty() {
        return;
    }
    let height = (lines.len() as u16).min(area.height);
    let y = area.y + (area.height - height) / 2;
    buf.set_style(area, Style::default().bg(theme.bg0));
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(Rect::new(area.x, y, area.width, area.bottom() - y), buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::test_support::text;

    #[test]
    fn test_loading_and_error_screens() {
        let area = Rect::new(0, 0, 50, 10);
        let mut buf = Buffer::empty(area);
        SplashWidget::render_loading(&mut buf, area, "⠋", &Theme::default());
        assert!(text(&buf).contains("⠋ Loading catalog..."));

        let mut buf = Buffer::empty(area);
        SplashWidget::render_error(
            &mut buf,
            area,
            "Catalog unavailable: offline",
            &Theme::default(),
        );
        let rendered = text(&buf);
        assert!(rendered.contains("Something went wrong"));
        assert!(rendered.contains("Catalog unavailable: offline"));
        assert!(rendered.contains("r to retry"));
    }
}
