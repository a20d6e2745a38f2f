use cinerow_core::config::KeymapConfig;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key binding overlay
    pub fn render_help(frame: &mut Frame, keymap: &KeymapConfig, theme: &Theme) {
        let entries: [(&str, String); 13] = [
            ("Previous / next card", format!("{} / {}", keymap.card_left, keymap.card_right)),
            ("Row up / down", format!("{} / {}", keymap.row_up, keymap.row_down)),
            ("Scroll row", format!("{} / {}", keymap.scroll_left, keymap.scroll_right)),
            ("First / last row", format!("{} / {}", keymap.first_row, keymap.last_row)),
            ("Play focused card", keymap.select.clone()),
            ("Reload catalog", keymap.reload.clone()),
            ("Refresh rows in place", keymap.refresh.clone()),
            ("Pointer / touch layout", keymap.toggle_layout.clone()),
            ("Help", keymap.help.clone()),
            ("Quit", keymap.quit.clone()),
            ("Hover card", "mouse move".to_string()),
            ("Play card", "click".to_string()),
            ("Scroll row", "wheel or ‹ ›".to_string()),
        ];

        let area = frame.area();
        let popup_width = 52u16.min(area.width.saturating_sub(4));
        let popup_height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let key_width = usize::from(inner.width / 3);
        let mut lines: Vec<Line> = entries
            .iter()
            .map(|(label, keys)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:<width$}", truncate_str(keys, key_width), width = key_width),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*label, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                "press any key to close",
                Style::default().fg(theme.grey1),
            ))
            .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::widgets::test_support::text;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        assert_eq!(centered_rect(50, 10, area), Rect::new(25, 20, 50, 10));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("<S-Right>", 20), "<S-Right>");
        assert_eq!(truncate_str("abcdefghij", 6), "abc...");
    }

    #[test]
    fn test_help_lists_configured_keys() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut keymap = KeymapConfig::default();
        keymap.reload = "<F5>".to_string();
        terminal
            .draw(|frame| PopupWidget::render_help(frame, &keymap, &Theme::default()))
            .unwrap();
        let rendered = text(terminal.backend().buffer());
        assert!(rendered.contains("<F5>"));
        assert!(rendered.contains("Reload catalog"));
        assert!(rendered.contains("press any key to close"));
    }
}
