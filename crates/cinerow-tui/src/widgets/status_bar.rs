use cinerow_core::PageState;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let mode_str = match app.mode {
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
        };

        let page_str = match app.page.state() {
            PageState::Loading => format!("{} Loading", app.spinner()),
            PageState::Error(_) => "Error".to_string(),
            PageState::Ready(_) => {
                let count = app.page.visible_rows().count();
                if count == 0 {
                    "No rows".to_string()
                } else {
                    format!("Row {}/{}", app.focused_row + 1, count)
                }
            }
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(" {} | {:?} | {}", mode_str, app.layout, page_str)
        };

        let help_hint = " q:quit h/l:cards j/k:rows H/L:scroll ⏎:play ?:help ";
        let padding_len = usize::from(area.width)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cinerow_core::AppConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::theme::Theme;
    use crate::widgets::test_support::line;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal
            .draw(|frame| StatusBarWidget::render(frame, frame.area(), app))
            .unwrap();
        line(terminal.backend().buffer(), 0)
    }

    #[test]
    fn test_status_message_takes_precedence() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        app.begin_reload();
        assert!(draw(&app).starts_with(" NORMAL | Pointer |"));

        app.set_status("Now playing: Trending Film 3");
        assert!(draw(&app).starts_with(" Now playing: Trending Film 3"));
    }
}
