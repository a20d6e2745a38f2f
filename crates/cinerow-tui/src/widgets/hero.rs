use cinerow_core::model::Featured;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::theme::Theme;

pub struct HeroWidget;

impl HeroWidget {
    /// Featured title banner with its play and info buttons
    pub fn render(buf: &mut Buffer, area: Rect, featured: &Featured, theme: &Theme) {
        let area = area.intersection(buf.area);
        if area.height < 3 {
            return;
        }

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.bg2))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(1), // Metadata
                Constraint::Min(0),    // Description
                Constraint::Length(1), // Buttons
            ])
            .split(inner.inner(Margin::new(2, 0)));

        Paragraph::new(Line::from(Span::styled(
            featured.title.as_str(),
            Style::default()
                .fg(theme.fg0)
                .add_modifier(Modifier::BOLD),
        )))
        .render(chunks[0], buf);

        Paragraph::new(Line::from(vec![
            Span::styled(featured.genre.as_str(), Style::default().fg(theme.fg1)),
            Span::styled(" · ", Style::default().fg(theme.grey0)),
            Span::styled(featured.year.to_string(), Style::default().fg(theme.fg1)),
            Span::styled(" · ", Style::default().fg(theme.grey0)),
            Span::styled(
                format!("★ {:.1}", featured.rating),
                Style::default().fg(theme.rating),
            ),
        ]))
        .render(chunks[1], buf);

        Paragraph::new(featured.description.as_str())
            .style(Style::default().fg(theme.grey1))
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        Paragraph::new(Line::from(vec![
            Span::styled(
                " ▶ Play ",
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.fg0)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                " ⓘ More Info ",
                Style::default().fg(theme.fg0).bg(theme.bg2),
            ),
        ]))
        .render(chunks[3], buf);
    }
}
