use std::time::Instant;

use cinerow_core::PageState;
use ratatui::{layout::Rect, style::Style, Frame};

use super::content_row::{ContentRowWidget, RowContext};
use super::hero::HeroWidget;
use super::splash::SplashWidget;
use crate::app::{App, HERO_HEIGHT, ROW_HEIGHT};

/// The landing view: hero and rows, or the loading / error screen
pub struct PageWidget;

impl PageWidget {
    /// Draw the page and rebuild the mouse hit map for this frame
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App, now: Instant) {
        app.hit_map.clear();
        let buf = frame.buffer_mut();
        buf.set_style(area, Style::default().bg(app.theme.bg0));

        match app.page.state() {
            PageState::Loading => {
                SplashWidget::render_loading(buf, area, app.spinner(), &app.theme);
                return;
            }
            PageState::Error(message) => {
                SplashWidget::render_error(buf, area, message, &app.theme);
                return;
            }
            PageState::Ready(_) => {}
        }

        let mut y = area.y;
        if let Some(featured) = app.page.featured() {
            let height = HERO_HEIGHT.min(area.height);
            HeroWidget::render(buf, Rect::new(area.x, y, area.width, height), featured, &app.theme);
            y += height + 1;
        }

        let focused_row = app.focused_row;
        let rows = app
            .page
            .visible_rows()
            .enumerate()
            .skip(app.row_scroll);
        for (index, row) in rows {
            if y >= area.bottom() {
                break;
            }
            let Some(view) = row.view(app.layout, now) else {
                continue;
            };
            let height = ROW_HEIGHT.min(area.bottom() - y);
            let ctx = RowContext {
                theme: &app.theme,
                posters: &app.posters,
                placeholder_url: &app.config.carousel.placeholder_image,
                focused: app.card_focus && index == focused_row,
            };
            ContentRowWidget::render(
                buf,
                Rect::new(area.x, y, area.width, height),
                &view,
                &ctx,
                &mut app.hit_map,
            );
            y += height;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use cinerow_core::model::{MediaItem, MediaItemId, PagePayload, Row, RowId};
    use cinerow_core::AppConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::app::HitTarget;
    use crate::event::PageLoadResult;
    use crate::theme::Theme;
    use crate::widgets::test_support::text;

    fn row(id: &str, title: &str, count: usize) -> Row {
        Row {
            id: RowId::new(id),
            title: title.to_string(),
            items: (0..count)
                .map(|i| MediaItem {
                    id: MediaItemId::new(format!("{}{}", id, i)),
                    title: format!("{} {}", title, i),
                    image_url: format!("https://img.example/{}{}.jpg", id, i),
                    genre: "Drama".to_string(),
                    rating: 4.0,
                    watch_progress: None,
                })
                .collect(),
        }
    }

    fn draw(app: &mut App, now: Instant) -> String {
        let mut terminal = Terminal::new(TestBackend::new(84, 40)).unwrap();
        terminal
            .draw(|frame| PageWidget::render(frame, frame.area(), app, now))
            .unwrap();
        text(terminal.backend().buffer())
    }

    fn ready_app(rows: Vec<Row>, now: Instant) -> App {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        let generation = app.begin_reload();
        app.resize(84, 40);
        let result = Ok(PagePayload { featured: None, rows });
        app.finish_load(PageLoadResult { generation, result }, now);
        app
    }

    #[test]
    fn test_loading_screen() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        app.begin_reload();
        assert!(draw(&mut app, Instant::now()).contains("Loading catalog"));
        assert!(app.hit_map.is_empty());
    }

    #[test]
    fn test_rows_render_after_entrance() {
        let now = Instant::now();
        let mut app = ready_app(vec![row("a", "Trending Now", 6), row("e", "Empty", 0)], now);

        // Before the row delay every card is hidden
        let early = draw(&mut app, now);
        assert!(early.contains("Trending Now"));
        assert!(!early.contains("Trending Now 0"));

        let later = now + Duration::from_secs(2);
        app.tick(later);
        let settled = draw(&mut app, later);
        assert!(settled.contains("Trending Now 0"));
        assert!(!settled.contains("Empty"));
        assert_eq!(
            app.hit_map.hit_test(4, 5),
            Some(&HitTarget::Card {
                row: RowId::new("a"),
                item: MediaItemId::new("a0"),
            })
        );
    }
}
