use cinerow_core::carousel::{Appearance, CardSlot, Direction, ImageSource, NavAffordance, RowView};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use super::media_card::MediaCardWidget;
use super::truncate_to_width;
use crate::app::{HitMap, HitTarget, ARROW_WIDTH, CARD_HEIGHT};
use crate::images::{dim, HalfBlockImage, PosterCache};
use crate::theme::Theme;

/// Rows a card rises through while entering
const ENTRANCE_LIFT: f64 = 2.0;
/// Brightness of a card at the start of its entrance
const ENTRANCE_BRIGHTNESS: f64 = 0.35;

/// Shared inputs for drawing one row
pub struct RowContext<'a> {
    pub theme: &'a Theme,
    pub posters: &'a PosterCache,
    pub placeholder_url: &'a str,
    /// Row holds keyboard focus
    pub focused: bool,
}

impl RowContext<'_> {
    fn poster(&self, image: ImageSource<'_>) -> Option<&HalfBlockImage> {
        match image {
            ImageSource::Poster(url) => self.posters.get(url),
            ImageSource::Placeholder => self.posters.get(self.placeholder_url),
        }
    }
}

pub struct ContentRowWidget;

impl ContentRowWidget {
    /// Draw a row: heading line, then the card strip between the arrow columns
    pub fn render(
        buf: &mut Buffer,
        area: Rect,
        view: &RowView<'_>,
        ctx: &RowContext<'_>,
        hit_map: &mut HitMap,
    ) {
        let area = area.intersection(buf.area);
        if area.height < 2 || area.width <= ARROW_WIDTH * 2 {
            return;
        }
        hit_map.push(area, HitTarget::Row(view.id.clone()));

        render_heading(buf, Rect::new(area.x, area.y, area.width, 1), view, ctx);

        let strip = Rect::new(
            area.x + ARROW_WIDTH,
            area.y + 1,
            area.width - ARROW_WIDTH * 2,
            CARD_HEIGHT.min(area.height - 1),
        );
        for slot in &view.cards {
            render_slot(buf, strip, view, slot, ctx, hit_map);
        }

        let left = Rect::new(area.x, strip.y, ARROW_WIDTH, strip.height);
        let right = Rect::new(strip.right(), strip.y, ARROW_WIDTH, strip.height);
        render_arrow(buf, left, view, Direction::Left, view.nav.left, ctx.theme, hit_map);
        render_arrow(buf, right, view, Direction::Right, view.nav.right, ctx.theme, hit_map);
    }
}

fn render_heading(buf: &mut Buffer, area: Rect, view: &RowView<'_>, ctx: &RowContext<'_>) {
    let theme = ctx.theme;
    let (marker, title_style) = if ctx.focused {
        (
            "▍",
            Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
        )
    } else {
        (" ", Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD))
    };
    buf.set_string(area.x, area.y, marker, Style::default().fg(theme.accent));
    let title = truncate_to_width(view.title, usize::from(area.width.saturating_sub(ARROW_WIDTH)));
    buf.set_string(area.x + ARROW_WIDTH, area.y, title, title_style);
}

/// Draw one card offscreen, then copy the part inside `strip`
fn render_slot(
    buf: &mut Buffer,
    strip: Rect,
    view: &RowView<'_>,
    slot: &CardSlot<'_>,
    ctx: &RowContext<'_>,
    hit_map: &mut HitMap,
) {
    if slot.appearance == Appearance::Hidden {
        return;
    }
    let weight = slot.appearance.weight();
    let brightness = ENTRANCE_BRIGHTNESS + (1.0 - ENTRANCE_BRIGHTNESS) * weight;
    let lift = ((1.0 - weight) * ENTRANCE_LIFT).round() as u16;

    let width = slot.width.round().max(1.0) as u16;
    let card_area = Rect::new(0, 0, width, strip.height);
    let mut card_buf = Buffer::empty(card_area);
    MediaCardWidget::render(
        &mut card_buf,
        card_area,
        &slot.card,
        ctx.poster(slot.card.image),
        ctx.theme,
    );

    let left = i32::from(strip.x) + slot.x.round() as i32;
    let x0 = left.max(i32::from(strip.x));
    let x1 = (left + i32::from(width)).min(i32::from(strip.right()));
    if x1 <= x0 {
        return;
    }

    for cy in 0..card_area.height {
        let y = strip.y + cy + lift;
        if y >= strip.bottom() {
            break;
        }
        for x in x0..x1 {
            let cx = (x - left) as u16;
            let mut cell = card_buf[(cx, cy)].clone();
            if brightness < 1.0 {
                cell.fg = dim(cell.fg, brightness);
                cell.bg = dim(cell.bg, brightness);
            }
            buf[(x as u16, y)] = cell;
        }
    }

    hit_map.push(
        Rect::new(x0 as u16, strip.y, (x1 - x0) as u16, strip.height),
        HitTarget::Card {
            row: view.id.clone(),
            item: slot.card.id.clone(),
        },
    );
}

fn render_arrow(
    buf: &mut Buffer,
    area: Rect,
    view: &RowView<'_>,
    direction: Direction,
    nav: NavAffordance,
    theme: &Theme,
    hit_map: &mut HitMap,
) {
    if !nav.visible || area.is_empty() {
        return;
    }
    let style = if nav.enabled {
        Style::default()
            .fg(theme.fg0)
            .bg(theme.bg2)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.grey0).bg(theme.bg1)
    };
    buf.set_style(area, style);

    let glyph = match direction {
        Direction::Left => "‹",
        Direction::Right => "›",
    };
    let x = area.x + area.width / 2;
    buf.set_string(x, area.y + area.height / 2, glyph, style);

    hit_map.push(
        area,
        HitTarget::Arrow {
            row: view.id.clone(),
            direction,
        },
    );
}
