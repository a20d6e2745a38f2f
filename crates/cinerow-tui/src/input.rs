use cinerow_core::carousel::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, HitTarget, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    CardLeft,
    CardRight,
    RowUp,
    RowDown,
    ScrollLeft,
    ScrollRight,
    FirstRow,
    LastRow,
    PendingG, // First 'g' press, waiting for second 'g'
    Select,
    Reload,
    Refresh,
    ToggleLayout,
    Help,
    ExitMode,
    /// Pointer moved; `None` when it is over nothing interactive
    Hover(Option<HitTarget>),
    /// Left click on a target
    Click(HitTarget),
    /// Wheel over a row
    Wheel(HitTarget, Direction),
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.mode == Mode::Help {
        // Any key closes help
        return Action::ExitMode;
    }

    let binding = KeyBinding::new(key.code, key.modifiers);

    if keymap.is_g_prefix(&binding) {
        return if app.pending_key == Some('g') {
            keymap.get_pending_g_action().cloned().unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    if let Some(action) = keymap.get(&binding) {
        return action.clone();
    }

    // Terminals report shifted symbols ('?', '>') with SHIFT set
    match key.code {
        KeyCode::Char(c) if !c.is_ascii_alphabetic() && key.modifiers == KeyModifiers::SHIFT => {
            keymap
                .get(&KeyBinding::simple(key.code))
                .cloned()
                .unwrap_or(Action::None)
        }
        _ => Action::None,
    }
}

/// Handle a mouse event against the hit regions of the last frame
pub fn handle_mouse_event(mouse: MouseEvent, app: &App) -> Action {
    if app.mode == Mode::Help {
        return match mouse.kind {
            MouseEventKind::Down(_) => Action::ExitMode,
            _ => Action::None,
        };
    }

    let target = app.hit_map.hit_test(mouse.column, mouse.row).cloned();
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Action::Hover(target),
        MouseEventKind::Down(MouseButton::Left) => {
            target.map(Action::Click).unwrap_or(Action::None)
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => target
            .map(|t| Action::Wheel(t, Direction::Right))
            .unwrap_or(Action::None),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => target
            .map(|t| Action::Wheel(t, Direction::Left))
            .unwrap_or(Action::None),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cinerow_core::model::RowId;
    use cinerow_core::AppConfig;
    use ratatui::layout::Rect;

    use super::*;
    use crate::theme::Theme;

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()), Theme::default())
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_keys_map_through_keymap() {
        let app = app();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE), &app, &keymap),
            Action::RowDown
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('H'), KeyModifiers::SHIFT), &app, &keymap),
            Action::ScrollLeft
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('z'), KeyModifiers::NONE), &app, &keymap),
            Action::None
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('?'), KeyModifiers::SHIFT), &app, &keymap),
            Action::Help
        );
    }

    #[test]
    fn test_gg_sequence() {
        let mut app = app();
        let keymap = Keymap::default();
        let g = key(KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(g, &app, &keymap), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(g, &app, &keymap), Action::FirstRow);
    }

    #[test]
    fn test_help_mode_swallows_keys() {
        let mut app = app();
        app.mode = Mode::Help;
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE), &app, &keymap),
            Action::ExitMode
        );
    }

    #[test]
    fn test_mouse_uses_hit_map() {
        let mut app = app();
        let row = HitTarget::Row(RowId::new("trending"));
        app.hit_map.push(Rect::new(0, 10, 80, 12), row.clone());

        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown, 5, 12), &app),
            Action::Wheel(row.clone(), Direction::Right)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved, 5, 30), &app),
            Action::Hover(None)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 12), &app),
            Action::Click(row)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 2), &app),
            Action::None
        );
    }
}
