use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use folio_core::scroll::SectionKind;

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    // Tab bar (taps)
    NextTab,
    PrevTab,
    SelectTab(usize),
    // Content pager (swipes)
    SwipeNext,
    SwipePrev,
    BeginDrag(u16),
    DragTo(u16),
    EndDrag,
    // Outer scroll
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    HighlightsLeft,
    HighlightsRight,
    Refresh,
    ToggleHelp,
    ExitMode,
    None,
}

/// crossterm reports Shift+Tab as BackTab and adds SHIFT to shifted
/// punctuation; fold both into the form `parse_key_binding` produces
fn normalize(key: KeyEvent) -> KeyBinding {
    match key.code {
        KeyCode::BackTab => KeyBinding::shift(KeyCode::Tab),
        KeyCode::Char(c) if !c.is_ascii_alphabetic() => {
            KeyBinding::new(key.code, key.modifiers.difference(KeyModifiers::SHIFT))
        }
        _ => KeyBinding::new(key.code, key.modifiers),
    }
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.mode == Mode::Help {
        // Any key exits help
        return Action::ExitMode;
    }

    let binding = normalize(key);

    if let Some(sequence) = keymap.g_sequence(&binding) {
        return if app.pending_key == Some('g') {
            sequence
        } else {
            Action::PendingG
        };
    }

    if let Some(action) = keymap.get(&binding) {
        return action;
    }

    // Digits select a tab directly
    if let (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) = (binding.code, binding.modifiers) {
        return Action::SelectTab(c as usize - '1' as usize);
    }

    Action::None
}

/// Handle a mouse event over the profile screen
pub fn handle_mouse_event(mouse: MouseEvent, app: &App) -> Action {
    if app.mode == Mode::Help {
        return match mouse.kind {
            MouseEventKind::Down(_) => Action::ExitMode,
            _ => Action::None,
        };
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => Action::ScrollDown,
        MouseEventKind::ScrollUp => Action::ScrollUp,
        MouseEventKind::Down(MouseButton::Left) => match app.hit_test(mouse.column, mouse.row) {
            Some((SectionKind::TabBar, _)) => app
                .tab_at_column(mouse.column)
                .map(Action::SelectTab)
                .unwrap_or(Action::None),
            Some((SectionKind::Content, _)) => Action::BeginDrag(mouse.column),
            _ => Action::None,
        },
        MouseEventKind::Drag(MouseButton::Left) if app.is_dragging() => {
            Action::DragTo(mouse.column)
        }
        MouseEventKind::Up(MouseButton::Left) if app.is_dragging() => Action::EndDrag,
        _ => Action::None,
    }
}
