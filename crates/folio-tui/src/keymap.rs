//! Vim-style key notation mapped onto profile screen actions

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use folio_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Key code plus modifiers, as produced by `parse_key_binding`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Action bound to the `gg` sequence
    double_g: Option<Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let configured = [
            (&config.quit, Action::Quit),
            (&config.next_tab, Action::NextTab),
            (&config.prev_tab, Action::PrevTab),
            (&config.swipe_next, Action::SwipeNext),
            (&config.swipe_prev, Action::SwipePrev),
            (&config.scroll_down, Action::ScrollDown),
            (&config.scroll_up, Action::ScrollUp),
            (&config.scroll_half_down, Action::ScrollHalfPageDown),
            (&config.scroll_half_up, Action::ScrollHalfPageUp),
            (&config.scroll_page_down, Action::ScrollPageDown),
            (&config.scroll_page_up, Action::ScrollPageUp),
            (&config.jump_to_top, Action::JumpToTop),
            (&config.jump_to_bottom, Action::JumpToBottom),
            (&config.highlights_left, Action::HighlightsLeft),
            (&config.highlights_right, Action::HighlightsRight),
            (&config.refresh, Action::Refresh),
            (&config.help, Action::ToggleHelp),
        ];

        let mut keymap = Self {
            bindings: HashMap::new(),
            double_g: None,
        };
        for (notation, action) in configured {
            keymap.bind(notation, action);
        }

        // Fixed keys: Ctrl+C always quits, Esc closes overlays, arrows and
        // Home/End work unless the config took them
        keymap
            .bindings
            .insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        keymap
            .bindings
            .insert(KeyBinding::simple(KeyCode::Esc), Action::ExitMode);
        for (code, action) in [
            (KeyCode::Left, Action::SwipePrev),
            (KeyCode::Right, Action::SwipeNext),
            (KeyCode::Up, Action::ScrollUp),
            (KeyCode::Down, Action::ScrollDown),
            (KeyCode::Home, Action::JumpToTop),
            (KeyCode::End, Action::JumpToBottom),
        ] {
            keymap
                .bindings
                .entry(KeyBinding::simple(code))
                .or_insert(action);
        }

        keymap
    }

    /// First binding of a key wins
    fn bind(&mut self, notation: &str, action: Action) {
        if notation == "gg" {
            self.double_g = Some(action);
            return;
        }
        let Some(binding) = parse_key_binding(notation) else {
            warn!(notation, ?action, "Invalid key binding, ignoring");
            return;
        };
        match self.bindings.entry(binding) {
            Entry::Occupied(existing) => warn!(
                notation,
                existing = ?existing.get(),
                ?action,
                "Key already bound, ignoring"
            ),
            Entry::Vacant(slot) => {
                slot.insert(action);
            }
        }
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<Action> {
        self.bindings.get(binding).copied()
    }

    /// The `gg` action, when `binding` is a bare `g` and `gg` is bound
    pub fn g_sequence(&self, binding: &KeyBinding) -> Option<Action> {
        if *binding == KeyBinding::simple(KeyCode::Char('g')) {
            self.double_g
        } else {
            None
        }
    }
}

/// Parse key notation: a single character (`j`, `G`, `?`) or a bracketed
/// key with optional stacked modifiers (`<C-d>`, `<S-Tab>`, `<C-S-x>`,
/// `<PageDown>`). Uppercase letters carry Shift.
pub fn parse_key_binding(notation: &str) -> Option<KeyBinding> {
    let notation = notation.trim();
    let Some(inner) = notation
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
    else {
        let mut chars = notation.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        return Some(if c.is_ascii_uppercase() {
            KeyBinding::shift(KeyCode::Char(c))
        } else {
            KeyBinding::simple(KeyCode::Char(c))
        });
    };

    let mut modifiers = KeyModifiers::NONE;
    let mut key = inner;
    while let Some((prefix, rest)) = key.split_once('-') {
        let modifier = match prefix {
            "C" | "c" => KeyModifiers::CONTROL,
            "S" | "s" => KeyModifiers::SHIFT,
            "A" | "a" | "M" | "m" => KeyModifiers::ALT,
            _ => break,
        };
        if rest.is_empty() {
            break;
        }
        modifiers |= modifier;
        key = rest;
    }

    Some(KeyBinding::new(key_code(key)?, modifiers))
}

fn key_code(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c.to_ascii_lowercase()));
    }
    let code = match name.to_ascii_lowercase().as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "bs" | "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        other => {
            let n: u8 = other.strip_prefix('f')?.parse().ok()?;
            return (1..=12).contains(&n).then_some(KeyCode::F(n));
        }
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_notation() {
        let cases = [
            ("j", KeyBinding::simple(KeyCode::Char('j'))),
            ("?", KeyBinding::simple(KeyCode::Char('?'))),
            ("<", KeyBinding::simple(KeyCode::Char('<'))),
            ("G", KeyBinding::shift(KeyCode::Char('G'))),
            ("<C-d>", KeyBinding::ctrl(KeyCode::Char('d'))),
            ("<C-D>", KeyBinding::ctrl(KeyCode::Char('d'))),
            ("<S-Tab>", KeyBinding::shift(KeyCode::Tab)),
            ("<Tab>", KeyBinding::simple(KeyCode::Tab)),
            ("<CR>", KeyBinding::simple(KeyCode::Enter)),
            ("<PageDown>", KeyBinding::simple(KeyCode::PageDown)),
            ("<F5>", KeyBinding::simple(KeyCode::F(5))),
            ("<C-->", KeyBinding::ctrl(KeyCode::Char('-'))),
            (
                "<C-S-x>",
                KeyBinding::new(
                    KeyCode::Char('x'),
                    KeyModifiers::CONTROL | KeyModifiers::SHIFT,
                ),
            ),
        ];
        for (notation, expected) in cases {
            assert_eq!(parse_key_binding(notation), Some(expected), "{notation}");
        }
    }

    #[test]
    fn test_reject_unknown_notation() {
        for notation in ["", "jk", "<>", "<Nope>", "<F13>", "<X-j>"] {
            assert_eq!(parse_key_binding(notation), None, "{notation}");
        }
    }

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::default();
        let expected = [
            (KeyBinding::simple(KeyCode::Char('q')), Action::Quit),
            (KeyBinding::simple(KeyCode::Char('j')), Action::ScrollDown),
            (KeyBinding::shift(KeyCode::Tab), Action::PrevTab),
            (KeyBinding::simple(KeyCode::Char('<')), Action::HighlightsLeft),
            (KeyBinding::ctrl(KeyCode::Char('d')), Action::ScrollHalfPageDown),
            (KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit),
            (KeyBinding::simple(KeyCode::Right), Action::SwipeNext),
        ];
        for (binding, action) in expected {
            assert_eq!(keymap.get(&binding), Some(action), "{binding:?}");
        }

        let g = KeyBinding::simple(KeyCode::Char('g'));
        assert_eq!(keymap.g_sequence(&g), Some(Action::JumpToTop));
        assert_eq!(keymap.g_sequence(&KeyBinding::shift(KeyCode::Char('G'))), None);
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let keymap = Keymap::from_config(&KeymapConfig {
            refresh: "j".to_string(),
            ..KeymapConfig::default()
        });
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('j'))),
            Some(Action::ScrollDown)
        );
        assert!(!keymap.bindings.values().any(|a| *a == Action::Refresh));
    }

    #[test]
    fn test_invalid_binding_is_skipped() {
        let keymap = Keymap::from_config(&KeymapConfig {
            help: "<Nope>".to_string(),
            ..KeymapConfig::default()
        });
        assert!(!keymap.bindings.values().any(|a| *a == Action::ToggleHelp));
    }

    #[test]
    fn test_configured_arrow_wins_over_fixed() {
        let keymap = Keymap::from_config(&KeymapConfig {
            refresh: "<Up>".to_string(),
            ..KeymapConfig::default()
        });
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Up)),
            Some(Action::Refresh)
        );
    }
}
