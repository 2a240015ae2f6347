//! Keyboard input mapping
//!
//! Terminal key repeat already produces a stream of presses for held keys,
//! so every press maps straight to one action.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub pause: Vec<KeyCode>,
    pub reset: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let key = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "esc" | "escape" => KeyCode::Esc,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Parse a list of key strings into KeyCodes, skipping names we don't know
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let parsed = Self::parse_key(s);
                if parsed.is_none() {
                    tracing::warn!("Unknown key name in settings: {:?}", s);
                }
                parsed
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            rotate: Self::parse_keys(&settings.keys.rotate),
            pause: Self::parse_keys(&settings.keys.pause),
            reset: Self::parse_keys(&settings.keys.reset),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Turns key presses into game actions
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Map a key press to an action. Unbound keys yield None.
    pub fn key_down(&self, key: KeyEvent) -> Option<Action> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        let code = normalize_key(key.code);
        let bindings = &self.bindings;

        if bindings.move_left.contains(&code) {
            Some(Action::MoveLeft)
        } else if bindings.move_right.contains(&code) {
            Some(Action::MoveRight)
        } else if bindings.soft_drop.contains(&code) {
            Some(Action::SoftDrop)
        } else if bindings.rotate.contains(&code) {
            Some(Action::Rotate)
        } else if bindings.pause.contains(&code) {
            Some(Action::Pause)
        } else if bindings.reset.contains(&code) {
            Some(Action::Reset)
        } else if bindings.quit.contains(&code) {
            Some(Action::Quit)
        } else {
            None
        }
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let input = InputHandler::new();
        assert_eq!(input.key_down(press(KeyCode::Left)), Some(Action::MoveLeft));
        assert_eq!(input.key_down(press(KeyCode::Right)), Some(Action::MoveRight));
        assert_eq!(input.key_down(press(KeyCode::Down)), Some(Action::SoftDrop));
        assert_eq!(input.key_down(press(KeyCode::Up)), Some(Action::Rotate));
        assert_eq!(input.key_down(press(KeyCode::Char(' '))), Some(Action::Pause));
        assert_eq!(input.key_down(press(KeyCode::Char('R'))), Some(Action::Reset));
        assert_eq!(input.key_down(press(KeyCode::Esc)), Some(Action::Quit));
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let input = InputHandler::new();
        assert_eq!(input.key_down(press(KeyCode::Char('k'))), None);
        assert_eq!(input.key_down(press(KeyCode::F(5))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let input = InputHandler::new();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.key_down(key), Some(Action::Quit));
    }

    #[test]
    fn test_custom_bindings() {
        let mut settings = Settings::default();
        settings.keys.rotate = vec!["x".to_string(), "Up".to_string()];
        settings.keys.pause = vec!["P".to_string(), "nonsense".to_string()];
        let input = InputHandler::from_settings(&settings);

        assert_eq!(input.key_down(press(KeyCode::Char('x'))), Some(Action::Rotate));
        assert_eq!(input.key_down(press(KeyCode::Char('p'))), Some(Action::Pause));
        assert_eq!(input.key_down(press(KeyCode::Char(' '))), None);
    }
}
