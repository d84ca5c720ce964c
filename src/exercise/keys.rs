//! Keyboard row classification
//!
//! Maps browser-style numeric key codes onto the three letter rows of a
//! QWERTY keyboard, and translates crossterm key events into those codes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};
use serde::{Deserialize, Serialize};

/// Q W E R T Y U I O P [
const TOP_ROW: [u32; 11] = [81, 87, 69, 82, 84, 89, 85, 73, 79, 80, 219];
/// A S D F G H J K L ; '
const MIDDLE_ROW: [u32; 11] = [65, 83, 68, 70, 71, 72, 74, 75, 76, 186, 222];
/// Z X C V B N M , .
const BOTTOM_ROW: [u32; 9] = [90, 88, 67, 86, 66, 78, 77, 188, 190];

/// Logical keyboard row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyRow {
    /// QWERTY row
    Top,
    /// Home (ASDF) row
    Middle,
    /// ZXCV row
    Bottom,
}

impl KeyRow {
    /// All rows in cue order
    pub const ALL: [KeyRow; 3] = [KeyRow::Top, KeyRow::Middle, KeyRow::Bottom];

    /// Index of the cue bound to this row
    pub fn index(self) -> usize {
        match self {
            KeyRow::Top => 0,
            KeyRow::Middle => 1,
            KeyRow::Bottom => 2,
        }
    }

    /// Key codes belonging to this row
    pub fn key_codes(self) -> &'static [u32] {
        match self {
            KeyRow::Top => &TOP_ROW,
            KeyRow::Middle => &MIDDLE_ROW,
            KeyRow::Bottom => &BOTTOM_ROW,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KeyRow::Top => "Top row",
            KeyRow::Middle => "Home row",
            KeyRow::Bottom => "Bottom row",
        }
    }
}

/// Classify a key code into its keyboard row, `None` for anything unmapped
pub fn classify(key_code: u32) -> Option<KeyRow> {
    KeyRow::ALL
        .into_iter()
        .find(|row| row.key_codes().contains(&key_code))
}

/// Translate a terminal key event into a browser-style key code.
///
/// Returns 0 for keys without a code; 0 never classifies into a row.
pub fn key_code_of(event: &KeyEvent) -> u32 {
    match event.code {
        KeyCode::Char(c) => char_key_code(c),
        KeyCode::Enter => 13,
        KeyCode::Tab | KeyCode::BackTab => 9,
        KeyCode::Backspace => 8,
        KeyCode::Esc => 27,
        KeyCode::Left => 37,
        KeyCode::Up => 38,
        KeyCode::Right => 39,
        KeyCode::Down => 40,
        KeyCode::Modifier(modifier) => modifier_key_code(modifier),
        _ => 0,
    }
}

/// Whether the event is a modifier key or is chorded with one.
///
/// Shift alone does not count, it is how upper-case letters arrive.
pub fn is_modifier_pressed(event: &KeyEvent) -> bool {
    matches!(event.code, KeyCode::Modifier(_))
        || event.modifiers.intersects(
            KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER | KeyModifiers::META,
        )
}

fn char_key_code(c: char) -> u32 {
    match c {
        'a'..='z' => c.to_ascii_uppercase() as u32,
        'A'..='Z' | '0'..='9' => c as u32,
        ' ' => 32,
        ';' | ':' => 186,
        '=' | '+' => 187,
        ',' | '<' => 188,
        '-' | '_' => 189,
        '.' | '>' => 190,
        '/' | '?' => 191,
        '`' | '~' => 192,
        '[' | '{' => 219,
        '\\' | '|' => 220,
        ']' | '}' => 221,
        '\'' | '"' => 222,
        _ => 0,
    }
}

fn modifier_key_code(modifier: ModifierKeyCode) -> u32 {
    match modifier {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => 16,
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => 17,
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => 18,
        ModifierKeyCode::LeftSuper
        | ModifierKeyCode::RightSuper
        | ModifierKeyCode::LeftMeta
        | ModifierKeyCode::RightMeta => 91,
        _ => 0,
    }
}
