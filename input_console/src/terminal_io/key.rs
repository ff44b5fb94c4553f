// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A decoded key event. A key is either a printable character ([`Key::Char`]) or a named
/// key that carries no character.
///
/// [`Key::Space`] is kept apart from [`Key::Char`] since the terminal driver reports it
/// as a named key. Editing-wise it is the same as `Key::Char(' ')`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Backspace,
    /// The alternate backspace (`Ctrl+H`).
    Backspace2,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    CtrlC,
    /// Any other named key (eg: `Tab`, `F1`, `Home`). It doesn't change the input.
    Unmapped,
}

/// The "no character" value. It is never appended to the input.
pub const NULL_CHAR: char = '\0';

impl Key {
    /// Decode a crossterm [`Event`]. Returns [`None`] for everything that isn't a key
    /// press (or repeat): key releases, resize, mouse, focus and paste events.
    #[must_use]
    pub fn from_crossterm_event(event: Event) -> Option<Key> {
        match event {
            Event::Key(
                key_event @ KeyEvent {
                    kind: KeyEventKind::Press | KeyEventKind::Repeat,
                    ..
                },
            ) => Some(Key::from(key_event)),
            _ => None,
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(key_event: KeyEvent) -> Self {
        let is_control = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Up => Key::ArrowUp,
            KeyCode::Down => Key::ArrowDown,
            KeyCode::Left => Key::ArrowLeft,
            KeyCode::Right => Key::ArrowRight,
            KeyCode::Char('c' | 'C') if is_control => Key::CtrlC,
            KeyCode::Char('h' | 'H') if is_control => Key::Backspace2,
            KeyCode::Char(' ') if !is_control => Key::Space,
            KeyCode::Char(ch) if !is_control => Key::Char(ch),
            _ => Key::Unmapped,
        }
    }
}
