use glam::DVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Char(char),
    Space,
    Escape,
}

/// Host input, with pointer positions already in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: DVec2, button: PointerButton },
    PointerMove { position: DVec2 },
    PointerUp { position: DVec2, button: PointerButton },
    Key(Key),
}

impl Key {
    /// Maps a typed character to a key, folding case.
    pub fn from_char(c: char) -> Self {
        match c {
            '0'..='9' => Key::Digit(c as u8 - b'0'),
            ' ' => Key::Space,
            other => Key::Char(other.to_ascii_lowercase()),
        }
    }
}
