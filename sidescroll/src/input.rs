//! Key edge tracking and the per-frame held-key snapshot.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The four directional keys the core consumes. Up doubles as jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];

    /// Map one of `U`, `D`, `L`, `R` (either case) to its key.
    pub fn from_letter(letter: char) -> Option<Key> {
        match letter.to_ascii_uppercase() {
            'U' => Some(Key::Up),
            'D' => Some(Key::Down),
            'L' => Some(Key::Left),
            'R' => Some(Key::Right),
            _ => None,
        }
    }
}

/// Press or release edge reported by the host's input device layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Held-key flags for a single frame. This is everything the simulation reads from input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputFrame {
    pub const NONE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// -1, 0 or 1. Opposing keys cancel out.
    pub fn horizontal_axis(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }

    /// -1, 0 or 1. Opposing keys cancel out.
    pub fn vertical_axis(&self) -> f32 {
        (self.up as i8 - self.down as i8) as f32
    }

    /// Parse a compact key string such as `"UR"` (up + right). Unknown characters are ignored.
    pub fn from_letters(letters: &str) -> Self {
        let mut frame = Self::NONE;
        for key in letters.chars().filter_map(Key::from_letter) {
            frame.set(key, true);
        }
        frame
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Left => self.left,
            Key::Right => self.right,
        }
    }

    pub fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up = held,
            Key::Down => self.down = held,
            Key::Left => self.left = held,
            Key::Right => self.right = held,
        }
    }
}

/// Tracks key state across frames from raw press/release events.
pub struct InputState {
    keys_down: HashSet<Key>,
    keys_pressed: HashSet<Key>,
    keys_released: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_pressed: HashSet::new(),
            keys_released: HashSet::new(),
        }
    }

    /// Clear per-frame pressed/released flags.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// Handle a key edge from the host.
    pub fn handle_key(&mut self, key: Key, state: KeyState) {
        match state {
            KeyState::Pressed => {
                if !self.keys_down.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_down.insert(key);
            }
            KeyState::Released => {
                self.keys_down.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Returns true if the key is currently held down.
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key was pressed this frame.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the key was released this frame.
    pub fn is_key_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    /// Snapshot of the held flags for this frame.
    ///
    /// A key pressed and released again before the frame ends still counts as
    /// held for this frame, so a quick tap is never lost.
    pub fn frame(&self) -> InputFrame {
        let mut frame = InputFrame::NONE;
        for key in Key::ALL {
            frame.set(key, self.is_key_down(key) || self.is_key_pressed(key));
        }
        frame
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
