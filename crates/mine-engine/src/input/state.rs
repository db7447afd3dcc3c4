use std::collections::HashSet;

use glam::Vec2;

use super::types::{InputEvent, Key, KeyState};

/// Current input state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Unbounded cursor built from summed raw motion.
    ///
    /// Keeps moving while the OS cursor is locked in place, which is what
    /// mouse-look needs.
    pub virtual_cursor: Vec2,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Release events for keys held during a focus change never arrive.
                    self.keys_down.clear();
                }
            }

            InputEvent::Motion { dx, dy } => {
                self.virtual_cursor += Vec2::new(dx, dy);
            }

            InputEvent::Key { key, state } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(key);
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}
