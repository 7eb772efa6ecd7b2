use super::types::{KeyCode, RawKeyboard, KEY_COUNT};

/// Keyboard state for the current and previous frame.
#[derive(Debug, Clone)]
pub struct Keyboard {
    current: [bool; KEY_COUNT],
    previous: [bool; KEY_COUNT],
}

impl Default for Keyboard {
    fn default() -> Self {
        Self {
            current: [false; KEY_COUNT],
            previous: [false; KEY_COUNT],
        }
    }
}

impl Keyboard {
    /// Shifts current into previous and copies the tracked range of `raw`.
    pub fn sample(&mut self, raw: &RawKeyboard) {
        self.previous = self.current;
        self.current.copy_from_slice(&raw[..KEY_COUNT]);
    }

    #[inline]
    fn get(&self, code: KeyCode) -> (bool, bool) {
        match code.index() {
            Some(i) => (self.current[i], self.previous[i]),
            None => (false, false),
        }
    }

    pub fn is_down(&self, code: KeyCode) -> bool {
        self.get(code).0
    }

    /// `is_down` differs from the previous frame.
    pub fn changed(&self, code: KeyCode) -> bool {
        let (cur, prev) = self.get(code);
        cur != prev
    }

    pub fn just_pressed(&self, code: KeyCode) -> bool {
        let (cur, prev) = self.get(code);
        cur && !prev
    }

    pub fn just_released(&self, code: KeyCode) -> bool {
        let (cur, prev) = self.get(code);
        !cur && prev
    }

    /// Same as [`Keyboard::is_down`]; the edge is ignored.
    pub fn held(&self, code: KeyCode) -> bool {
        self.get(code).0
    }
}
