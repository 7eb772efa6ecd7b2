/// Per-frame state of one digital input source.
///
/// `changed` is relative to the state at the start of the frame, so a press
/// and release that both land inside one frame leave `changed == false`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub is_down: bool,
    pub changed: bool,
    was_down: bool,
}

impl ButtonState {
    /// Latches the current state as the frame baseline and clears the edge.
    #[inline]
    pub fn begin_frame(&mut self) {
        self.was_down = self.is_down;
        self.changed = false;
    }

    #[inline]
    pub fn set(&mut self, down: bool) {
        self.is_down = down;
        self.changed = self.is_down != self.was_down;
    }

    #[inline]
    pub fn just_pressed(&self) -> bool {
        self.is_down && self.changed
    }

    #[inline]
    pub fn just_released(&self) -> bool {
        !self.is_down && self.changed
    }

    /// Down now, whether or not it went down this frame.
    #[inline]
    pub fn held(&self) -> bool {
        self.is_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_an_edge_for_one_frame() {
        let mut b = ButtonState::default();
        b.begin_frame();
        b.set(true);
        assert!(b.just_pressed());
        assert!(b.held());

        b.begin_frame();
        b.set(true);
        assert!(b.is_down);
        assert!(!b.changed);
        assert!(b.held());
    }

    #[test]
    fn press_and_release_within_a_frame_cancel() {
        let mut b = ButtonState::default();
        b.begin_frame();
        b.set(true);
        b.set(false);
        assert!(!b.is_down);
        assert!(!b.changed);
    }

    #[test]
    fn release_is_reported() {
        let mut b = ButtonState::default();
        b.set(true);
        b.begin_frame();
        b.set(false);
        assert!(b.just_released());
        assert!(!b.held());
    }
}
