use super::button::ButtonState;
use super::types::{MouseButton, MOUSE_BUTTON_COUNT};

/// Mouse position (canvas pixels), wheel and buttons for one frame.
#[derive(Debug, Copy, Clone, Default)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    pub prev_x: i32,
    pub prev_y: i32,
    pub moved: bool,
    /// Left button down and the position changed since the previous frame.
    pub dragged: bool,
    /// Wheel notches accumulated this frame.
    pub wheel: i32,
    pub buttons: [ButtonState; MOUSE_BUTTON_COUNT],
}

impl MouseState {
    pub fn begin_frame(&mut self) {
        self.wheel = 0;
        for b in &mut self.buttons {
            b.begin_frame();
        }
    }

    #[inline]
    pub fn set_button(&mut self, button: MouseButton, down: bool) {
        self.buttons[button.index()].set(down);
    }

    /// Marks every button up, e.g. when the window loses focus mid-press.
    pub fn release_all(&mut self) {
        for b in &mut self.buttons {
            b.set(false);
        }
    }

    #[inline]
    pub fn add_wheel(&mut self, notches: i32) {
        self.wheel = self.wheel.saturating_add(notches);
    }

    /// Records this frame's cursor position (already in canvas pixels).
    pub fn sample_position(&mut self, x: i32, y: i32) {
        self.prev_x = self.x;
        self.prev_y = self.y;
        self.x = x;
        self.y = y;
        self.moved = self.x != self.prev_x || self.y != self.prev_y;
        self.dragged = self.moved && self.button(MouseButton::Left).is_down;
    }

    #[inline]
    pub fn button(&self, button: MouseButton) -> ButtonState {
        self.buttons[button.index()]
    }

    /// Half-open containment: `x <= mx < x + w` and `y <= my < y + h`.
    pub fn in_rect(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
        self.x >= x && self.x < x.saturating_add(w) && self.y >= y && self.y < y.saturating_add(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_needs_left_button_and_motion() {
        let mut m = MouseState::default();
        m.begin_frame();
        m.sample_position(10, 10);
        assert!(m.moved);
        assert!(!m.dragged);

        m.begin_frame();
        m.set_button(MouseButton::Left, true);
        m.sample_position(10, 10);
        assert!(!m.moved);
        assert!(!m.dragged);

        m.begin_frame();
        m.sample_position(12, 10);
        assert!(m.dragged);

        m.begin_frame();
        m.set_button(MouseButton::Left, false);
        m.set_button(MouseButton::Right, true);
        m.sample_position(20, 10);
        assert!(m.moved);
        assert!(!m.dragged);
    }

    #[test]
    fn wheel_sums_within_a_frame_and_resets() {
        let mut m = MouseState::default();
        m.begin_frame();
        m.add_wheel(1);
        m.add_wheel(2);
        assert_eq!(m.wheel, 3);
        m.begin_frame();
        assert_eq!(m.wheel, 0);
    }

    #[test]
    fn in_rect_excludes_far_edges() {
        let mut m = MouseState::default();
        m.sample_position(10, 10);
        assert!(m.in_rect(10, 10, 5, 5));
        assert!(m.in_rect(6, 6, 5, 5));
        assert!(!m.in_rect(5, 5, 5, 5));
        assert!(!m.in_rect(10, 10, 0, 5));
    }
}
