use crate::coords::Vec2;

use super::gamepad::{GamepadConfig, GamepadState};
use super::keyboard::Keyboard;
use super::mouse::MouseState;
use super::types::{GamepadButton, KeyCode, MouseButton, RawGamepad, RawKeyboard};

/// All input sources as sampled for the current frame.
///
/// Overwritten in place by the frame loop before each `draw`; sketches only
/// read it.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub keyboard: Keyboard,
    pub mouse: MouseState,
    pub gamepad: GamepadState,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears per-frame edges (button `changed` flags, wheel delta).
    pub fn begin_frame(&mut self) {
        self.mouse.begin_frame();
        self.gamepad.begin_frame();
    }

    pub fn sample_keyboard(&mut self, raw: &RawKeyboard) {
        self.keyboard.sample(raw);
    }

    pub fn sample_cursor(&mut self, x: i32, y: i32) {
        self.mouse.sample_position(x, y);
    }

    pub fn sample_gamepad(&mut self, raw: Option<&RawGamepad>, config: &GamepadConfig) {
        match raw {
            Some(raw) => self.gamepad.apply(raw, config),
            None => self.gamepad.disconnect(),
        }
    }

    // Keyboard

    pub fn key_down(&self, key: impl Into<KeyCode>) -> bool {
        self.keyboard.is_down(key.into())
    }

    /// Pressed this frame.
    pub fn key_hit(&self, key: impl Into<KeyCode>) -> bool {
        self.keyboard.just_pressed(key.into())
    }

    /// Released this frame.
    pub fn key_up(&self, key: impl Into<KeyCode>) -> bool {
        self.keyboard.just_released(key.into())
    }

    pub fn key_held(&self, key: impl Into<KeyCode>) -> bool {
        self.keyboard.held(key.into())
    }

    // Mouse

    #[inline]
    pub fn mouse_x(&self) -> i32 {
        self.mouse.x
    }

    #[inline]
    pub fn mouse_y(&self) -> i32 {
        self.mouse.y
    }

    #[inline]
    pub fn mouse_position(&self) -> (i32, i32) {
        (self.mouse.x, self.mouse.y)
    }

    #[inline]
    pub fn previous_mouse_position(&self) -> (i32, i32) {
        (self.mouse.prev_x, self.mouse.prev_y)
    }

    #[inline]
    pub fn mouse_moved(&self) -> bool {
        self.mouse.moved
    }

    #[inline]
    pub fn mouse_dragged(&self) -> bool {
        self.mouse.dragged
    }

    /// Wheel notches this frame; positive away from the user.
    #[inline]
    pub fn mouse_wheel(&self) -> i32 {
        self.mouse.wheel
    }

    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.mouse.button(button).is_down
    }

    pub fn mouse_clicked(&self, button: MouseButton) -> bool {
        self.mouse.button(button).just_pressed()
    }

    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.mouse.button(button).just_released()
    }

    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse.button(button).held()
    }

    pub fn mouse_in_rect(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
        self.mouse.in_rect(x, y, w, h)
    }

    // Gamepad

    #[inline]
    pub fn gamepad_connected(&self) -> bool {
        self.gamepad.connected
    }

    pub fn gamepad_down(&self, button: GamepadButton) -> bool {
        self.gamepad.button(button).is_down
    }

    pub fn gamepad_pressed(&self, button: GamepadButton) -> bool {
        self.gamepad.button(button).just_pressed()
    }

    pub fn gamepad_released(&self, button: GamepadButton) -> bool {
        self.gamepad.button(button).just_released()
    }

    pub fn gamepad_held(&self, button: GamepadButton) -> bool {
        self.gamepad.button(button).held()
    }

    #[inline]
    pub fn left_stick(&self) -> Vec2 {
        self.gamepad.left_stick
    }

    #[inline]
    pub fn right_stick(&self) -> Vec2 {
        self.gamepad.right_stick
    }

    #[inline]
    pub fn left_trigger(&self) -> u8 {
        self.gamepad.left_trigger
    }

    #[inline]
    pub fn right_trigger(&self) -> u8 {
        self.gamepad.right_trigger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::types::{Key, RAW_KEY_COUNT};

    #[test]
    fn first_sample_of_an_idle_keyboard_has_no_edges() {
        let mut input = InputSnapshot::new();
        input.begin_frame();
        input.sample_keyboard(&[false; RAW_KEY_COUNT]);
        assert!(!input.key_down(Key::Space));
        assert!(!input.key_hit(Key::Space));
        assert!(!input.key_up(Key::Space));
    }

    #[test]
    fn raw_codes_and_named_keys_agree() {
        let mut input = InputSnapshot::new();
        let mut raw = [false; RAW_KEY_COUNT];
        raw[0x20] = true;
        input.sample_keyboard(&raw);
        assert!(input.key_hit(Key::Space));
        assert!(input.key_hit(KeyCode(0x20)));
        assert!(input.key_down(0x20u32));
    }

    #[test]
    fn held_is_true_on_the_press_frame() {
        let mut input = InputSnapshot::new();
        let mut raw = [false; RAW_KEY_COUNT];
        raw[Key::Space as usize] = true;

        input.begin_frame();
        input.sample_keyboard(&raw);
        input.mouse.set_button(MouseButton::Left, true);

        assert_eq!(input.key_held(Key::Space), input.key_down(Key::Space));
        assert!(input.key_held(Key::Space));
        assert!(input.mouse_held(MouseButton::Left));
        assert!(input.mouse_clicked(MouseButton::Left));
    }

    #[test]
    fn gamepad_buttons_edge_detect() {
        let mut input = InputSnapshot::new();
        let cfg = GamepadConfig::default();
        let mut raw = RawGamepad::default();
        raw.buttons[GamepadButton::A.index()] = true;

        input.begin_frame();
        input.sample_gamepad(Some(&raw), &cfg);
        assert!(input.gamepad_connected());
        assert!(input.gamepad_pressed(GamepadButton::A));
        assert!(input.gamepad_held(GamepadButton::A));

        input.begin_frame();
        input.sample_gamepad(Some(&raw), &cfg);
        assert!(input.gamepad_held(GamepadButton::A));

        input.begin_frame();
        input.sample_gamepad(None, &cfg);
        assert!(!input.gamepad_connected());
        assert!(input.gamepad_down(GamepadButton::A));
    }
}
