use crate::coords::Vec2;

use super::button::ButtonState;
use super::types::{GamepadButton, RawGamepad, GAMEPAD_BUTTON_COUNT};

/// Default stick dead zone in raw axis units.
pub const DEFAULT_DEAD_ZONE: i16 = 7849;

/// Gamepad sampling configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GamepadConfig {
    /// Raw axis magnitude at or below which a stick axis reads as 0.
    pub dead_zone: i16,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            dead_zone: DEFAULT_DEAD_ZONE,
        }
    }
}

/// Normalizes a raw signed 16-bit axis value to `[-1, 1]` with a dead zone.
///
/// Values in `[-t, t]` map to exactly 0. Outside, the remaining range on each
/// side is rescaled so the extremes reach -1 and 1.
pub fn dead_zone(value: i16, threshold: i16) -> f32 {
    let t = threshold.clamp(0, i16::MAX - 1) as f32;
    let v = value as f32;

    if v > t {
        (v - t) / (32767.0 - t)
    } else if v < -t {
        (v + t) / (32768.0 - t)
    } else {
        0.0
    }
}

/// Normalized controller state.
#[derive(Debug, Copy, Clone, Default)]
pub struct GamepadState {
    pub left_stick: Vec2,
    pub right_stick: Vec2,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub buttons: [ButtonState; GAMEPAD_BUTTON_COUNT],
    pub connected: bool,
}

impl GamepadState {
    pub fn begin_frame(&mut self) {
        for b in &mut self.buttons {
            b.begin_frame();
        }
    }

    /// Applies one raw reading.
    pub fn apply(&mut self, raw: &RawGamepad, config: &GamepadConfig) {
        let t = config.dead_zone;
        let stick = |(x, y): (i16, i16)| Vec2::new(dead_zone(x, t), dead_zone(y, t));

        self.connected = true;
        self.left_stick = stick(raw.left_stick);
        self.right_stick = stick(raw.right_stick);
        self.left_trigger = raw.left_trigger;
        self.right_trigger = raw.right_trigger;
        for (state, &down) in self.buttons.iter_mut().zip(raw.buttons.iter()) {
            state.set(down);
        }
    }

    /// Marks the pad absent; the last reading is left in place.
    #[inline]
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    #[inline]
    pub fn button(&self, button: GamepadButton) -> ButtonState {
        self.buttons[button.index()]
    }
}
