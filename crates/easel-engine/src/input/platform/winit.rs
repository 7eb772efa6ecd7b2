use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::input::{Key, MouseButton, PlatformEvent, RawKeyboard, RAW_KEY_COUNT};

/// Pixel scroll distance treated as one wheel notch (touchpads, macOS).
const PIXELS_PER_NOTCH: f64 = 40.0;

/// Slack for rounding error when many small deltas add up to a notch.
const NOTCH_EPSILON: f64 = 1e-6;

/// Translates a winit `WindowEvent` into a `PlatformEvent`.
///
/// `alt` is the tracked Alt modifier state. Wheel deltas go through `wheel`,
/// so an event only yields whole notches. Returns `None` for events the frame
/// loop does not consume (cursor motion is tracked separately by the platform).
pub(crate) fn translate_window_event(
    event: &WindowEvent,
    alt: bool,
    wheel: &mut WheelAccumulator,
) -> Option<PlatformEvent> {
    match event {
        WindowEvent::CloseRequested => Some(PlatformEvent::CloseRequested),

        WindowEvent::Resized(size) => Some(PlatformEvent::Resized {
            width: size.width,
            height: size.height,
        }),

        WindowEvent::Focused(f) => Some(PlatformEvent::Focused(*f)),

        WindowEvent::MouseInput { state, button, .. } => {
            let button = map_mouse_button(*button)?;
            Some(PlatformEvent::MouseButton {
                button,
                pressed: *state == ElementState::Pressed,
            })
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let notches = match delta {
                MouseScrollDelta::LineDelta(_, y) => wheel.feed(*y as f64),
                MouseScrollDelta::PixelDelta(p) => wheel.feed(p.y / PIXELS_PER_NOTCH),
            };
            (notches != 0).then_some(PlatformEvent::MouseWheel { notches })
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let key = map_key(event.physical_key)?;
            Some(PlatformEvent::Key {
                code: key.code(),
                pressed: event.state == ElementState::Pressed,
                repeat: event.repeat,
                alt,
            })
        }

        _ => None,
    }
}

/// Carries fractional wheel motion between events.
///
/// Smooth-scrolling devices deliver many small deltas; only whole notches are
/// reported and the remainder is kept. A change of direction drops it.
#[derive(Debug, Default)]
pub(crate) struct WheelAccumulator {
    pending: f64,
}

impl WheelAccumulator {
    /// Adds `notches` (possibly fractional) and returns the whole notches due.
    pub(crate) fn feed(&mut self, notches: f64) -> i32 {
        if !notches.is_finite() || notches == 0.0 {
            return 0;
        }
        if self.pending != 0.0 && self.pending.signum() != notches.signum() {
            self.pending = 0.0;
        }
        self.pending += notches;

        let whole = (self.pending + NOTCH_EPSILON.copysign(self.pending)).trunc();
        self.pending -= whole;
        whole.clamp(i32::MIN as f64, i32::MAX as f64) as i32
    }
}

/// Raw key table built from physical key events.
///
/// Both sides of Shift, Control and Alt land on one virtual-key code; the code
/// stays down while either side is.
#[derive(Debug)]
pub(crate) struct KeyTracker {
    table: RawKeyboard,
    pressed: Vec<WinitKeyCode>,
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self {
            table: [false; RAW_KEY_COUNT],
            pressed: Vec::new(),
        }
    }
}

impl KeyTracker {
    pub(crate) fn key_event(&mut self, physical: PhysicalKey, pressed: bool) {
        let PhysicalKey::Code(code) = physical else {
            return;
        };
        let Some(key) = map_key(physical) else {
            return;
        };

        self.pressed.retain(|&k| k != code);
        if pressed {
            self.pressed.push(code);
        }

        let down = self
            .pressed
            .iter()
            .any(|&k| map_key(PhysicalKey::Code(k)) == Some(key));
        if let Some(slot) = self.table.get_mut(key.code().0 as usize) {
            *slot = down;
        }
    }

    /// Forgets every key; releases are not delivered to an unfocused window.
    pub(crate) fn clear(&mut self) {
        self.table = [false; RAW_KEY_COUNT];
        self.pressed.clear();
    }

    #[inline]
    pub(crate) fn table(&self) -> &RawKeyboard {
        &self.table
    }
}

fn map_mouse_button(b: WinitMouseButton) -> Option<MouseButton> {
    match b {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

pub(crate) fn map_key(pk: PhysicalKey) -> Option<Key> {
    let PhysicalKey::Code(code) = pk else {
        return None;
    };

    let key = match code {
        WinitKeyCode::Escape => Key::Escape,
        WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => Key::Enter,
        WinitKeyCode::Tab => Key::Tab,
        WinitKeyCode::Backspace => Key::Backspace,
        WinitKeyCode::Space => Key::Space,
        WinitKeyCode::Pause => Key::Pause,

        WinitKeyCode::Insert => Key::Insert,
        WinitKeyCode::Delete => Key::Delete,
        WinitKeyCode::Home => Key::Home,
        WinitKeyCode::End => Key::End,
        WinitKeyCode::PageUp => Key::PageUp,
        WinitKeyCode::PageDown => Key::PageDown,

        WinitKeyCode::ArrowUp => Key::ArrowUp,
        WinitKeyCode::ArrowDown => Key::ArrowDown,
        WinitKeyCode::ArrowLeft => Key::ArrowLeft,
        WinitKeyCode::ArrowRight => Key::ArrowRight,

        WinitKeyCode::ShiftLeft | WinitKeyCode::ShiftRight => Key::Shift,
        WinitKeyCode::ControlLeft | WinitKeyCode::ControlRight => Key::Control,
        WinitKeyCode::AltLeft | WinitKeyCode::AltRight => Key::Alt,

        WinitKeyCode::KeyA => Key::A,
        WinitKeyCode::KeyB => Key::B,
        WinitKeyCode::KeyC => Key::C,
        WinitKeyCode::KeyD => Key::D,
        WinitKeyCode::KeyE => Key::E,
        WinitKeyCode::KeyF => Key::F,
        WinitKeyCode::KeyG => Key::G,
        WinitKeyCode::KeyH => Key::H,
        WinitKeyCode::KeyI => Key::I,
        WinitKeyCode::KeyJ => Key::J,
        WinitKeyCode::KeyK => Key::K,
        WinitKeyCode::KeyL => Key::L,
        WinitKeyCode::KeyM => Key::M,
        WinitKeyCode::KeyN => Key::N,
        WinitKeyCode::KeyO => Key::O,
        WinitKeyCode::KeyP => Key::P,
        WinitKeyCode::KeyQ => Key::Q,
        WinitKeyCode::KeyR => Key::R,
        WinitKeyCode::KeyS => Key::S,
        WinitKeyCode::KeyT => Key::T,
        WinitKeyCode::KeyU => Key::U,
        WinitKeyCode::KeyV => Key::V,
        WinitKeyCode::KeyW => Key::W,
        WinitKeyCode::KeyX => Key::X,
        WinitKeyCode::KeyY => Key::Y,
        WinitKeyCode::KeyZ => Key::Z,

        WinitKeyCode::Digit0 => Key::Digit0,
        WinitKeyCode::Digit1 => Key::Digit1,
        WinitKeyCode::Digit2 => Key::Digit2,
        WinitKeyCode::Digit3 => Key::Digit3,
        WinitKeyCode::Digit4 => Key::Digit4,
        WinitKeyCode::Digit5 => Key::Digit5,
        WinitKeyCode::Digit6 => Key::Digit6,
        WinitKeyCode::Digit7 => Key::Digit7,
        WinitKeyCode::Digit8 => Key::Digit8,
        WinitKeyCode::Digit9 => Key::Digit9,

        WinitKeyCode::F1 => Key::F1,
        WinitKeyCode::F2 => Key::F2,
        WinitKeyCode::F3 => Key::F3,
        WinitKeyCode::F4 => Key::F4,
        WinitKeyCode::F5 => Key::F5,
        WinitKeyCode::F6 => Key::F6,
        WinitKeyCode::F7 => Key::F7,
        WinitKeyCode::F8 => Key::F8,
        WinitKeyCode::F9 => Key::F9,
        WinitKeyCode::F10 => Key::F10,
        WinitKeyCode::F11 => Key::F11,
        WinitKeyCode::F12 => Key::F12,

        _ => return None,
    };

    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_to_virtual_key_codes() {
        assert_eq!(map_key(PhysicalKey::Code(WinitKeyCode::KeyQ)), Some(Key::Q));
        assert_eq!(
            map_key(PhysicalKey::Code(WinitKeyCode::ShiftRight)),
            Some(Key::Shift)
        );
        assert_eq!(map_key(PhysicalKey::Code(WinitKeyCode::NumLock)), None);
    }

    #[test]
    fn small_pixel_deltas_add_up_to_one_notch() {
        let mut wheel = WheelAccumulator::default();
        let total: i32 = (0..20).map(|_| wheel.feed(2.0 / PIXELS_PER_NOTCH)).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn whole_line_deltas_pass_straight_through() {
        let mut wheel = WheelAccumulator::default();
        assert_eq!(wheel.feed(2.0), 2);
        assert_eq!(wheel.feed(-1.0), -1);
        assert_eq!(wheel.feed(0.0), 0);
    }

    #[test]
    fn reversing_direction_drops_the_remainder() {
        let mut wheel = WheelAccumulator::default();
        assert_eq!(wheel.feed(0.75), 0);
        assert_eq!(wheel.feed(-0.5), 0);
        assert_eq!(wheel.feed(-0.5), -1);
    }

    #[test]
    fn modifier_stays_down_while_either_side_is_held() {
        let shift = Key::Shift.code().0 as usize;
        let mut keys = KeyTracker::default();

        keys.key_event(PhysicalKey::Code(WinitKeyCode::ShiftLeft), true);
        keys.key_event(PhysicalKey::Code(WinitKeyCode::ShiftRight), true);
        keys.key_event(PhysicalKey::Code(WinitKeyCode::ShiftLeft), false);
        assert!(keys.table()[shift]);

        keys.key_event(PhysicalKey::Code(WinitKeyCode::ShiftRight), false);
        assert!(!keys.table()[shift]);
    }

    #[test]
    fn repeated_presses_need_one_release() {
        let a = Key::A.code().0 as usize;
        let mut keys = KeyTracker::default();
        keys.key_event(PhysicalKey::Code(WinitKeyCode::KeyA), true);
        keys.key_event(PhysicalKey::Code(WinitKeyCode::KeyA), true);
        keys.key_event(PhysicalKey::Code(WinitKeyCode::KeyA), false);
        assert!(!keys.table()[a]);

        keys.key_event(PhysicalKey::Code(WinitKeyCode::KeyB), true);
        keys.clear();
        assert!(keys.table().iter().all(|&k| !k));
    }
}
