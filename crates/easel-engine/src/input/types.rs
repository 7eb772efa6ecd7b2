use std::fmt;

/// Number of tracked virtual-key codes (`0x00..=0x7B`, up to F12).
pub const KEY_COUNT: usize = 0x7C;

/// Size of the raw keyboard table a platform fills each frame.
pub const RAW_KEY_COUNT: usize = 256;

pub const MOUSE_BUTTON_COUNT: usize = 3;

pub const GAMEPAD_BUTTON_COUNT: usize = 14;

/// Raw full-keyboard state, indexed by virtual-key code.
pub type RawKeyboard = [bool; RAW_KEY_COUNT];

/// Virtual-key code.
///
/// Any `u32` is accepted; codes outside `0..KEY_COUNT` read as "not down" for
/// every query.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct KeyCode(pub u32);

impl KeyCode {
    /// Table index, or `None` when the code is outside the tracked range.
    #[inline]
    pub fn index(self) -> Option<usize> {
        let i = self.0 as usize;
        (i < KEY_COUNT).then_some(i)
    }
}

impl From<u32> for KeyCode {
    #[inline]
    fn from(code: u32) -> Self {
        KeyCode(code)
    }
}

impl From<Key> for KeyCode {
    #[inline]
    fn from(key: Key) -> Self {
        KeyCode(key as u32)
    }
}

/// Named keys, valued by their virtual-key code.
///
/// The platform adapter maps native key identifiers onto these codes; keys it
/// cannot map are dropped.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Backspace = 0x08,
    Tab = 0x09,
    Enter = 0x0D,
    Shift = 0x10,
    Control = 0x11,
    Alt = 0x12,
    Pause = 0x13,
    Escape = 0x1B,
    Space = 0x20,
    PageUp = 0x21,
    PageDown = 0x22,
    End = 0x23,
    Home = 0x24,
    ArrowLeft = 0x25,
    ArrowUp = 0x26,
    ArrowRight = 0x27,
    ArrowDown = 0x28,
    Insert = 0x2D,
    Delete = 0x2E,

    Digit0 = 0x30, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    A = 0x41, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    F1 = 0x70, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,
}

impl Key {
    #[inline]
    pub fn code(self) -> KeyCode {
        KeyCode::from(self)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub const ALL: [MouseButton; MOUSE_BUTTON_COUNT] =
        [MouseButton::Left, MouseButton::Middle, MouseButton::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

/// The fourteen digital gamepad buttons.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GamepadButton {
    Up,
    Down,
    Left,
    Right,
    Start,
    Back,
    LeftThumb,
    RightThumb,
    LeftShoulder,
    RightShoulder,
    A,
    B,
    X,
    Y,
}

impl GamepadButton {
    pub const ALL: [GamepadButton; GAMEPAD_BUTTON_COUNT] = [
        GamepadButton::Up,
        GamepadButton::Down,
        GamepadButton::Left,
        GamepadButton::Right,
        GamepadButton::Start,
        GamepadButton::Back,
        GamepadButton::LeftThumb,
        GamepadButton::RightThumb,
        GamepadButton::LeftShoulder,
        GamepadButton::RightShoulder,
        GamepadButton::A,
        GamepadButton::B,
        GamepadButton::X,
        GamepadButton::Y,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Raw controller reading as delivered by the platform.
///
/// Stick axes use the signed 16-bit range (`-32768..=32767`, +Y up); triggers
/// are `0..=255`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RawGamepad {
    pub left_stick: (i16, i16),
    pub right_stick: (i16, i16),
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub buttons: [bool; GAMEPAD_BUTTON_COUNT],
}

/// Platform events delivered to the frame loop, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// The user asked to close the window.
    CloseRequested,

    /// Window client area changed (physical pixels).
    Resized { width: u32, height: u32 },

    MouseButton { button: MouseButton, pressed: bool },

    /// Wheel rotation in notches; positive is away from the user.
    MouseWheel { notches: i32 },

    /// Key transition. `alt` reports the Alt modifier at the time of the event.
    Key {
        code: KeyCode,
        pressed: bool,
        repeat: bool,
        alt: bool,
    },

    /// Window focus change.
    Focused(bool),
}
