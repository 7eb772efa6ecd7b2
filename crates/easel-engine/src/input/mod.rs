//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The frame loop samples a `Platform` and writes the results into an
//! `InputSnapshot`, which sketches read during `draw`.

mod button;
mod gamepad;
mod keyboard;
mod mouse;
pub(crate) mod platform;
mod snapshot;
mod types;

pub use button::ButtonState;
pub use gamepad::{dead_zone, GamepadConfig, GamepadState, DEFAULT_DEAD_ZONE};
pub use keyboard::Keyboard;
pub use mouse::MouseState;
pub use snapshot::InputSnapshot;
pub use types::{
    GamepadButton,
    Key,
    KeyCode,
    MouseButton,
    PlatformEvent,
    RawGamepad,
    RawKeyboard,
    GAMEPAD_BUTTON_COUNT,
    KEY_COUNT,
    MOUSE_BUTTON_COUNT,
    RAW_KEY_COUNT,
};
