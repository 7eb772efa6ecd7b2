use crate::input::{PlatformEvent, RawGamepad, RawKeyboard};

/// Windowing collaborator sampled by the frame loop.
///
/// Every method is non-blocking. Events the frame loop does not consume are
/// expected to have been handled (or ignored) by the platform already.
pub trait Platform {
    /// Appends every pending event to `out`, in arrival order.
    fn poll_events(&mut self, out: &mut Vec<PlatformEvent>);

    /// Fills the full raw keyboard table, indexed by virtual-key code.
    fn keyboard_state(&self, keys: &mut RawKeyboard);

    /// Cursor position in window-client physical pixels.
    fn cursor_position(&self) -> (i32, i32);

    /// Current controller reading, `None` when no pad is connected.
    fn gamepad_state(&mut self) -> Option<RawGamepad>;

    /// Window client size in physical pixels.
    fn physical_size(&self) -> (u32, u32);

    /// Display refresh rate, when the platform can tell.
    fn refresh_rate_hz(&self) -> Option<u32>;

    fn set_title(&mut self, title: &str);

    fn toggle_fullscreen(&mut self);
}
