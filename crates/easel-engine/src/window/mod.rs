//! Window, platform abstraction and the desktop runtime.
//!
//! The frame loop talks to a [`Platform`]; [`WinitPlatform`] is the desktop
//! implementation and [`HeadlessPlatform`] replays scripted frames for tests.

mod desktop;
mod headless;
mod platform;
mod runtime;

pub use desktop::{WindowConfig, WinitPlatform};
pub use headless::{HeadlessPlatform, ScriptedFrame};
pub use platform::Platform;
pub use runtime::Runtime;
