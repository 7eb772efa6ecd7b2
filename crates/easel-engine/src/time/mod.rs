//! Time subsystem.
//!
//! Provides testable frame timing without coupling to the runtime.
//! The frame loop owns one `FrameClock` and ticks it once per presented frame.

mod frame_clock;

pub use frame_clock::{target_frame_duration, FrameClock, FrameTime, FALLBACK_REFRESH_HZ};
