//! Core engine-facing contracts.
//!
//! This module defines the interface between the frame loop and user
//! sketches: the `Sketch` callbacks, the per-callback `Context`, the loop
//! itself and the fatal error type.

mod app;
mod config;
mod ctx;
mod error;
mod frame_loop;

pub use app::Sketch;
pub use config::CanvasConfig;
pub use ctx::Context;
pub use error::FatalError;
pub use frame_loop::FrameLoop;
