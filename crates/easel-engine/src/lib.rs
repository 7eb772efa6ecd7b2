//! Easel engine crate.
//!
//! An immediate-mode creative coding runtime in the Processing mould: a
//! sketch implements [`core::Sketch`], draws through the [`core::Context`] it
//! is handed each frame, and reads input from a per-frame snapshot.
//!
//! ```no_run
//! use easel_engine::core::{CanvasConfig, Context, Sketch};
//! use easel_engine::window::Runtime;
//!
//! struct Dot;
//!
//! impl Sketch for Dot {
//!     fn draw(&mut self, ctx: &mut Context<'_>) {
//!         ctx.background(0);
//!         ctx.fill((255, 0, 0));
//!         let (x, y) = (ctx.mouse_x() as f32, ctx.mouse_y() as f32);
//!         ctx.circle(x, y, 10.0);
//!     }
//! }
//!
//! Runtime::run_or_exit(CanvasConfig::new(320, 240), &mut Dot);
//! ```

pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;
