//! Color model.
//!
//! Scope:
//! - `Color`: channel bytes as written by sketches, optionally tagged with a space
//! - `ColorSpace`: RGB / HSB / HSL interpretation
//! - `Rgba`: normalized straight-alpha color consumed by renderers
//!
//! Conversion happens when a color is handed to the render state, never later.

pub mod color;
pub mod convert;
pub mod palette;
pub mod rgba;

pub use color::{Color, ColorSpace};
pub use rgba::Rgba;
