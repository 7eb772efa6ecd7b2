//! Coordinate and geometry types shared by the render state, input and backends.
//!
//! Canonical CPU space:
//! - Canvas (logical) pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Physical window pixels only appear at the platform boundary; `Canvas`
//! converts between the two.

mod canvas;
mod rect;
mod vec2;

pub use canvas::Canvas;
pub use rect::Rect;
pub use vec2::Vec2;
