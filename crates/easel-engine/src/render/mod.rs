//! Rendering subsystem.
//!
//! `RenderState` holds the retained stroke/fill/projection state, `Graphics`
//! turns drawing calls into vertex lists, and a `Renderer` backend draws them.
//!
//! Convention:
//! - 2D geometry is in canvas pixels (top-left origin, +Y down).
//! - Vertices are handed to the backend in model space; the backend applies
//!   the model-view matrix and projection.

mod backend;
mod graphics;
mod headless;
mod matrix;
mod shading;
mod state;
pub mod tessellate;

pub use backend::{
    rgba_len, BlendMode, Perspective, PresentMode, Primitive, Projection, Renderer, TextureId,
};
pub(crate) use graphics::{apply_pipeline_state, ShapeBuffer};
pub use graphics::{Graphics, Texture};
pub use headless::{DrawCall, HeadlessRenderer};
pub use matrix::{MatrixStack, MAX_MATRIX_DEPTH};
pub use shading::{face_normal, shade_triangles, Fog, Light};
pub use state::{RectMode, RenderState};
