//! GPU device, surface and the wgpu renderer.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - rendering sketch geometry into an offscreen canvas and presenting it

mod error;
mod gpu;
mod pipeline;
mod renderer;

pub use error::{classify_surface_error, SurfaceErrorAction};
pub use gpu::{Gpu, GpuFrame};
pub use renderer::WgpuRenderer;
