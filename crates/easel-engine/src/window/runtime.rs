use crate::core::{CanvasConfig, FatalError, FrameLoop, Sketch};
use crate::device::WgpuRenderer;

use super::desktop::{WindowConfig, WinitPlatform};

/// Entry point for desktop sketches.
pub struct Runtime;

impl Runtime {
    /// Opens the window, brings up the GPU and runs `sketch` until it quits,
    /// the window is closed or a quit key is pressed.
    ///
    /// Window or GPU setup failures are returned before `setup` runs. A fatal
    /// presentation error is returned after `cleanup` has run.
    pub fn run<S: Sketch>(config: CanvasConfig, sketch: &mut S) -> Result<(), FatalError> {
        let platform = WinitPlatform::new(&WindowConfig {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
            fullscreen: config.fullscreen,
        })?;

        let renderer = pollster::block_on(WgpuRenderer::new(
            platform.window(),
            config.prefer_srgb,
            config.canvas(),
        ))
        .map_err(FatalError::render_context)?;

        let mut frame_loop = FrameLoop::new(platform, renderer, &config);
        frame_loop.run(sketch)
    }

    /// [`Runtime::run`], then exits the process: status 0 on a clean stop, 1
    /// after reporting a fatal error.
    pub fn run_or_exit<S: Sketch>(config: CanvasConfig, sketch: &mut S) -> ! {
        match Self::run(config, sketch) {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                log::error!("{e}");
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}
