use crate::coords::Canvas;
use crate::input::GamepadConfig;
use crate::render::Projection;

/// Canvas and loop configuration for [`Runtime::run`](crate::window::Runtime::run).
///
/// Built with chained setters:
///
/// ```no_run
/// # use easel_engine::core::CanvasConfig;
/// let config = CanvasConfig::new(960, 540)
///     .with_title("stars")
///     .with_frame_rate(0);
/// ```
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    pub title: String,

    /// Logical canvas size in pixels.
    pub width: u32,
    pub height: u32,

    /// Start in borderless fullscreen.
    pub fullscreen: bool,

    /// Initial projection. Defaults to 2D.
    pub projection: Projection,

    /// Target frames per second; 0 follows the display refresh rate.
    pub frame_rate: u32,

    /// Sleep out the remainder of each frame budget. Vsync normally paces the
    /// loop, so this is off by default.
    pub lock_frame_rate: bool,

    pub gamepad: GamepadConfig,

    /// Ask for an sRGB surface. Off by default: sketch colors are written
    /// as-is, the way a plain 8-bit framebuffer shows them.
    pub prefer_srgb: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            title: "Creative Framework".to_string(),
            width: 100,
            height: 100,
            fullscreen: false,
            projection: Projection::TwoD,
            frame_rate: 60,
            lock_frame_rate: false,
            gamepad: GamepadConfig::default(),
            prefer_srgb: false,
        }
    }
}

impl CanvasConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Starts with the default 3D perspective.
    pub fn three_d(self) -> Self {
        self.with_projection(Projection::three_d())
    }

    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.frame_rate = fps;
        self
    }

    pub fn with_locked_frame_rate(mut self, lock: bool) -> Self {
        self.lock_frame_rate = lock;
        self
    }

    pub fn with_gamepad(mut self, gamepad: GamepadConfig) -> Self {
        self.gamepad = gamepad;
        self
    }

    pub fn with_srgb(mut self, prefer_srgb: bool) -> Self {
        self.prefer_srgb = prefer_srgb;
        self
    }

    /// Canvas with the logical size and no physical size known yet.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }
}
