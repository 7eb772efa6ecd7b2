use std::ops::{Deref, DerefMut};

use crate::input::InputSnapshot;
use crate::render::Graphics;
use crate::time::FrameTime;
use crate::window::Platform;

/// Per-callback context handed to a [`Sketch`](super::Sketch).
///
/// Dereferences to [`Graphics`], so drawing calls read directly:
/// `ctx.fill((255, 0, 0)); ctx.rect(10.0, 10.0, 50.0, 50.0);`.
pub struct Context<'a> {
    gfx: Graphics<'a>,
    input: &'a InputSnapshot,
    time: FrameTime,
    platform: &'a mut dyn Platform,
    running: &'a mut bool,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        gfx: Graphics<'a>,
        input: &'a InputSnapshot,
        time: FrameTime,
        platform: &'a mut dyn Platform,
        running: &'a mut bool,
    ) -> Self {
        Self {
            gfx,
            input,
            time,
            platform,
            running,
        }
    }

    /// Input as sampled at the start of this frame.
    #[inline]
    pub fn input(&self) -> &InputSnapshot {
        self.input
    }

    #[inline]
    pub fn mouse_x(&self) -> i32 {
        self.input.mouse_x()
    }

    #[inline]
    pub fn mouse_y(&self) -> i32 {
        self.input.mouse_y()
    }

    #[inline]
    pub fn time(&self) -> FrameTime {
        self.time
    }

    /// Milliseconds since the loop started.
    #[inline]
    pub fn millis(&self) -> u64 {
        self.time.millis
    }

    /// Frames completed before this one.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.time.frame_count
    }

    /// Duration of the previous frame, in seconds.
    #[inline]
    pub fn delta_time(&self) -> f32 {
        self.time.dt
    }

    pub fn set_window_title(&mut self, title: &str) {
        self.platform.set_title(title);
    }

    pub fn toggle_fullscreen(&mut self) {
        self.platform.toggle_fullscreen();
    }

    /// Stops the loop after the current frame is presented.
    pub fn quit(&mut self) {
        *self.running = false;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        *self.running
    }
}

impl<'a> Deref for Context<'a> {
    type Target = Graphics<'a>;

    fn deref(&self) -> &Self::Target {
        &self.gfx
    }
}

impl<'a> DerefMut for Context<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.gfx
    }
}
