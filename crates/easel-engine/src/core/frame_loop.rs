use std::time::Instant;

use crate::input::{GamepadConfig, InputSnapshot, Key, PlatformEvent, RawKeyboard, RAW_KEY_COUNT};
use crate::render::{apply_pipeline_state, Graphics, PresentMode, RenderState, Renderer, ShapeBuffer};
use crate::time::{target_frame_duration, FrameClock};
use crate::window::Platform;

use super::app::Sketch;
use super::config::CanvasConfig;
use super::ctx::Context;
use super::error::FatalError;

/// Single-threaded frame loop.
///
/// Owns the render state, the input snapshot and the clock, and lends them to
/// the sketch through a [`Context`] for each callback. Each [`step`](Self::step)
/// runs one iteration:
///
/// 1. clear per-frame edges;
/// 2. drain platform events (quit keys, fullscreen toggle, resize, mouse);
/// 3. sample keyboard, cursor and gamepad;
/// 4. call `draw` once;
/// 5. reset the transform and present;
/// 6. tick the clock.
pub struct FrameLoop<P: Platform, R: Renderer> {
    platform: P,
    renderer: R,
    state: RenderState,
    input: InputSnapshot,
    clock: FrameClock,
    gamepad: GamepadConfig,
    lock_frame_rate: bool,

    shape: ShapeBuffer,
    events: Vec<PlatformEvent>,
    raw_keys: RawKeyboard,

    running: bool,
    set_up: bool,
    cleaned_up: bool,
}

impl<P: Platform, R: Renderer> FrameLoop<P, R> {
    pub fn new(platform: P, mut renderer: R, config: &CanvasConfig) -> Self {
        let (pw, ph) = platform.physical_size();
        let canvas = config.canvas().with_physical(pw, ph);

        let mut state = RenderState::new(canvas);
        state.set_projection(config.projection);
        apply_pipeline_state(&state, &mut renderer);

        let target = target_frame_duration(config.frame_rate, platform.refresh_rate_hz());
        log::debug!(
            "frame loop: canvas {}x{}, window {}x{}, target frame {:?}",
            canvas.width,
            canvas.height,
            pw,
            ph,
            target
        );

        Self {
            platform,
            renderer,
            state,
            input: InputSnapshot::new(),
            clock: FrameClock::new(target),
            gamepad: config.gamepad,
            lock_frame_rate: config.lock_frame_rate,
            shape: ShapeBuffer::default(),
            events: Vec::new(),
            raw_keys: [false; RAW_KEY_COUNT],
            running: true,
            set_up: false,
            cleaned_up: false,
        }
    }

    /// Runs `setup`, iterates until the loop stops, then runs `cleanup`.
    ///
    /// A fatal presentation error stops the loop; `cleanup` still runs and the
    /// error is returned.
    pub fn run<S: Sketch + ?Sized>(&mut self, sketch: &mut S) -> Result<(), FatalError> {
        let mut result = Ok(());
        while self.running {
            let started = Instant::now();
            if let Err(e) = self.step(sketch) {
                result = Err(e);
                break;
            }
            if self.lock_frame_rate {
                let budget = self.clock.target_frame();
                if let Some(rest) = budget.checked_sub(started.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }
        self.finish(sketch);
        result
    }

    /// Runs one iteration. Calls `setup` first if it has not run yet; does
    /// nothing once the loop has stopped.
    pub fn step<S: Sketch + ?Sized>(&mut self, sketch: &mut S) -> Result<(), FatalError> {
        self.ensure_setup(sketch);
        if !self.running {
            return Ok(());
        }

        self.input.begin_frame();
        self.process_events();
        self.sample_input();

        sketch.draw(&mut self.context());

        // Transform does not carry over between frames.
        self.renderer.matrices().reset();
        let mode = if self.state.double_buffer() {
            PresentMode::Swap
        } else {
            PresentMode::Flush
        };
        if let Err(e) = self.renderer.present(mode) {
            log::error!("presentation failed: {e}");
            self.running = false;
            return Err(e);
        }

        self.clock.tick();
        Ok(())
    }

    /// Runs `cleanup` if it has not run yet.
    pub fn finish<S: Sketch + ?Sized>(&mut self, sketch: &mut S) {
        if self.cleaned_up {
            return;
        }
        self.ensure_setup(sketch);
        self.cleaned_up = true;
        self.running = false;
        sketch.cleanup(&mut self.context());
        log::info!("sketch finished after {} frames", self.clock.frame_count());
    }

    fn ensure_setup<S: Sketch + ?Sized>(&mut self, sketch: &mut S) {
        if self.set_up {
            return;
        }
        self.set_up = true;
        sketch.setup(&mut self.context());
    }

    fn context(&mut self) -> Context<'_> {
        let gfx = Graphics::new(&mut self.state, &mut self.renderer, &mut self.shape);
        Context::new(
            gfx,
            &self.input,
            self.clock.time(),
            &mut self.platform,
            &mut self.running,
        )
    }

    fn process_events(&mut self) {
        let mut events = std::mem::take(&mut self.events);
        events.clear();
        self.platform.poll_events(&mut events);

        for ev in events.drain(..) {
            self.handle_event(ev);
        }
        self.events = events;
    }

    fn handle_event(&mut self, ev: PlatformEvent) {
        match ev {
            PlatformEvent::CloseRequested => {
                log::info!("close requested");
                self.running = false;
            }

            PlatformEvent::Key {
                code,
                pressed: true,
                repeat,
                alt,
            } => {
                if code == Key::Escape.code() || (alt && code == Key::F4.code()) {
                    log::info!("quit key pressed");
                    self.running = false;
                } else if alt && code == Key::Enter.code() && !repeat {
                    self.platform.toggle_fullscreen();
                }
            }

            PlatformEvent::Resized { width, height } => {
                if width == 0 || height == 0 {
                    // Minimized; keep the last usable size.
                    return;
                }
                log::debug!("window resized to {width}x{height}");
                self.state.set_canvas_physical(width, height);
                self.renderer.resize(width, height);
                apply_pipeline_state(&self.state, &mut self.renderer);
            }

            PlatformEvent::MouseButton { button, pressed } => {
                self.input.mouse.set_button(button, pressed);
            }

            PlatformEvent::MouseWheel { notches } => {
                self.input.mouse.add_wheel(notches);
            }

            PlatformEvent::Focused(false) => {
                // Button releases are not delivered to an unfocused window.
                self.input.mouse.release_all();
            }

            PlatformEvent::Key { .. } | PlatformEvent::Focused(true) => {}
        }
    }

    fn sample_input(&mut self) {
        self.platform.keyboard_state(&mut self.raw_keys);
        self.input.sample_keyboard(&self.raw_keys);

        let (px, py) = self.platform.cursor_position();
        let (x, y) = self.state.canvas().to_logical(px, py);
        self.input.sample_cursor(x, y);

        let pad = self.platform.gamepad_state();
        self.input.sample_gamepad(pad.as_ref(), &self.gamepad);
    }

    // ── accessors ────────────────────────────────────────────────────────

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stops the loop after the current iteration.
    pub fn stop(&mut self) {
        self.running = false;
    }

    #[inline]
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    #[inline]
    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    #[inline]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    #[inline]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    #[inline]
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[inline]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCode, MouseButton};
    use crate::render::HeadlessRenderer;
    use crate::window::{HeadlessPlatform, ScriptedFrame};

    #[derive(Default)]
    struct Counter {
        setups: u32,
        draws: u32,
        cleanups: u32,
        frame_counts: Vec<u64>,
    }

    impl Sketch for Counter {
        fn setup(&mut self, _ctx: &mut Context<'_>) {
            self.setups += 1;
        }

        fn draw(&mut self, ctx: &mut Context<'_>) {
            self.draws += 1;
            self.frame_counts.push(ctx.frame_count());
        }

        fn cleanup(&mut self, _ctx: &mut Context<'_>) {
            self.cleanups += 1;
        }
    }

    fn frame_loop(config: &CanvasConfig) -> FrameLoop<HeadlessPlatform, HeadlessRenderer> {
        let platform = HeadlessPlatform::new(config.width, config.height);
        let renderer = HeadlessRenderer::new(config.canvas());
        FrameLoop::new(platform, renderer, config)
    }

    #[test]
    fn frame_count_matches_iterations() {
        let mut fl = frame_loop(&CanvasConfig::new(320, 240));
        let mut sketch = Counter::default();
        for _ in 0..7 {
            fl.step(&mut sketch).unwrap();
        }
        assert_eq!(fl.frame_count(), 7);
        assert_eq!(sketch.draws, 7);
        assert_eq!(sketch.setups, 1);
        assert_eq!(sketch.frame_counts, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn escape_stops_the_loop_after_the_frame() {
        let mut fl = frame_loop(&CanvasConfig::new(320, 240));
        fl.platform_mut().push_frame(ScriptedFrame::new());
        fl.platform_mut().push_frame(ScriptedFrame::new().event(PlatformEvent::Key {
            code: Key::Escape.code(),
            pressed: true,
            repeat: false,
            alt: false,
        }));

        let mut sketch = Counter::default();
        fl.run(&mut sketch).unwrap();
        assert_eq!(sketch.draws, 2);
        assert_eq!(sketch.cleanups, 1);
        assert_eq!(fl.frame_count(), 2);
    }

    #[test]
    fn alt_f4_quits_and_alt_enter_toggles_fullscreen_once() {
        let mut fl = frame_loop(&CanvasConfig::new(320, 240));
        let key = |code: KeyCode, repeat: bool| PlatformEvent::Key {
            code,
            pressed: true,
            repeat,
            alt: true,
        };
        fl.platform_mut().push_frame(
            ScriptedFrame::new()
                .event(key(Key::Enter.code(), false))
                .event(key(Key::Enter.code(), true)),
        );
        fl.platform_mut()
            .push_frame(ScriptedFrame::new().event(key(Key::F4.code(), false)));

        let mut sketch = Counter::default();
        fl.run(&mut sketch).unwrap();
        assert_eq!(fl.platform().fullscreen_toggles, 1);
        assert_eq!(sketch.draws, 2);
    }

    #[test]
    fn resize_reapplies_projection_and_rescales_mouse() {
        let mut fl = frame_loop(&CanvasConfig::new(320, 240));
        fl.platform_mut().push_frame(
            ScriptedFrame::new()
                .event(PlatformEvent::Resized { width: 640, height: 480 })
                .cursor(100, 300),
        );

        let mut sketch = Counter::default();
        fl.step(&mut sketch).unwrap();

        assert_eq!(fl.renderer().surface_size, (640, 480));
        assert_eq!(fl.renderer().canvas.physical_width, 640);
        assert_eq!(fl.input().mouse_position(), (50, 150));
    }

    #[test]
    fn mouse_events_and_wheel_are_per_frame() {
        let mut fl = frame_loop(&CanvasConfig::new(320, 240));
        fl.platform_mut().push_frame(
            ScriptedFrame::new()
                .event(PlatformEvent::MouseButton { button: MouseButton::Left, pressed: true })
                .event(PlatformEvent::MouseWheel { notches: 1 })
                .event(PlatformEvent::MouseWheel { notches: 2 }),
        );
        fl.platform_mut().push_frame(ScriptedFrame::new());

        let mut sketch = Counter::default();
        fl.step(&mut sketch).unwrap();
        assert!(fl.input().mouse_clicked(MouseButton::Left));
        assert!(fl.input().mouse_held(MouseButton::Left));
        assert_eq!(fl.input().mouse_wheel(), 3);

        fl.step(&mut sketch).unwrap();
        assert!(fl.input().mouse_held(MouseButton::Left));
        assert!(!fl.input().mouse_clicked(MouseButton::Left));
        assert_eq!(fl.input().mouse_wheel(), 0);
    }

    #[test]
    fn focus_loss_releases_mouse_buttons() {
        let mut fl = frame_loop(&CanvasConfig::new(320, 240));
        fl.platform_mut().push_frame(
            ScriptedFrame::new()
                .event(PlatformEvent::MouseButton { button: MouseButton::Left, pressed: true })
                .event(PlatformEvent::MouseButton { button: MouseButton::Right, pressed: true }),
        );
        fl.platform_mut()
            .push_frame(ScriptedFrame::new().event(PlatformEvent::Focused(false)));

        let mut sketch = Counter::default();
        fl.step(&mut sketch).unwrap();
        assert!(fl.input().mouse_down(MouseButton::Right));

        fl.step(&mut sketch).unwrap();
        assert!(!fl.input().mouse_down(MouseButton::Left));
        assert!(fl.input().mouse_released(MouseButton::Left));
        assert!(fl.input().mouse_released(MouseButton::Right));
    }

    #[test]
    fn fatal_present_stops_and_still_cleans_up() {
        let mut fl = frame_loop(&CanvasConfig::new(320, 240));
        fl.renderer_mut().fail_presents("out of memory");

        let mut sketch = Counter::default();
        let err = fl.run(&mut sketch).unwrap_err();
        assert!(matches!(err, FatalError::Surface(_)));
        assert_eq!(sketch.draws, 1);
        assert_eq!(sketch.cleanups, 1);
        assert_eq!(fl.frame_count(), 0);
    }

    #[test]
    fn transform_is_reset_between_frames() {
        struct Pusher;
        impl Sketch for Pusher {
            fn draw(&mut self, ctx: &mut Context<'_>) {
                ctx.push_matrix();
                ctx.translate(10.0, 0.0);
            }
        }

        let mut fl = frame_loop(&CanvasConfig::new(320, 240));
        fl.step(&mut Pusher).unwrap();
        fl.step(&mut Pusher).unwrap();
        assert_eq!(fl.renderer().current_matrix_depth(), 1);
    }
}
