use std::sync::Arc;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::core::FatalError;
use crate::input::platform::winit::{translate_window_event, KeyTracker, WheelAccumulator};
use crate::input::{PlatformEvent, RawGamepad, RawKeyboard};

use super::platform::Platform;

/// Startup pumps allowed before giving up on window creation.
const STARTUP_PUMPS: u32 = 500;
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

/// Window parameters for [`WinitPlatform::new`].
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    /// Logical size of the client area.
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

/// Desktop platform backed by a winit window.
///
/// The event loop is pumped with a zero timeout once per frame, so the frame
/// loop never blocks on input.
pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    handler: Handler,
    window: Arc<Window>,
}

impl WinitPlatform {
    /// Creates the event loop and the window, pumping until the window exists.
    pub fn new(config: &WindowConfig) -> Result<Self, FatalError> {
        let mut event_loop =
            EventLoop::new().map_err(|e| FatalError::EventLoop(e.to_string()))?;

        let mut attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64));
        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let mut handler = Handler::new(attrs);

        for _ in 0..STARTUP_PUMPS {
            let status = event_loop.pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut handler);
            if let Some(err) = handler.creation_error.take() {
                return Err(FatalError::WindowCreation(err));
            }
            if handler.window.is_some() {
                break;
            }
            if let PumpStatus::Exit(code) = status {
                return Err(FatalError::EventLoop(format!(
                    "event loop exited during startup (code {code})"
                )));
            }
        }

        let window = handler
            .window
            .clone()
            .ok_or_else(|| FatalError::WindowCreation("window was not created".to_string()))?;

        log::info!(
            "window created: {:?}, {}x{} physical",
            config.title,
            handler.size.0,
            handler.size.1
        );

        Ok(Self {
            event_loop,
            handler,
            window,
        })
    }

    /// Shared handle used to create the render surface.
    pub fn window(&self) -> Arc<Window> {
        self.window.clone()
    }
}

impl Platform for WinitPlatform {
    fn poll_events(&mut self, out: &mut Vec<PlatformEvent>) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);
        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited (code {code})");
            self.handler.events.push(PlatformEvent::CloseRequested);
        }
        out.append(&mut self.handler.events);
    }

    fn keyboard_state(&self, keys: &mut RawKeyboard) {
        *keys = *self.handler.keys.table();
    }

    fn cursor_position(&self) -> (i32, i32) {
        self.handler.cursor
    }

    fn gamepad_state(&mut self) -> Option<RawGamepad> {
        #[cfg(feature = "gamepad")]
        {
            self.handler.gamepad.as_mut().and_then(|g| g.poll())
        }
        #[cfg(not(feature = "gamepad"))]
        {
            None
        }
    }

    fn physical_size(&self) -> (u32, u32) {
        let s = self.window.inner_size();
        (s.width, s.height)
    }

    fn refresh_rate_hz(&self) -> Option<u32> {
        let mhz = self.window.current_monitor()?.refresh_rate_millihertz()?;
        Some((mhz + 500) / 1000)
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn toggle_fullscreen(&mut self) {
        if self.window.fullscreen().is_some() {
            log::info!("leaving fullscreen");
            self.window.set_fullscreen(None);
        } else {
            log::info!("entering fullscreen");
            self.window
                .set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }
}

/// winit callback target; accumulates state between pumps.
struct Handler {
    attrs: WindowAttributes,
    window: Option<Arc<Window>>,
    creation_error: Option<String>,

    events: Vec<PlatformEvent>,
    keys: KeyTracker,
    wheel: WheelAccumulator,
    cursor: (i32, i32),
    alt: bool,
    size: (u32, u32),

    #[cfg(feature = "gamepad")]
    gamepad: Option<gamepad::GamepadSource>,
}

impl Handler {
    fn new(attrs: WindowAttributes) -> Self {
        Self {
            attrs,
            window: None,
            creation_error: None,
            events: Vec::new(),
            keys: KeyTracker::default(),
            wheel: WheelAccumulator::default(),
            cursor: (0, 0),
            alt: false,
            size: (0, 0),
            #[cfg(feature = "gamepad")]
            gamepad: gamepad::GamepadSource::new(),
        }
    }

    fn track_state(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::ModifiersChanged(m) => {
                self.alt = m.state().alt_key();
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x.floor() as i32, position.y.floor() as i32);
            }

            WindowEvent::Focused(false) => {
                self.keys.clear();
                self.wheel = WheelAccumulator::default();
                self.alt = false;
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.keys
                    .key_event(event.physical_key, event.state == ElementState::Pressed);
            }

            WindowEvent::Resized(size) => {
                self.size = (size.width, size.height);
            }

            _ => {}
        }
    }
}

impl ApplicationHandler for Handler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(self.attrs.clone()) {
            Ok(window) => {
                let size = window.inner_size();
                self.size = (size.width, size.height);
                self.window = Some(Arc::new(window));
            }
            Err(e) => {
                log::error!("failed to create window: {e}");
                self.creation_error = Some(e.to_string());
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.track_state(&event);

        if let Some(ev) = translate_window_event(&event, self.alt, &mut self.wheel) {
            self.events.push(ev);
        }
    }
}

#[cfg(feature = "gamepad")]
mod gamepad {
    use gilrs::{Axis, Button, Gilrs};

    use crate::input::{GamepadButton, RawGamepad, GAMEPAD_BUTTON_COUNT};

    /// First connected controller, read through gilrs.
    pub(super) struct GamepadSource {
        gilrs: Gilrs,
    }

    impl GamepadSource {
        pub(super) fn new() -> Option<Self> {
            match Gilrs::new() {
                Ok(gilrs) => Some(Self { gilrs }),
                Err(e) => {
                    log::warn!("gamepad support unavailable: {e}");
                    None
                }
            }
        }

        pub(super) fn poll(&mut self) -> Option<RawGamepad> {
            // Drain events so the cached gamepad state is current.
            while self.gilrs.next_event().is_some() {}

            let (_, pad) = self.gilrs.gamepads().find(|(_, g)| g.is_connected())?;

            let axis = |a: Axis| (pad.value(a).clamp(-1.0, 1.0) * 32767.0) as i16;
            let trigger = |b: Button| {
                let v = pad.button_data(b).map(|d| d.value()).unwrap_or(0.0);
                (v.clamp(0.0, 1.0) * 255.0).round() as u8
            };

            let mut buttons = [false; GAMEPAD_BUTTON_COUNT];
            for b in GamepadButton::ALL {
                buttons[b.index()] = pad.is_pressed(map_button(b));
            }

            Some(RawGamepad {
                left_stick: (axis(Axis::LeftStickX), axis(Axis::LeftStickY)),
                right_stick: (axis(Axis::RightStickX), axis(Axis::RightStickY)),
                left_trigger: trigger(Button::LeftTrigger2),
                right_trigger: trigger(Button::RightTrigger2),
                buttons,
            })
        }
    }

    fn map_button(b: GamepadButton) -> Button {
        match b {
            GamepadButton::Up => Button::DPadUp,
            GamepadButton::Down => Button::DPadDown,
            GamepadButton::Left => Button::DPadLeft,
            GamepadButton::Right => Button::DPadRight,
            GamepadButton::Start => Button::Start,
            GamepadButton::Back => Button::Select,
            GamepadButton::LeftThumb => Button::LeftThumb,
            GamepadButton::RightThumb => Button::RightThumb,
            GamepadButton::LeftShoulder => Button::LeftTrigger,
            GamepadButton::RightShoulder => Button::RightTrigger,
            GamepadButton::A => Button::South,
            GamepadButton::B => Button::East,
            GamepadButton::X => Button::West,
            GamepadButton::Y => Button::North,
        }
    }
}
