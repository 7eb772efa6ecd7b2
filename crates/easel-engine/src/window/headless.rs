use std::collections::VecDeque;

use crate::input::{KeyCode, PlatformEvent, RawGamepad, RawKeyboard, RAW_KEY_COUNT};

use super::platform::Platform;

/// Input for one scripted frame.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrame {
    pub events: Vec<PlatformEvent>,
    /// Key codes held during this frame. `None` keeps the previous frame's keys.
    pub keys: Option<Vec<KeyCode>>,
    /// Cursor in physical pixels. `None` keeps the previous position.
    pub cursor: Option<(i32, i32)>,
    /// Gamepad reading. `None` keeps the previous reading (or absence).
    pub gamepad: Option<Option<RawGamepad>>,
}

impl ScriptedFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(mut self, event: PlatformEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn keys(mut self, keys: impl IntoIterator<Item = impl Into<KeyCode>>) -> Self {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn cursor(mut self, x: i32, y: i32) -> Self {
        self.cursor = Some((x, y));
        self
    }

    pub fn gamepad(mut self, pad: Option<RawGamepad>) -> Self {
        self.gamepad = Some(pad);
        self
    }
}

/// Platform that replays scripted input, one [`ScriptedFrame`] per
/// `poll_events` call. After the script runs out it reports no events and the
/// last sampled state.
#[derive(Debug)]
pub struct HeadlessPlatform {
    script: VecDeque<ScriptedFrame>,
    keys: RawKeyboard,
    cursor: (i32, i32),
    gamepad: Option<RawGamepad>,
    size: (u32, u32),
    refresh_hz: Option<u32>,
    pub title: String,
    pub fullscreen: bool,
    pub fullscreen_toggles: u32,
}

impl HeadlessPlatform {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            script: VecDeque::new(),
            keys: [false; RAW_KEY_COUNT],
            cursor: (0, 0),
            gamepad: None,
            size: (width, height),
            refresh_hz: None,
            title: String::new(),
            fullscreen: false,
            fullscreen_toggles: 0,
        }
    }

    pub fn with_refresh_rate(mut self, hz: u32) -> Self {
        self.refresh_hz = Some(hz);
        self
    }

    pub fn push_frame(&mut self, frame: ScriptedFrame) {
        self.script.push_back(frame);
    }

    pub fn remaining_frames(&self) -> usize {
        self.script.len()
    }
}

impl Platform for HeadlessPlatform {
    fn poll_events(&mut self, out: &mut Vec<PlatformEvent>) {
        let Some(frame) = self.script.pop_front() else {
            return;
        };

        if let Some(keys) = frame.keys {
            self.keys = [false; RAW_KEY_COUNT];
            for code in keys {
                if let Some(slot) = self.keys.get_mut(code.0 as usize) {
                    *slot = true;
                }
            }
        }
        if let Some(cursor) = frame.cursor {
            self.cursor = cursor;
        }
        if let Some(pad) = frame.gamepad {
            self.gamepad = pad;
        }
        for ev in &frame.events {
            if let PlatformEvent::Resized { width, height } = *ev {
                self.size = (width, height);
            }
        }
        out.extend(frame.events);
    }

    fn keyboard_state(&self, keys: &mut RawKeyboard) {
        *keys = self.keys;
    }

    fn cursor_position(&self) -> (i32, i32) {
        self.cursor
    }

    fn gamepad_state(&mut self) -> Option<RawGamepad> {
        self.gamepad
    }

    fn physical_size(&self) -> (u32, u32) {
        self.size
    }

    fn refresh_rate_hz(&self) -> Option<u32> {
        self.refresh_hz
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        self.fullscreen_toggles += 1;
    }
}
