use anyhow::Result;

use super::tables::{button_code, key_code};
use super::types::{Dispatch, InputEvent, RawButton};
use crate::compute::ComputeModule;

/// Forwards input to the compute module using the fixed code tables.
///
/// Holds no platform types. Unsupported keys and buttons are logged and dropped; only
/// failures inside the module itself are returned as errors.
#[derive(Debug, Default)]
pub struct InputDispatcher {
    dropped: u64,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events dropped because their identifier has no code.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Routes a translated platform event to the matching handler.
    pub fn dispatch(&mut self, module: &mut dyn ComputeModule, event: &InputEvent) -> Result<Dispatch> {
        match event {
            InputEvent::KeyDown(key) => self.on_key_down(module, key),
            InputEvent::KeyUp(key) => self.on_key_up(module, key),
            InputEvent::MouseDown { button, x, y } => self.on_mouse_down(module, *button, *x, *y),
            InputEvent::MouseUp { button } => self.on_mouse_up(module, *button),
            InputEvent::MouseMove { x, y } => self.on_mouse_move(module, *x, *y),
            InputEvent::MouseWheel { delta_y } => self.on_mouse_wheel(module, *delta_y),
            InputEvent::PointerEnter => Ok(self.on_pointer_enter()),
            InputEvent::PointerLeave => self.on_pointer_leave(module),
        }
    }

    pub fn on_key_down(&mut self, module: &mut dyn ComputeModule, raw_key: &str) -> Result<Dispatch> {
        let Some(code) = self.lookup_key(raw_key) else {
            return Ok(Dispatch::Dropped);
        };
        module.key_press(code)?;
        Ok(Dispatch::Forwarded)
    }

    pub fn on_key_up(&mut self, module: &mut dyn ComputeModule, raw_key: &str) -> Result<Dispatch> {
        let Some(code) = self.lookup_key(raw_key) else {
            return Ok(Dispatch::Dropped);
        };
        module.key_release(code)?;
        Ok(Dispatch::Forwarded)
    }

    pub fn on_mouse_down(
        &mut self,
        module: &mut dyn ComputeModule,
        raw_button: RawButton,
        x: i32,
        y: i32,
    ) -> Result<Dispatch> {
        let Some(code) = self.lookup_button(raw_button) else {
            return Ok(Dispatch::Dropped);
        };
        module.mouse_button_press(code, x, y)?;
        Ok(Dispatch::Forwarded)
    }

    pub fn on_mouse_up(&mut self, module: &mut dyn ComputeModule, raw_button: RawButton) -> Result<Dispatch> {
        let Some(code) = self.lookup_button(raw_button) else {
            return Ok(Dispatch::Dropped);
        };
        module.mouse_button_release(code)?;
        Ok(Dispatch::Forwarded)
    }

    pub fn on_mouse_move(&mut self, module: &mut dyn ComputeModule, x: i32, y: i32) -> Result<Dispatch> {
        module.mouse_move(x, y)?;
        Ok(Dispatch::Forwarded)
    }

    /// Forwards a wheel delta. The platform adapter consumes the event, so nothing
    /// else scrolls.
    pub fn on_mouse_wheel(&mut self, module: &mut dyn ComputeModule, delta_y: f64) -> Result<Dispatch> {
        module.mouse_scroll(delta_y)?;
        Ok(Dispatch::Forwarded)
    }

    /// Releases every button and key in the module.
    ///
    /// Releases that happen while the pointer or focus is elsewhere are never observed;
    /// this is the only recovery path for them.
    pub fn on_pointer_leave(&mut self, module: &mut dyn ComputeModule) -> Result<Dispatch> {
        module.mouse_button_release_all()?;
        module.key_release_all()?;
        Ok(Dispatch::Forwarded)
    }

    pub fn on_pointer_enter(&mut self) -> Dispatch {
        Dispatch::Ignored
    }

    fn lookup_key(&mut self, raw_key: &str) -> Option<i32> {
        let code = key_code(raw_key);
        if code.is_none() {
            log::warn!("unsupported key {raw_key:?}");
            self.dropped += 1;
        }
        code
    }

    fn lookup_button(&mut self, raw_button: RawButton) -> Option<i32> {
        let code = button_code(raw_button);
        if code.is_none() {
            log::warn!("unsupported mouse button {raw_button}");
            self.dropped += 1;
        }
        code
    }
}
