//! Compute-module ABI.
//!
//! The compute module owns simulation, game logic and distance-field generation. The
//! host reaches it only through the entry points below and the shared linear memory it
//! exposes. [`WasmComputeModule`] is the production binding; tests substitute a
//! recording implementation.

mod wasm;

use anyhow::Result;

pub use wasm::WasmComputeModule;

/// Export names the host resolves on a compute module.
pub mod exports {
    pub const MEMORY_IMPORT_MODULE: &str = "env";
    pub const MEMORY_IMPORT_NAME: &str = "memory";
    pub const MEMORY_EXPORT_NAME: &str = "memory";

    pub const SETUP: &str = "setup";
    pub const BIND: &str = "bind";
    pub const GET_FIXED_DATA_SIZE: &str = "getFixedDataSize";
    pub const GET_VARIABLE_DATA_SIZE: &str = "getVariableDataSize";
    pub const COMPUTE: &str = "compute";
    pub const SET_FPS: &str = "setFps";
    pub const KEY_PRESS: &str = "keyPress";
    pub const KEY_RELEASE: &str = "keyRelease";
    pub const KEY_RELEASE_ALL: &str = "keyReleaseAll";
    pub const MOUSE_BUTTON_PRESS: &str = "mouseButtonPress";
    pub const MOUSE_BUTTON_RELEASE: &str = "mouseButtonRelease";
    pub const MOUSE_BUTTON_RELEASE_ALL: &str = "mouseButtonReleaseAll";
    pub const MOUSE_MOVE: &str = "mouseMove";
    pub const MOUSE_SCROLL: &str = "mouseScroll";
}

/// Entry points of an external compute module.
///
/// Every call may fail (a trap in the module); callers propagate the error.
pub trait ComputeModule {
    /// One-time initialization, before the memory layout is established.
    fn setup(&mut self) -> Result<()>;

    /// Signals that the host has written the configuration header.
    fn bind(&mut self) -> Result<()>;

    /// Byte length of the fixed section.
    fn fixed_data_size(&mut self) -> Result<i32>;

    /// Byte length of the variable section.
    fn variable_data_size(&mut self) -> Result<i32>;

    /// Advances the simulation by one frame.
    fn compute(&mut self) -> Result<()>;

    /// Reports the elapsed time of the previous frame in seconds.
    fn set_fps(&mut self, delta_seconds: f64) -> Result<()>;

    fn key_press(&mut self, code: i32) -> Result<()>;
    fn key_release(&mut self, code: i32) -> Result<()>;
    fn key_release_all(&mut self) -> Result<()>;

    /// Coordinates are framebuffer pixels relative to the surface origin.
    fn mouse_button_press(&mut self, code: i32, x: i32, y: i32) -> Result<()>;
    fn mouse_button_release(&mut self, code: i32) -> Result<()>;
    fn mouse_button_release_all(&mut self) -> Result<()>;
    fn mouse_move(&mut self, x: i32, y: i32) -> Result<()>;
    fn mouse_scroll(&mut self, delta_y: f64) -> Result<()>;

    /// Shared linear memory.
    fn memory(&self) -> &[u8];
    fn memory_mut(&mut self) -> &mut [u8];
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    /// A module entry-point invocation, as observed by [`RecordingModule`].
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Setup,
        Bind { header: [u8; 16] },
        FixedDataSize,
        VariableDataSize,
        Compute,
        SetFps(f64),
        KeyPress(i32),
        KeyRelease(i32),
        KeyReleaseAll,
        MouseButtonPress(i32, i32, i32),
        MouseButtonRelease(i32),
        MouseButtonReleaseAll,
        MouseMove(i32, i32),
        MouseScroll(f64),
    }

    /// In-memory compute module that records every call.
    ///
    /// `compute` fills the variable section with the frame number so uploads can be
    /// checked for freshness.
    pub struct RecordingModule {
        pub calls: Vec<Call>,
        pub memory: Vec<u8>,
        pub fixed_size: i32,
        pub variable_size: i32,
        pub frames: u8,
        pub trap_on_compute: bool,
    }

    impl RecordingModule {
        pub fn new(memory_len: usize, fixed_size: i32, variable_size: i32) -> Self {
            Self {
                calls: Vec::new(),
                memory: vec![0; memory_len],
                fixed_size,
                variable_size,
                frames: 0,
                trap_on_compute: false,
            }
        }

        /// Calls other than the size queries, which the host may issue at will.
        pub fn entry_calls(&self) -> Vec<Call> {
            self.calls
                .iter()
                .filter(|c| !matches!(c, Call::FixedDataSize | Call::VariableDataSize))
                .cloned()
                .collect()
        }
    }

    impl ComputeModule for RecordingModule {
        fn setup(&mut self) -> Result<()> {
            self.calls.push(Call::Setup);
            Ok(())
        }

        fn bind(&mut self) -> Result<()> {
            let mut header = [0u8; 16];
            header.copy_from_slice(&self.memory[..16]);
            self.calls.push(Call::Bind { header });
            Ok(())
        }

        fn fixed_data_size(&mut self) -> Result<i32> {
            self.calls.push(Call::FixedDataSize);
            Ok(self.fixed_size)
        }

        fn variable_data_size(&mut self) -> Result<i32> {
            self.calls.push(Call::VariableDataSize);
            Ok(self.variable_size)
        }

        fn compute(&mut self) -> Result<()> {
            self.calls.push(Call::Compute);
            anyhow::ensure!(!self.trap_on_compute, "unreachable executed");
            self.frames = self.frames.wrapping_add(1);
            let start = self.fixed_size as usize;
            let end = (start + self.variable_size as usize).min(self.memory.len());
            let frame = self.frames;
            self.memory[start..end].fill(frame);
            Ok(())
        }

        fn set_fps(&mut self, delta_seconds: f64) -> Result<()> {
            self.calls.push(Call::SetFps(delta_seconds));
            Ok(())
        }

        fn key_press(&mut self, code: i32) -> Result<()> {
            self.calls.push(Call::KeyPress(code));
            Ok(())
        }

        fn key_release(&mut self, code: i32) -> Result<()> {
            self.calls.push(Call::KeyRelease(code));
            Ok(())
        }

        fn key_release_all(&mut self) -> Result<()> {
            self.calls.push(Call::KeyReleaseAll);
            Ok(())
        }

        fn mouse_button_press(&mut self, code: i32, x: i32, y: i32) -> Result<()> {
            self.calls.push(Call::MouseButtonPress(code, x, y));
            Ok(())
        }

        fn mouse_button_release(&mut self, code: i32) -> Result<()> {
            self.calls.push(Call::MouseButtonRelease(code));
            Ok(())
        }

        fn mouse_button_release_all(&mut self) -> Result<()> {
            self.calls.push(Call::MouseButtonReleaseAll);
            Ok(())
        }

        fn mouse_move(&mut self, x: i32, y: i32) -> Result<()> {
            self.calls.push(Call::MouseMove(x, y));
            Ok(())
        }

        fn mouse_scroll(&mut self, delta_y: f64) -> Result<()> {
            self.calls.push(Call::MouseScroll(delta_y));
            Ok(())
        }

        fn memory(&self) -> &[u8] {
            &self.memory
        }

        fn memory_mut(&mut self) -> &mut [u8] {
            &mut self.memory
        }
    }
}
