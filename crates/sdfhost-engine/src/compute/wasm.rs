use std::path::Path;

use anyhow::{Context, Result};
use wasmtime::{
    Engine, Instance, Linker, Memory, MemoryType, Module, Store, TypedFunc, WasmParams, WasmResults,
};

use super::{exports, ComputeModule};
use crate::error::HostError;

/// Single-float entry point; modules built from different toolchains export either width.
enum FloatFn {
    F32(TypedFunc<f32, ()>),
    F64(TypedFunc<f64, ()>),
}

impl FloatFn {
    fn resolve(instance: &Instance, store: &mut Store<()>, name: &'static str) -> Result<Self> {
        if let Ok(f) = instance.get_typed_func::<f32, ()>(&mut *store, name) {
            return Ok(Self::F32(f));
        }
        instance
            .get_typed_func::<f64, ()>(&mut *store, name)
            .map(Self::F64)
            .map_err(|_| HostError::MissingExport { name }.into())
    }

    fn call(&self, store: &mut Store<()>, value: f64) -> wasmtime::Result<()> {
        match self {
            Self::F32(f) => f.call(store, value as f32),
            Self::F64(f) => f.call(store, value),
        }
    }
}

struct Exports {
    setup: TypedFunc<(), ()>,
    bind: TypedFunc<(), ()>,
    get_fixed_data_size: TypedFunc<(), i32>,
    get_variable_data_size: TypedFunc<(), i32>,
    compute: TypedFunc<(), ()>,
    set_fps: FloatFn,
    key_press: TypedFunc<i32, ()>,
    key_release: TypedFunc<i32, ()>,
    key_release_all: TypedFunc<(), ()>,
    mouse_button_press: TypedFunc<(i32, i32, i32), ()>,
    mouse_button_release: TypedFunc<i32, ()>,
    mouse_button_release_all: TypedFunc<(), ()>,
    mouse_move: TypedFunc<(i32, i32), ()>,
    mouse_scroll: FloatFn,
}

fn typed<P, R>(instance: &Instance, store: &mut Store<()>, name: &'static str) -> Result<TypedFunc<P, R>>
where
    P: WasmParams,
    R: WasmResults,
{
    instance
        .get_typed_func::<P, R>(&mut *store, name)
        .map_err(|_| HostError::MissingExport { name }.into())
}

impl Exports {
    fn resolve(instance: &Instance, store: &mut Store<()>) -> Result<Self> {
        Ok(Self {
            setup: typed(instance, store, exports::SETUP)?,
            bind: typed(instance, store, exports::BIND)?,
            get_fixed_data_size: typed(instance, store, exports::GET_FIXED_DATA_SIZE)?,
            get_variable_data_size: typed(instance, store, exports::GET_VARIABLE_DATA_SIZE)?,
            compute: typed(instance, store, exports::COMPUTE)?,
            set_fps: FloatFn::resolve(instance, store, exports::SET_FPS)?,
            key_press: typed(instance, store, exports::KEY_PRESS)?,
            key_release: typed(instance, store, exports::KEY_RELEASE)?,
            key_release_all: typed(instance, store, exports::KEY_RELEASE_ALL)?,
            mouse_button_press: typed(instance, store, exports::MOUSE_BUTTON_PRESS)?,
            mouse_button_release: typed(instance, store, exports::MOUSE_BUTTON_RELEASE)?,
            mouse_button_release_all: typed(instance, store, exports::MOUSE_BUTTON_RELEASE_ALL)?,
            mouse_move: typed(instance, store, exports::MOUSE_MOVE)?,
            mouse_scroll: FloatFn::resolve(instance, store, exports::MOUSE_SCROLL)?,
        })
    }
}

/// `wasmtime`-backed compute module.
///
/// ## Memory contract
///
/// The host creates a fixed-size linear memory (`min == max == memory_pages`) and
/// provides it as the `env.memory` import. A module that defines and exports its own
/// `memory` instead is also accepted; that export then becomes the shared region.
pub struct WasmComputeModule {
    store: Store<()>,
    memory: Memory,
    exports: Exports,
}

impl WasmComputeModule {
    /// Compiles and instantiates the module at `path`.
    pub fn from_file(path: &Path, memory_pages: u32) -> Result<Self> {
        let bytes = std::fs::read(path).with_context(|| HostError::ModuleLoad {
            path: path.to_path_buf(),
        })?;
        Self::from_bytes(&bytes, memory_pages).with_context(|| HostError::ModuleLoad {
            path: path.to_path_buf(),
        })
    }

    /// Compiles and instantiates a module from its binary encoding.
    pub fn from_bytes(wasm: &[u8], memory_pages: u32) -> Result<Self> {
        let engine = Engine::default();
        let mut store = Store::new(&engine, ());
        let mut linker: Linker<()> = Linker::new(&engine);

        let host_memory = Memory::new(&mut store, MemoryType::new(memory_pages, Some(memory_pages)))
            .context("failed to create shared memory")?;
        linker
            .define(
                &mut store,
                exports::MEMORY_IMPORT_MODULE,
                exports::MEMORY_IMPORT_NAME,
                host_memory,
            )
            .context("failed to define env.memory import")?;

        let module = Module::new(&engine, wasm).context("failed to compile compute module")?;
        let instance = linker
            .instantiate(&mut store, &module)
            .context("failed to instantiate compute module")?;

        let memory = instance
            .get_memory(&mut store, exports::MEMORY_EXPORT_NAME)
            .unwrap_or(host_memory);
        let exports = Exports::resolve(&instance, &mut store)?;

        log::debug!(
            "compute module instantiated: {} bytes of shared memory",
            memory.data_size(&store)
        );

        Ok(Self {
            store,
            memory,
            exports,
        })
    }
}

macro_rules! call_export {
    ($self:ident, $field:ident, $name:expr, $args:expr) => {
        $self
            .exports
            .$field
            .call(&mut $self.store, $args)
            .with_context(|| format!("compute module trapped in `{}`", $name))
    };
}

impl ComputeModule for WasmComputeModule {
    fn setup(&mut self) -> Result<()> {
        call_export!(self, setup, exports::SETUP, ())
    }

    fn bind(&mut self) -> Result<()> {
        call_export!(self, bind, exports::BIND, ())
    }

    fn fixed_data_size(&mut self) -> Result<i32> {
        call_export!(self, get_fixed_data_size, exports::GET_FIXED_DATA_SIZE, ())
    }

    fn variable_data_size(&mut self) -> Result<i32> {
        call_export!(self, get_variable_data_size, exports::GET_VARIABLE_DATA_SIZE, ())
    }

    fn compute(&mut self) -> Result<()> {
        call_export!(self, compute, exports::COMPUTE, ())
    }

    fn set_fps(&mut self, delta_seconds: f64) -> Result<()> {
        call_export!(self, set_fps, exports::SET_FPS, delta_seconds)
    }

    fn key_press(&mut self, code: i32) -> Result<()> {
        call_export!(self, key_press, exports::KEY_PRESS, code)
    }

    fn key_release(&mut self, code: i32) -> Result<()> {
        call_export!(self, key_release, exports::KEY_RELEASE, code)
    }

    fn key_release_all(&mut self) -> Result<()> {
        call_export!(self, key_release_all, exports::KEY_RELEASE_ALL, ())
    }

    fn mouse_button_press(&mut self, code: i32, x: i32, y: i32) -> Result<()> {
        call_export!(self, mouse_button_press, exports::MOUSE_BUTTON_PRESS, (code, x, y))
    }

    fn mouse_button_release(&mut self, code: i32) -> Result<()> {
        call_export!(self, mouse_button_release, exports::MOUSE_BUTTON_RELEASE, code)
    }

    fn mouse_button_release_all(&mut self) -> Result<()> {
        call_export!(self, mouse_button_release_all, exports::MOUSE_BUTTON_RELEASE_ALL, ())
    }

    fn mouse_move(&mut self, x: i32, y: i32) -> Result<()> {
        call_export!(self, mouse_move, exports::MOUSE_MOVE, (x, y))
    }

    fn mouse_scroll(&mut self, delta_y: f64) -> Result<()> {
        call_export!(self, mouse_scroll, exports::MOUSE_SCROLL, delta_y)
    }

    fn memory(&self) -> &[u8] {
        self.memory.data(&self.store)
    }

    fn memory_mut(&mut self) -> &mut [u8] {
        self.memory.data_mut(&mut self.store)
    }
}
