use std::path::{Path, PathBuf};

use super::PassKind;
use crate::error::HostError;

impl PassKind {
    /// File name the shader source is loaded from.
    pub fn shader_file(self) -> &'static str {
        match self {
            PassKind::Sdf => "sdf.wgsl",
            PassKind::SdfShadow => "sdf_shadow.wgsl",
            PassKind::Raster => "raster.wgsl",
            PassKind::Composite => "composite.wgsl",
        }
    }
}

/// WGSL sources for the four passes.
///
/// Sources are opaque: they are handed to wgpu untouched. Each must define `vs_main`
/// and `fs_main` and declare the bindings listed by [`PassKind::bindings`].
#[derive(Debug, Clone)]
pub struct ShaderSources {
    sources: [String; 4],
}

impl ShaderSources {
    /// Sources already in memory, e.g. embedded with `include_str!`.
    pub fn new(sdf: String, sdf_shadow: String, raster: String, composite: String) -> Self {
        Self {
            sources: [sdf, sdf_shadow, raster, composite],
        }
    }

    /// Loads every source from `dir` under its default file name.
    pub fn load_dir(dir: &Path) -> Result<Self, HostError> {
        Self::load_with(|pass| dir.join(pass.shader_file()))
    }

    /// Loads each pass's source from the path `path_for` returns. A missing, unreadable
    /// or empty file is fatal.
    pub fn load_with(path_for: impl Fn(PassKind) -> PathBuf) -> Result<Self, HostError> {
        let mut sources: [String; 4] = Default::default();
        for pass in PassKind::ORDER {
            let path = path_for(pass);
            let text = std::fs::read_to_string(&path).map_err(|source| HostError::ShaderLoad {
                name: pass.name(),
                path: path.clone(),
                source,
            })?;
            if text.trim().is_empty() {
                return Err(HostError::ShaderEmpty {
                    name: pass.name(),
                    path,
                });
            }
            log::debug!("loaded {} shader ({} bytes)", pass.name(), text.len());
            sources[pass.index()] = text;
        }
        Ok(Self { sources })
    }

    pub fn get(&self, pass: PassKind) -> &str {
        &self.sources[pass.index()]
    }
}
