//! Host configuration.
//!
//! Plain structs with defaults; front ends (CLI, tests) fill them in.

use std::fmt;
use std::str::FromStr;

use crate::device::GpuInit;

/// Pixel dimensions of a render target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameDimensions {
    pub width: u32,
    pub height: u32,
}

impl FrameDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}

impl fmt::Display for FrameDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("expected WIDTHxHEIGHT with integers in 1..=2147483647, got `{0}`")]
pub struct ParseDimensionsError(String);

impl FromStr for FrameDimensions {
    type Err = ParseDimensionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDimensionsError(s.to_string());
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(err)?;
        let width: u32 = w.trim().parse().map_err(|_| err())?;
        let height: u32 = h.trim().parse().map_err(|_| err())?;
        // The module receives dimensions as i32 in the fixed header.
        let range = 1..=i32::MAX as u32;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(err());
        }
        Ok(Self { width, height })
    }
}

/// Startup configuration for a host instance.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Window title.
    pub title: String,

    /// Final framebuffer (and window) size.
    pub framebuffer: FrameDimensions,

    /// Working resolution of the distance-field and shadow textures.
    pub working: FrameDimensions,

    /// Shared linear memory size in 64 KiB WebAssembly pages.
    pub memory_pages: u32,

    pub gpu: GpuInit,
}

impl HostConfig {
    pub const DEFAULT_FRAMEBUFFER: FrameDimensions = FrameDimensions::new(640, 360);
    pub const DEFAULT_WORKING: FrameDimensions = FrameDimensions::new(160, 90);
    pub const DEFAULT_MEMORY_PAGES: u32 = 258;
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "sdfhost".to_string(),
            framebuffer: Self::DEFAULT_FRAMEBUFFER,
            working: Self::DEFAULT_WORKING,
            memory_pages: Self::DEFAULT_MEMORY_PAGES,
            gpu: GpuInit::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lowercase_separator() {
        assert_eq!("640x360".parse(), Ok(FrameDimensions::new(640, 360)));
    }

    #[test]
    fn parses_uppercase_separator_and_whitespace() {
        assert_eq!(" 160X90 ".parse(), Ok(FrameDimensions::new(160, 90)));
    }

    #[test]
    fn rejects_dimensions_that_overflow_the_header() {
        assert!("2147483648x360".parse::<FrameDimensions>().is_err());
        assert!("640x4294967295".parse::<FrameDimensions>().is_err());
        assert_eq!(
            "2147483647x1".parse(),
            Ok(FrameDimensions::new(2147483647, 1))
        );
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!("0x90".parse::<FrameDimensions>().is_err());
        assert!("160x".parse::<FrameDimensions>().is_err());
        assert!("160*90".parse::<FrameDimensions>().is_err());
        assert!("-1x5".parse::<FrameDimensions>().is_err());
    }

    #[test]
    fn display_matches_parse_format() {
        let dims = FrameDimensions::new(1280, 720);
        assert_eq!(dims.to_string(), "1280x720");
    }

    #[test]
    fn defaults_match_reference_resolutions() {
        let cfg = HostConfig::default();
        assert_eq!(cfg.framebuffer, FrameDimensions::new(640, 360));
        assert_eq!(cfg.working, FrameDimensions::new(160, 90));
        assert_eq!(cfg.memory_pages, 258);
    }
}
