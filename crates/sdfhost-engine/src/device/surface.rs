use super::SurfaceErrorAction;

/// Picks the swapchain format from the formats the surface supports.
///
/// The first reported format is the platform's preferred one. sRGB variants are only
/// chosen when asked for.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = formats.first().copied()?;

    let preferred: &[wgpu::TextureFormat] = if prefer_srgb {
        &[
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ]
    } else {
        &[wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Rgba8Unorm]
    };

    preferred
        .iter()
        .copied()
        .find(|f| formats.contains(f))
        .or(Some(first))
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Surface configuration for a new window client size.
///
/// `None` when the size is zero (minimized) or unchanged. The composite pass draws a
/// full-screen quad, so the framebuffer image stretches to whatever size the window
/// manager grants.
pub(crate) fn resized_config(
    config: &wgpu::SurfaceConfiguration,
    width: u32,
    height: u32,
) -> Option<wgpu::SurfaceConfiguration> {
    if width == 0 || height == 0 || (config.width, config.height) == (width, height) {
        return None;
    }
    let mut next = config.clone();
    next.width = width;
    next.height = height;
    Some(next)
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            surface.configure(device, config);
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as F;

    #[test]
    fn empty_format_list_has_no_choice() {
        assert_eq!(choose_surface_format(&[], false), None);
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn linear_format_preferred_by_default() {
        let formats = [F::Bgra8UnormSrgb, F::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats, false), Some(F::Bgra8Unorm));
    }

    #[test]
    fn srgb_format_preferred_on_request() {
        let formats = [F::Rgba8Unorm, F::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(F::Rgba8UnormSrgb));
    }

    #[test]
    fn falls_back_to_first_reported_format() {
        let formats = [F::Rgb10a2Unorm, F::Rgba16Float];
        assert_eq!(choose_surface_format(&formats, false), Some(F::Rgb10a2Unorm));
    }

    fn config(width: u32, height: u32) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: F::Bgra8Unorm,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Opaque,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    #[test]
    fn resize_to_granted_size_reconfigures() {
        let next = resized_config(&config(640, 360), 1280, 700).unwrap();
        assert_eq!((next.width, next.height), (1280, 700));
        assert_eq!(next.format, F::Bgra8Unorm);
        assert_eq!(next.present_mode, wgpu::PresentMode::Fifo);
    }

    #[test]
    fn resize_to_same_or_empty_size_is_ignored() {
        assert!(resized_config(&config(640, 360), 640, 360).is_none());
        assert!(resized_config(&config(640, 360), 0, 360).is_none());
        assert!(resized_config(&config(640, 360), 640, 0).is_none());
    }
}
