use crate::config::FrameDimensions;

/// Pointer tracking needed to translate platform events.
///
/// winit reports button presses without a position, so the last cursor position is
/// kept here and attached to presses.
#[derive(Debug, Clone)]
pub struct PointerState {
    /// Render surface size in framebuffer pixels.
    framebuffer: FrameDimensions,

    /// Window client area in physical pixels.
    window: (u32, u32),

    /// Last cursor position in framebuffer pixels.
    position: Option<(i32, i32)>,
}

impl PointerState {
    pub fn new(framebuffer: FrameDimensions, window: (u32, u32)) -> Self {
        Self {
            framebuffer,
            window,
            position: None,
        }
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window = (width, height);
    }

    /// Records a cursor position given in window physical pixels and returns it in
    /// framebuffer pixels.
    pub fn moved_to(&mut self, x: f64, y: f64) -> (i32, i32) {
        let pos = self.to_framebuffer(x, y);
        self.position = Some(pos);
        pos
    }

    pub fn left(&mut self) {
        self.position = None;
    }

    /// Last known position, or the surface origin when the cursor has not been seen.
    pub fn position(&self) -> (i32, i32) {
        self.position.unwrap_or((0, 0))
    }

    fn to_framebuffer(&self, x: f64, y: f64) -> (i32, i32) {
        let scale = |v: f64, fb: u32, win: u32| {
            if win == 0 {
                return v.floor() as i32;
            }
            (v * fb as f64 / win as f64).floor() as i32
        };
        (
            scale(x, self.framebuffer.width, self.window.0),
            scale(y, self.framebuffer.height, self.window.1),
        )
    }
}
