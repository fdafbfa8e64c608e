use crate::foundation::core::{Frame, Resolution};
use crate::foundation::error::TrailResult;
use crate::render::blend::over_scaled_in_place;

/// Drawing target the compositor renders into.
///
/// Every draw covers the full surface extent and is blended source-over at the current global
/// alpha. The global alpha persists across draws until changed.
pub trait OutputSurface {
    /// Surface dimensions in pixels.
    fn resolution(&self) -> Resolution;
    /// Reset every pixel to transparent.
    fn clear(&mut self);
    /// Current global blend weight in `[0, 1]`.
    fn global_alpha(&self) -> f32;
    /// Set the global blend weight applied to subsequent draws.
    fn set_global_alpha(&mut self, alpha: f32);
    /// Draw `frame` stretched over the whole surface.
    fn draw_frame(&mut self, frame: &Frame) -> TrailResult<()>;
}

/// CPU raster surface holding premultiplied RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct CpuSurface {
    pixels: Frame,
    alpha: f32,
}

impl CpuSurface {
    /// Create a transparent surface at `resolution`.
    pub fn new(resolution: Resolution) -> Self {
        Self {
            pixels: Frame::new(resolution),
            alpha: 1.0,
        }
    }

    /// Resize the surface, discarding its contents.
    pub fn resize(&mut self, resolution: Resolution) {
        self.pixels.reset(resolution);
        self.pixels.fill([0, 0, 0, 0]);
    }

    /// Current surface contents.
    pub fn pixels(&self) -> &Frame {
        &self.pixels
    }
}

impl OutputSurface for CpuSurface {
    fn resolution(&self) -> Resolution {
        self.pixels.resolution()
    }

    fn clear(&mut self) {
        self.pixels.fill([0, 0, 0, 0]);
    }

    fn global_alpha(&self) -> f32 {
        self.alpha
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn draw_frame(&mut self, frame: &Frame) -> TrailResult<()> {
        let dst_res = self.pixels.resolution();
        over_scaled_in_place(
            self.pixels.data_mut(),
            dst_res,
            frame.data(),
            frame.resolution(),
            self.alpha,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
