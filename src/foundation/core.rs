use crate::foundation::error::{TrailError, TrailResult};

/// Pixel dimensions of a frame or output surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Create a validated resolution with non-zero extents.
    pub fn new(width: u32, height: u32) -> TrailResult<Self> {
        if width == 0 || height == 0 {
            return Err(TrailError::validation(format!(
                "resolution must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels covered.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Byte length of a tightly packed RGBA8 bitmap at this resolution.
    pub fn rgba8_len(self) -> usize {
        self.pixel_count().saturating_mul(4)
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Whole frames per second assumed when converting a duration into a history capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FrameRate(pub u32);

impl FrameRate {
    /// Display-refresh rate most hosts tick at.
    pub const DEFAULT: Self = Self(60);

    /// Highest accepted rate. History capacity scales with it, so it stays bounded.
    pub const MAX: Self = Self(240);

    /// Create a validated frame rate in `1..=FrameRate::MAX`.
    pub fn new(fps: u32) -> TrailResult<Self> {
        if fps == 0 {
            return Err(TrailError::validation("frame rate must be > 0"));
        }
        if fps > Self::MAX.0 {
            return Err(TrailError::validation(format!(
                "frame rate must be <= {}, got {fps}",
                Self::MAX.0
            )));
        }
        Ok(Self(fps))
    }

    /// Duration of one tick in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        1.0 / f64::from(self.0)
    }

    /// Convert seconds to a frame count, rounding half away from zero.
    pub fn secs_to_frames_round(self, secs: f64) -> usize {
        (secs * f64::from(self.0)).round().max(0.0) as usize
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One captured bitmap: premultiplied RGBA8, tightly packed, row-major.
///
/// Frames are written once by a capture and only read afterwards. History slots reuse their pixel
/// storage through [`Frame::reset`] when a slot is recycled for a newer capture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    resolution: Resolution,
    data: Vec<u8>,
}

impl Frame {
    /// Allocate a fully transparent frame.
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            data: vec![0; resolution.rgba8_len()],
        }
    }

    /// Wrap existing premultiplied RGBA8 bytes.
    pub fn from_rgba8_premul(resolution: Resolution, data: Vec<u8>) -> TrailResult<Self> {
        if data.len() != resolution.rgba8_len() {
            return Err(TrailError::validation(format!(
                "frame data is {} bytes, expected {} for {resolution}",
                data.len(),
                resolution.rgba8_len()
            )));
        }
        Ok(Self { resolution, data })
    }

    /// Allocate a frame filled with one premultiplied pixel value.
    pub fn solid(resolution: Resolution, px: [u8; 4]) -> Self {
        let mut frame = Self::new(resolution);
        frame.fill(px);
        frame
    }

    /// Frame dimensions.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable pixel bytes, for sources writing a capture in place.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Read one pixel. Coordinates must be inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.resolution.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Overwrite every pixel with `px`.
    pub fn fill(&mut self, px: [u8; 4]) {
        for dst in self.data.chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }

    /// Re-dimension the frame, keeping the existing allocation when it is large enough.
    pub fn reset(&mut self, resolution: Resolution) {
        self.resolution = resolution;
        self.data.resize(resolution.rgba8_len(), 0);
    }
}

/// Convert straight-alpha RGBA8 pixels to premultiplied alpha.
pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Convert premultiplied RGBA8 pixels back to straight alpha.
pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
