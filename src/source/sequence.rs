use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::{Frame, Resolution, premultiply_rgba8_in_place};
use crate::foundation::error::{TrailError, TrailResult};
use crate::render::blend::resample_nearest;
use crate::source::FrameSource;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tga", "webp"];

/// Loops over a fixed set of pre-decoded images, one per capture.
///
/// All decoding happens up front in [`ImageSequenceSource::load_dir`]; capture is a bounded
/// resample into the target frame.
#[derive(Clone, Debug)]
pub struct ImageSequenceSource {
    frames: Vec<Frame>,
    cursor: usize,
}

impl ImageSequenceSource {
    /// Build a source from already decoded frames.
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Decode every image in `dir`, ordered by file name.
    #[tracing::instrument]
    pub fn load_dir(dir: &Path) -> TrailResult<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .with_context(|| format!("read image directory '{}'", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_image_extension(p))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(TrailError::validation(format!(
                "no images found in '{}'",
                dir.display()
            )));
        }

        let frames = paths
            .iter()
            .map(|p| decode_frame(p))
            .collect::<TrailResult<Vec<_>>>()?;
        tracing::info!(count = frames.len(), "loaded image sequence");
        Ok(Self::from_frames(frames))
    }

    /// Number of frames in the loop.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when the sequence holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Native resolution of the first frame.
    pub fn native_resolution(&self) -> Option<Resolution> {
        self.frames.first().map(Frame::resolution)
    }
}

impl FrameSource for ImageSequenceSource {
    fn is_ready(&self) -> bool {
        !self.frames.is_empty()
    }

    fn capture_into(&mut self, resolution: Resolution, out: &mut Frame) -> TrailResult<()> {
        let Some(src) = self.frames.get(self.cursor) else {
            return Err(TrailError::source_unavailable("image sequence is empty"));
        };
        out.reset(resolution);
        resample_nearest(out.data_mut(), resolution, src.data(), src.resolution());
        self.cursor = (self.cursor + 1) % self.frames.len();
        Ok(())
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

fn decode_frame(path: &Path) -> TrailResult<Frame> {
    let img = image::open(path).with_context(|| format!("decode image '{}'", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut data = rgba.into_raw();
    premultiply_rgba8_in_place(&mut data);
    Frame::from_rgba8_premul(Resolution::new(width, height)?, data)
}

#[cfg(test)]
#[path = "../../tests/unit/source/sequence.rs"]
mod tests;
