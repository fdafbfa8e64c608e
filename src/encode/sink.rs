use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::{Frame, FrameRate, Resolution, unpremultiply_rgba8_in_place};
use crate::foundation::error::{TrailError, TrailResult};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkConfig {
    /// Output resolution.
    pub resolution: Resolution,
    /// Nominal tick rate of the producing loop.
    pub frame_rate: FrameRate,
}

/// Consumer of composited frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing tick numbers between one
/// `begin` and the matching `end`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> TrailResult<()>;
    /// Push the composite produced by tick `tick`.
    fn push_frame(&mut self, tick: u64, frame: &Frame) -> TrailResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> TrailResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, Frame)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames in push order.
    pub fn frames(&self) -> &[(u64, Frame)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> TrailResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, tick: u64, frame: &Frame) -> TrailResult<()> {
        self.frames.push((tick, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> TrailResult<()> {
        Ok(())
    }
}

/// Writes each pushed frame as `frame_NNNNNN.png` (straight alpha) into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    scratch: Vec<u8>,
    written: Vec<PathBuf>,
    last_tick: Option<u64>,
}

impl PngSequenceSink {
    /// Create a sink writing into `dir`; the directory is created on `begin`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            scratch: Vec::new(),
            written: Vec::new(),
            last_tick: None,
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in push order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> TrailResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.written.clear();
        self.last_tick = None;
        tracing::info!(dir = %self.dir.display(), resolution = %cfg.resolution, "png sink opened");
        Ok(())
    }

    fn push_frame(&mut self, tick: u64, frame: &Frame) -> TrailResult<()> {
        if self.last_tick.is_some_and(|last| tick <= last) {
            return Err(TrailError::encode(format!(
                "tick {tick} pushed out of order"
            )));
        }

        self.scratch.clear();
        self.scratch.extend_from_slice(frame.data());
        unpremultiply_rgba8_in_place(&mut self.scratch);

        let res = frame.resolution();
        let path = self.dir.join(format!("frame_{tick:06}.png"));
        image::save_buffer_with_format(
            &path,
            &self.scratch,
            res.width,
            res.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;

        self.written.push(path);
        self.last_tick = Some(tick);
        Ok(())
    }

    fn end(&mut self) -> TrailResult<()> {
        tracing::info!(frames = self.written.len(), "png sink closed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
