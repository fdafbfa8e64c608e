//! Frame sources feeding the render loop.
//!
//! A source is polled once per tick. Capture writes into a caller-owned [`Frame`] so the history
//! ring can recycle slot storage between ticks.

use crate::foundation::core::{Frame, Resolution};
use crate::foundation::error::TrailResult;

/// Image directory source.
pub mod sequence;
/// Deterministic generated test pattern.
pub mod synthetic;

pub use sequence::ImageSequenceSource;
pub use synthetic::SyntheticSource;

/// Live video input the render loop captures from.
pub trait FrameSource {
    /// Whether the source can currently produce frames.
    fn is_ready(&self) -> bool;

    /// Capture the current frame at `resolution` into `out`.
    ///
    /// Fails with [`crate::TrailError::SourceUnavailable`] when no frame can be produced this tick.
    /// Must be bounded in cost relative to one display refresh.
    fn capture_into(&mut self, resolution: Resolution, out: &mut Frame) -> TrailResult<()>;
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn capture_into(&mut self, resolution: Resolution, out: &mut Frame) -> TrailResult<()> {
        (**self).capture_into(resolution, out)
    }
}
