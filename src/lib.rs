//! trailfx renders a real-time motion trail: every tick it captures a frame from a live source,
//! keeps a bounded history of recent captures, and draws evenly spaced slices of that history
//! under the current frame with a shared blend weight.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: a [`ConfigHandle`] snapshot gives the trail duration and slice count.
//! 2. **Capture**: the [`FrameSource`] writes the live frame into a recycled [`HistoryBuffer`] slot.
//! 3. **Evict**: the history is trimmed to `round(duration * frame_rate)` frames, oldest first.
//! 4. **Sample**: [`sample_indices`] picks `slice_count` indices spanning the whole history.
//! 5. **Composite**: [`composite`] draws the slices and the live frame onto an [`OutputSurface`]
//!    at `1 / (slice_count + 1)` each.
//!
//! [`RenderLoop`] runs these steps once per tick; a [`TickScheduler`] decides when ticks happen.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded ticks**: the loop never spawns workers; only configuration crosses threads.
//! - **Premultiplied RGBA8** end-to-end: sources, history, and surfaces share one pixel format.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Trail configuration and live controls.
pub mod config;
/// Output sinks for composited frames.
pub mod encode;
/// Frame history and sampling.
pub mod history;
/// Compositing onto output surfaces.
pub mod render;
/// Render loop and scheduling.
pub mod session;
/// Frame sources.
pub mod source;

pub use config::{ConfigHandle, ConfigLimits, TrailConfig};
pub use encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use foundation::core::{
    Frame, FrameRate, Resolution, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place,
};
pub use foundation::error::{TrailError, TrailResult};
pub use history::buffer::HistoryBuffer;
pub use history::sampler::{sample_indices, sample_indices_into};
pub use render::compositor::{CompositeStats, composite, slice_alpha};
pub use render::surface::{CpuSurface, OutputSurface};
pub use session::render_loop::{LoopState, RenderLoop, TickOutcome, TickStats};
pub use session::scheduler::{IntervalScheduler, TickScheduler};
pub use source::{FrameSource, ImageSequenceSource, SyntheticSource};
