use std::ops::ControlFlow;

use crate::config::ConfigHandle;
use crate::foundation::error::{TrailError, TrailResult};
use crate::history::buffer::HistoryBuffer;
use crate::history::sampler::sample_indices_into;
use crate::render::compositor::composite;
use crate::render::surface::OutputSurface;
use crate::session::scheduler::TickScheduler;
use crate::source::FrameSource;

/// Upper bound on slots allocated up front by [`RenderLoop::ready`]; longer trails grow on demand.
const MAX_PREALLOCATED_SLOTS: usize = 256;

/// Lifecycle of a [`RenderLoop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting for the host to signal that the source and surface are initialized.
    Idle,
    /// Producing one composited image per tick.
    Running,
}

/// What a single [`RenderLoop::tick`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// The loop has not been started; nothing happened.
    Idle,
    /// Capture failed (history untouched) or drawing failed; the loop carries on next tick.
    Skipped {
        /// Human-readable failure cause.
        reason: String,
    },
    /// A new frame was captured and the surface now shows the composite.
    Rendered(TickStats),
}

/// Bookkeeping for a rendered tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickStats {
    /// 0-based index of this tick since the loop started running.
    pub tick: u64,
    /// History capacity derived from the tick's configuration.
    pub capacity: usize,
    /// Retained history frames after eviction.
    pub history_len: usize,
    /// Configured slice count.
    pub slice_count: usize,
    /// History indices sampled this tick.
    pub samples: usize,
    /// Layers drawn, including the live frame.
    pub layers: usize,
    /// Blend weight used for every layer.
    pub alpha: f32,
}

/// Drives capture, history maintenance, sampling and compositing once per tick.
///
/// The loop owns every piece of mutable state it touches (history, sample scratch, surface). The
/// only state shared with the outside is the [`ConfigHandle`], read once at the top of each tick.
/// Ticks never overlap; the host decides when the next one runs.
pub struct RenderLoop<Src, Surf> {
    source: Src,
    surface: Surf,
    config: ConfigHandle,
    history: HistoryBuffer,
    indices: Vec<usize>,
    state: LoopState,
    ticks: u64,
}

impl<Src, Surf> RenderLoop<Src, Surf>
where
    Src: FrameSource,
    Surf: OutputSurface,
{
    /// Create an idle loop. History frames are captured at the surface's resolution.
    pub fn new(source: Src, surface: Surf, config: ConfigHandle) -> Self {
        let history = HistoryBuffer::new(surface.resolution());
        Self {
            source,
            surface,
            config,
            history,
            indices: Vec::new(),
            state: LoopState::Idle,
            ticks: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Buffered history, oldest first.
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Output surface.
    pub fn surface(&self) -> &Surf {
        &self.surface
    }

    /// Mutable output surface, for hosts that resize it before calling [`RenderLoop::ready`].
    pub fn surface_mut(&mut self) -> &mut Surf {
        &mut self.surface
    }

    /// Frame source.
    pub fn source(&self) -> &Src {
        &self.source
    }

    /// Configuration handle shared with controls.
    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    /// Ticks run since the loop entered [`LoopState::Running`].
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Host signal that the source and surface are initialized: Idle to Running.
    ///
    /// The history ring is preallocated at the surface's resolution for the current capacity, up to
    /// a fixed slot budget.
    /// Fails with [`TrailError::SourceUnavailable`] while the source is not ready, leaving the loop
    /// idle so the host can retry. Calling it again once running is a no-op.
    pub fn ready(&mut self) -> TrailResult<()> {
        if self.state == LoopState::Running {
            return Ok(());
        }
        if !self.source.is_ready() {
            return Err(TrailError::source_unavailable(
                "frame source is not ready yet",
            ));
        }

        let resolution = self.surface.resolution();
        let slots = self
            .config
            .snapshot()
            .capacity()
            .saturating_add(1)
            .min(MAX_PREALLOCATED_SLOTS);
        self.history = HistoryBuffer::with_preallocated(resolution, slots);
        self.state = LoopState::Running;
        tracing::info!(%resolution, slots, "render loop running");
        Ok(())
    }

    /// Run one iteration: snapshot config, capture, evict, sample, composite.
    ///
    /// Never fails: a capture or draw error is logged and reported as [`TickOutcome::Skipped`].
    #[tracing::instrument(level = "debug", skip(self), fields(tick = self.ticks))]
    pub fn tick(&mut self) -> TickOutcome {
        if self.state == LoopState::Idle {
            return TickOutcome::Idle;
        }
        let tick = self.ticks;
        self.ticks += 1;

        let cfg = self.config.snapshot();
        let capacity = cfg.capacity();
        let slice_count = cfg.slice_count as usize;
        let resolution = self.surface.resolution();

        let source = &mut self.source;
        if let Err(err) = self
            .history
            .push_with(|slot| source.capture_into(resolution, slot))
        {
            tracing::warn!(error = %err, "capture failed, skipping tick");
            return TickOutcome::Skipped {
                reason: err.to_string(),
            };
        }
        self.history.enforce_capacity(capacity);

        sample_indices_into(self.history.len(), slice_count, &mut self.indices);

        let Some(live) = self.history.newest() else {
            return TickOutcome::Skipped {
                reason: "history is empty after capture".to_string(),
            };
        };
        let composited = match composite(
            &self.history,
            &self.indices,
            live,
            &mut self.surface,
            slice_count,
        ) {
            Ok(c) => c,
            Err(err) => {
                tracing::warn!(error = %err, "composite failed, skipping tick");
                return TickOutcome::Skipped {
                    reason: err.to_string(),
                };
            }
        };

        let stats = TickStats {
            tick,
            capacity,
            history_len: self.history.len(),
            slice_count,
            samples: self.indices.len(),
            layers: composited.layers,
            alpha: composited.alpha,
        };
        tracing::debug!(
            history_len = stats.history_len,
            capacity,
            slice_count,
            samples = stats.samples,
            "tick rendered"
        );
        TickOutcome::Rendered(stats)
    }

    /// Hand the loop to `scheduler`, calling `host` after every tick.
    ///
    /// `host` sees the loop and the tick's outcome and decides whether another tick is requested.
    pub fn drive<Sch, H>(&mut self, scheduler: &mut Sch, mut host: H)
    where
        Sch: TickScheduler + ?Sized,
        H: FnMut(&Self, &TickOutcome) -> ControlFlow<()>,
    {
        scheduler.run(&mut || {
            let outcome = self.tick();
            host(&*self, &outcome)
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_loop.rs"]
mod tests;
