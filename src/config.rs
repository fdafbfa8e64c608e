//! Trail configuration and the control handle external UI writes through.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use anyhow::Context;

use crate::foundation::core::FrameRate;
use crate::foundation::error::{TrailError, TrailResult};

/// Effect configuration, read fresh at the start of every tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrailConfig {
    /// Length of the trail in seconds.
    pub duration_secs: f64,
    /// Number of history slices drawn under the live frame.
    pub slice_count: u32,
    /// Tick rate assumed when sizing the history.
    pub frame_rate: FrameRate,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            duration_secs: 1.0,
            slice_count: 8,
            frame_rate: FrameRate::DEFAULT,
        }
    }
}

impl TrailConfig {
    /// Check value ranges.
    pub fn validate(&self) -> TrailResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(TrailError::validation(format!(
                "duration_secs must be a positive number, got {}",
                self.duration_secs
            )));
        }
        if self.slice_count == 0 {
            return Err(TrailError::validation("slice_count must be >= 1"));
        }
        FrameRate::new(self.frame_rate.0)?;
        Ok(())
    }

    /// History capacity in frames: `round(duration_secs * frame_rate)`, never below one.
    pub fn capacity(&self) -> usize {
        self.frame_rate
            .secs_to_frames_round(self.duration_secs)
            .max(1)
    }

    /// Load and validate a JSON configuration file. Missing fields take their defaults.
    pub fn from_json_path(path: &Path) -> TrailResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Ranges control input is clamped into.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConfigLimits {
    /// Shortest accepted trail.
    pub min_duration_secs: f64,
    /// Longest accepted trail.
    pub max_duration_secs: f64,
    /// Largest accepted slice count.
    pub max_slice_count: u32,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            min_duration_secs: 0.1,
            max_duration_secs: 10.0,
            max_slice_count: 32,
        }
    }
}

impl ConfigLimits {
    /// Clamp a requested duration into range. Non-finite input maps to the minimum.
    pub fn clamp_duration(&self, secs: f64) -> f64 {
        if secs.is_finite() {
            secs.clamp(self.min_duration_secs, self.max_duration_secs)
        } else {
            self.min_duration_secs
        }
    }

    /// Clamp a requested slice count into `[1, max_slice_count]`.
    pub fn clamp_slice_count(&self, count: u32) -> u32 {
        count.clamp(1, self.max_slice_count.max(1))
    }
}

#[derive(Debug)]
struct SharedConfig {
    duration_bits: AtomicU64,
    slice_count: AtomicU32,
    frame_rate: FrameRate,
    limits: ConfigLimits,
}

/// Shared, thread-safe view of the live configuration.
///
/// Controls call the setters at any time; the render loop calls [`ConfigHandle::snapshot`] once at
/// the top of each tick. Each field is stored in its own atomic, so a snapshot never observes a
/// torn value, although two fields set back to back may land in different ticks.
#[derive(Clone, Debug)]
pub struct ConfigHandle {
    shared: Arc<SharedConfig>,
}

impl ConfigHandle {
    /// Create a handle seeded from `initial`, clamped into `limits`.
    pub fn new(initial: TrailConfig, limits: ConfigLimits) -> TrailResult<Self> {
        initial.validate()?;
        let duration = limits.clamp_duration(initial.duration_secs);
        let slices = limits.clamp_slice_count(initial.slice_count);
        Ok(Self {
            shared: Arc::new(SharedConfig {
                duration_bits: AtomicU64::new(duration.to_bits()),
                slice_count: AtomicU32::new(slices),
                frame_rate: initial.frame_rate,
                limits,
            }),
        })
    }

    /// Limits applied by the setters.
    pub fn limits(&self) -> ConfigLimits {
        self.shared.limits
    }

    /// Set the trail duration; returns the clamped value stored.
    pub fn set_duration_secs(&self, secs: f64) -> f64 {
        let clamped = self.shared.limits.clamp_duration(secs);
        self.shared
            .duration_bits
            .store(clamped.to_bits(), Ordering::Relaxed);
        tracing::info!(duration_secs = clamped, "trail duration updated");
        clamped
    }

    /// Set the slice count; returns the clamped value stored.
    pub fn set_slice_count(&self, count: u32) -> u32 {
        let clamped = self.shared.limits.clamp_slice_count(count);
        self.shared.slice_count.store(clamped, Ordering::Relaxed);
        tracing::info!(slice_count = clamped, "slice count updated");
        clamped
    }

    /// Read the current configuration.
    pub fn snapshot(&self) -> TrailConfig {
        TrailConfig {
            duration_secs: f64::from_bits(self.shared.duration_bits.load(Ordering::Relaxed)),
            slice_count: self.shared.slice_count.load(Ordering::Relaxed),
            frame_rate: self.shared.frame_rate,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
