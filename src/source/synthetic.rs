use crate::foundation::core::{Frame, Resolution};
use crate::foundation::error::{TrailError, TrailResult};
use crate::source::FrameSource;

/// Generated source: a bright square orbiting over a dark gradient.
///
/// Output depends only on the capture count, so runs are reproducible. The top-left pixel's red
/// channel carries the capture counter modulo 256, which lets tests identify frames.
#[derive(Clone, Debug)]
pub struct SyntheticSource {
    warmup_polls: u32,
    attempts: u64,
    captured: u64,
    dropouts: Vec<u64>,
}

impl SyntheticSource {
    /// Source that is ready immediately.
    pub fn new() -> Self {
        Self {
            warmup_polls: 0,
            attempts: 0,
            captured: 0,
            dropouts: Vec::new(),
        }
    }

    /// Report not-ready for the first `polls` capture attempts.
    pub fn with_warmup(mut self, polls: u32) -> Self {
        self.warmup_polls = polls;
        self
    }

    /// Fail the post-warm-up capture attempts whose 0-based attempt numbers are listed.
    pub fn with_dropouts(mut self, attempts: impl IntoIterator<Item = u64>) -> Self {
        self.dropouts = attempts.into_iter().collect();
        self
    }

    /// Frames successfully produced so far.
    pub fn captured(&self) -> u64 {
        self.captured
    }

    fn paint(&self, out: &mut Frame) {
        let res = out.resolution();
        let (w, h) = (res.width as usize, res.height as usize);
        let t = self.captured as f64 * 0.08;
        let side = (w.min(h) / 4).max(1);
        let cx = ((t.cos() * 0.5 + 0.5) * (w - side) as f64) as usize;
        let cy = ((t.sin() * 0.5 + 0.5) * (h - side) as f64) as usize;

        let data = out.data_mut();
        for y in 0..h {
            for x in 0..w {
                let i = (y * w + x) * 4;
                let inside = x >= cx && x < cx + side && y >= cy && y < cy + side;
                let px = if inside {
                    [255, 214, 64, 255]
                } else {
                    let g = (24 + 40 * y / h.max(1)) as u8;
                    [g / 2, g / 2, g, 255]
                };
                data[i..i + 4].copy_from_slice(&px);
            }
        }
        data[0] = (self.captured % 256) as u8;
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for SyntheticSource {
    fn is_ready(&self) -> bool {
        self.warmup_polls == 0
    }

    fn capture_into(&mut self, resolution: Resolution, out: &mut Frame) -> TrailResult<()> {
        if self.warmup_polls > 0 {
            self.warmup_polls -= 1;
            return Err(TrailError::source_unavailable("synthetic source warming up"));
        }
        let attempt = self.attempts;
        self.attempts += 1;
        if self.dropouts.contains(&attempt) {
            return Err(TrailError::source_unavailable(format!(
                "synthetic dropout at attempt {attempt}"
            )));
        }

        out.reset(resolution);
        self.paint(out);
        self.captured += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/synthetic.rs"]
mod tests;
