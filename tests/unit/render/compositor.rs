use super::*;
use crate::foundation::core::Resolution;
use crate::render::surface::CpuSurface;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear,
    Alpha(f32),
    Draw { tag: u8, alpha: f32 },
}

struct RecordingSurface {
    alpha: f32,
    calls: Vec<Call>,
}

impl RecordingSurface {
    fn new() -> Self {
        Self {
            alpha: 1.0,
            calls: Vec::new(),
        }
    }
}

impl OutputSurface for RecordingSurface {
    fn resolution(&self) -> Resolution {
        res()
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn global_alpha(&self) -> f32 {
        self.alpha
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.calls.push(Call::Alpha(alpha));
    }

    fn draw_frame(&mut self, frame: &Frame) -> TrailResult<()> {
        self.calls.push(Call::Draw {
            tag: frame.pixel(0, 0)[0],
            alpha: self.alpha,
        });
        Ok(())
    }
}

fn res() -> Resolution {
    Resolution::new(2, 2).unwrap()
}

fn tagged(tag: u8) -> Frame {
    Frame::solid(res(), [tag, 0, 0, 255])
}

fn history(tags: &[u8]) -> HistoryBuffer {
    let mut h = HistoryBuffer::new(res());
    for &t in tags {
        h.push(tagged(t));
    }
    h
}

#[test]
fn empty_history_is_a_noop() {
    let h = history(&[]);
    let mut s = RecordingSurface::new();
    let stats = composite(&h, &[], &tagged(9), &mut s, 4).unwrap();
    assert_eq!(stats.layers, 0);
    assert!(s.calls.is_empty());
}

#[test]
fn empty_history_leaves_cpu_surface_pixels() {
    let h = history(&[]);
    let mut s = CpuSurface::new(res());
    s.draw_frame(&tagged(77)).unwrap();
    composite(&h, &[], &tagged(9), &mut s, 4).unwrap();
    assert_eq!(s.pixels().pixel(0, 0), [77, 0, 0, 255]);
}

#[test]
fn draws_slices_oldest_first_then_live_at_shared_alpha() {
    let h = history(&[10, 11, 12, 13, 14]);
    let mut s = RecordingSurface::new();
    let stats = composite(&h, &[0, 2, 4], &tagged(99), &mut s, 3).unwrap();

    assert_eq!(stats.layers, 4);
    assert_eq!(stats.alpha, 0.25);
    assert_eq!(
        s.calls,
        vec![
            Call::Clear,
            Call::Alpha(0.25),
            Call::Draw { tag: 10, alpha: 0.25 },
            Call::Draw { tag: 12, alpha: 0.25 },
            Call::Draw { tag: 14, alpha: 0.25 },
            Call::Draw { tag: 99, alpha: 0.25 },
            Call::Alpha(1.0),
        ]
    );
}

#[test]
fn alpha_follows_configured_slice_count_not_samples() {
    // A single buffered frame yields no samples; only the live frame is drawn.
    let h = history(&[1]);
    let mut s = RecordingSurface::new();
    let stats = composite(&h, &[], &tagged(1), &mut s, 7).unwrap();
    assert_eq!(stats.layers, 1);
    assert_eq!(s.calls[1], Call::Alpha(slice_alpha(7)));
    assert_eq!(slice_alpha(7), 0.125);
    assert_eq!(s.global_alpha(), 1.0);
}

#[test]
fn repeated_indices_are_drawn_each_time() {
    let h = history(&[5, 6, 7]);
    let mut s = RecordingSurface::new();
    composite(&h, &[0, 1, 1, 2, 2], &tagged(8), &mut s, 5).unwrap();
    let draws = s
        .calls
        .iter()
        .filter(|c| matches!(c, Call::Draw { .. }))
        .count();
    assert_eq!(draws, 6);
}

#[test]
#[should_panic(expected = "out of range")]
fn out_of_range_index_is_a_caller_bug() {
    let h = history(&[1, 2, 3]);
    let mut s = RecordingSurface::new();
    let _ = composite(&h, &[0, 3], &tagged(4), &mut s, 2);
}

#[test]
fn cpu_surface_alpha_is_restored() {
    let h = history(&[200, 200]);
    let mut s = CpuSurface::new(res());
    composite(&h, &[0, 1], &tagged(200), &mut s, 2).unwrap();
    assert_eq!(s.global_alpha(), 1.0);
    let px = s.pixels().pixel(0, 0);
    assert!(px[3] > 0 && px[3] < 255);
}
