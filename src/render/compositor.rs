use crate::foundation::core::Frame;
use crate::foundation::error::TrailResult;
use crate::history::buffer::HistoryBuffer;
use crate::render::surface::OutputSurface;

/// Per-slice blend weight for `slice_count` sampled layers plus the live layer.
pub fn slice_alpha(slice_count: usize) -> f32 {
    1.0 / (slice_count as f32 + 1.0)
}

/// Result of one [`composite`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CompositeStats {
    /// Layers drawn, history slices plus the live frame. Zero when the call was a no-op.
    pub layers: usize,
    /// Blend weight every layer was drawn with.
    pub alpha: f32,
}

/// Draw the sampled history under `live` onto `surface`.
///
/// With an empty history this leaves the surface untouched. Otherwise the surface is cleared,
/// every sampled frame is drawn oldest to newest and then `live`, all at `1 / (slice_count + 1)`.
/// The weight depends on the configured `slice_count`, not on how many indices were sampled.
/// The surface's global alpha is back at `1.0` when this returns, including on error.
///
/// Panics when an index is out of range for `history`.
pub fn composite<S>(
    history: &HistoryBuffer,
    indices: &[usize],
    live: &Frame,
    surface: &mut S,
    slice_count: usize,
) -> TrailResult<CompositeStats>
where
    S: OutputSurface + ?Sized,
{
    if history.is_empty() {
        return Ok(CompositeStats::default());
    }

    surface.clear();
    let alpha = slice_alpha(slice_count);
    surface.set_global_alpha(alpha);

    let drawn = draw_layers(history, indices, live, surface);
    surface.set_global_alpha(1.0);

    Ok(CompositeStats {
        layers: drawn?,
        alpha,
    })
}

fn draw_layers<S>(
    history: &HistoryBuffer,
    indices: &[usize],
    live: &Frame,
    surface: &mut S,
) -> TrailResult<usize>
where
    S: OutputSurface + ?Sized,
{
    // Indices come from `sample_indices` over this history; anything past the end is a caller bug.
    for &i in indices {
        surface.draw_frame(history.at(i))?;
    }
    surface.draw_frame(live)?;
    Ok(indices.len() + 1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
