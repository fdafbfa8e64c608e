//! Frame history: the bounded ring of past captures and the sampler that slices it.

/// Ring-backed history buffer.
pub mod buffer;
/// Even spacing of slice indices over the history.
pub mod sampler;
