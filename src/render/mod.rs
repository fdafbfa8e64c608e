//! CPU compositing: blend math, the output surface, and the trail compositor.

/// Premultiplied RGBA8 blending kernels.
pub mod blend;
/// Layered trail composition.
pub mod compositor;
/// Output surface contract and CPU implementation.
pub mod surface;
