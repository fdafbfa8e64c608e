//! Output sinks for composited frames.
//!
//! Sinks sit outside the render loop: hosts push the surface contents after a rendered tick.

/// Sink contract and implementations.
pub mod sink;
