//! Tick-driven orchestration.

/// Render loop state machine.
pub mod render_loop;
/// Tick scheduling primitives.
pub mod scheduler;
