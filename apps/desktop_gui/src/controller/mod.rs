//! Controller layer: UI events, reducer state transitions, and effect orchestration.

pub mod events;
pub mod orchestration;
pub mod panel;
pub mod reducer;
