//! Controller layer: UI events, window-model transitions, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
