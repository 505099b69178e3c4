// Re-export core modules for use by the binary or other consumers
pub mod config;
pub mod core;
pub mod data;
pub mod prefs;
pub mod session;
pub mod simulation;
pub mod systems;
pub mod ui;

// Expose the app wrapper and the types needed to drive it
pub use crate::core::app::{App, Clock, SimCommand, StepReport};
pub use crate::simulation::state::SimulationState;
