pub mod commands;
pub mod reveal;

pub use commands::{apply_commands_system, RevealQueue, SimEvent, SimEventLog};
pub use reveal::{reveal_effects_system, EffectLog};
