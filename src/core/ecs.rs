use bevy_ecs::prelude::*;
use bevy_ecs::schedule::SystemSet;

use crate::core::app::{Clock, CommandQueue};
use crate::data::messages::MessageLibrary;
use crate::simulation::state::SimulationState;
use crate::systems::{
    apply_commands_system, reveal_effects_system, EffectLog, RevealQueue, SimEventLog,
};

/// Canonical ordering of one command step.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum StepSet {
    Intake,
    Reveal,
}

/// Build the ECS world with the loaded library and persisted state.
pub fn create_world(library: MessageLibrary, state: SimulationState) -> World {
    let mut world = World::new();
    world.insert_resource(library);
    world.insert_resource(state);
    world.insert_resource(Clock::now());
    world.insert_resource(CommandQueue::default());
    world.insert_resource(RevealQueue::default());
    world.insert_resource(SimEventLog::default());
    world.insert_resource(EffectLog::default());
    world
}

pub fn create_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.configure_sets((StepSet::Intake, StepSet::Reveal).chain());

    schedule.add_systems((
        apply_commands_system.in_set(StepSet::Intake),
        reveal_effects_system.in_set(StepSet::Reveal),
    ));

    schedule
}
