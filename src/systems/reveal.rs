use bevy_ecs::prelude::*;

use crate::core::app::Clock;
use crate::data::messages::MessageLibrary;
use crate::simulation::cursor::DayCursor;
use crate::simulation::effects::{reveal_effects, should_signal_sos, Effect};
use crate::simulation::state::SimulationState;
use crate::systems::commands::RevealQueue;

#[derive(Resource, Default, Debug)]
pub struct EffectLog(pub Vec<Effect>);

/// Turns freshly revealed cursors into sounds, notifications and the SOS
/// signal, claiming notification keys as it goes.
pub fn reveal_effects_system(
    mut reveals: ResMut<RevealQueue>,
    mut state: ResMut<SimulationState>,
    library: Res<MessageLibrary>,
    clock: Res<Clock>,
    mut effects: ResMut<EffectLog>,
) {
    let pending: Vec<DayCursor> = reveals.0.drain(..).collect();
    for cursor in pending {
        let fired = reveal_effects(&library, &mut state.notified, cursor);
        if !fired.is_empty() {
            tracing::debug!(day = cursor.day, index = cursor.index, count = fired.len(), "effects fired");
        }
        effects.0.extend(fired);
        if should_signal_sos(cursor.day, clock.local_hour) {
            effects.0.push(Effect::SosSignal);
        }
    }
}
