use bevy_ecs::prelude::*;

use crate::core::app::{Clock, CommandQueue, SimCommand};
use crate::data::messages::MessageLibrary;
use crate::simulation::cursor::{CursorStep, DayCursor};
use crate::simulation::state::SimulationState;

/// What a command did, for the front end to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    LoggedIn { username: String },
    LoggedOut,
    SessionOpened { cursor: DayCursor },
    CaughtUp { cursor: DayCursor },
    Advanced { cursor: DayCursor, step: CursorStep },
    Reset,
    ShieldTapped { taps: u32 },
    DeveloperMode(bool),
    DeveloperModeRequired,
}

#[derive(Resource, Default, Debug)]
pub struct SimEventLog(pub Vec<SimEvent>);

/// Cursors revealed this step, waiting for their effects.
#[derive(Resource, Default, Debug)]
pub struct RevealQueue(pub Vec<DayCursor>);

pub fn apply_commands_system(
    mut queue: ResMut<CommandQueue>,
    mut state: ResMut<SimulationState>,
    library: Res<MessageLibrary>,
    clock: Res<Clock>,
    mut reveals: ResMut<RevealQueue>,
    mut events: ResMut<SimEventLog>,
) {
    let commands: Vec<SimCommand> = queue.0.drain(..).collect();
    for command in commands {
        apply_command(
            command,
            &mut state,
            &library,
            &clock,
            &mut reveals.0,
            &mut events.0,
        );
    }
}

fn apply_command(
    command: SimCommand,
    state: &mut SimulationState,
    library: &MessageLibrary,
    clock: &Clock,
    reveals: &mut Vec<DayCursor>,
    events: &mut Vec<SimEvent>,
) {
    match command {
        SimCommand::Login { username } => {
            state.login(&username, clock.now_ms);
            tracing::info!(%username, "user logged in");
            events.push(SimEvent::LoggedIn { username });
        }
        SimCommand::Logout => {
            state.logout(clock.now_ms);
            tracing::info!("user logged out");
            events.push(SimEvent::LoggedOut);
        }
        SimCommand::OpenSession => {
            if let Some(cursor) = state.open_session(clock.now_ms) {
                reveals.push(cursor);
                events.push(SimEvent::SessionOpened { cursor });
            }
        }
        SimCommand::CatchUp => {
            let revealed = state.catch_up(library, clock.now_ms);
            if !revealed.is_empty() {
                let cursor = state.cursor;
                tracing::debug!(
                    day = cursor.day,
                    pairs = revealed.len(),
                    "cursor caught up with the clock"
                );
                reveals.extend(revealed);
                events.push(SimEvent::CaughtUp { cursor });
            }
        }
        SimCommand::Advance => {
            if !state.developer_mode {
                events.push(SimEvent::DeveloperModeRequired);
                return;
            }
            let step = state.advance(library);
            let cursor = state.cursor;
            tracing::debug!(day = cursor.day, index = cursor.index, ?step, "advanced");
            reveals.push(cursor);
            events.push(SimEvent::Advanced { cursor, step });
        }
        SimCommand::Reset => {
            if !state.developer_mode {
                events.push(SimEvent::DeveloperModeRequired);
                return;
            }
            state.reset_simulation(clock.now_ms);
            tracing::info!("simulation reset to day 1");
            events.push(SimEvent::Reset);
        }
        SimCommand::TapShield => match state.tap_shield() {
            Some(enabled) => {
                tracing::info!(enabled, "developer mode toggled");
                events.push(SimEvent::DeveloperMode(enabled));
            }
            None => events.push(SimEvent::ShieldTapped {
                taps: state.shield_taps,
            }),
        },
    }
}
