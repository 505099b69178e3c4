use std::sync::Arc;

use bevy_ecs::prelude::*;
use chrono::{Local, Timelike};

use crate::core::ecs::{create_schedule, create_world};
use crate::data::messages::{Message, MessageLibrary};
use crate::prefs::PrefsRepository;
use crate::session::login::{check_credentials, LoginError};
use crate::simulation::effects::Effect;
use crate::simulation::feed::{alert_history, guide_list, principal_feed};
use crate::simulation::flashlight::{spawn_sos, Torch};
use crate::simulation::state::SimulationState;
use crate::systems::{EffectLog, SimEvent, SimEventLog};

/// Commands fed into the ECS each step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimCommand {
    Login { username: String },
    Logout,
    OpenSession,
    CatchUp,
    Advance,
    Reset,
    TapShield,
}

/// Resource storing the commands for the next step.
#[derive(Resource, Default, Debug)]
pub struct CommandQueue(pub Vec<SimCommand>);

/// Wall-clock reading used by a step.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub now_ms: i64,
    pub local_hour: u32,
}

impl Clock {
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            now_ms: now.timestamp_millis(),
            local_hour: now.hour(),
        }
    }

    pub fn at(now_ms: i64, local_hour: u32) -> Self {
        Self { now_ms, local_hour }
    }
}

/// Everything one step produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub events: Vec<SimEvent>,
    pub effects: Vec<Effect>,
}

/// Wrapper around the ECS world, its schedule and the preference store.
pub struct App {
    world: World,
    schedule: Schedule,
    prefs: Box<dyn PrefsRepository>,
    torch: Arc<dyn Torch>,
}

impl App {
    pub fn new(
        library: MessageLibrary,
        mut prefs: Box<dyn PrefsRepository>,
        torch: Arc<dyn Torch>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let state = prefs.load_or_init()?;
        tracing::info!(
            day = state.cursor.day,
            index = state.cursor.index,
            developer_mode = state.developer_mode,
            "loaded simulation state"
        );
        Ok(Self {
            world: create_world(library, state),
            schedule: create_schedule(),
            prefs,
            torch,
        })
    }

    pub fn state(&self) -> &SimulationState {
        self.world.resource::<SimulationState>()
    }

    pub fn library(&self) -> &MessageLibrary {
        self.world.resource::<MessageLibrary>()
    }

    /// Runs one step over `commands`, fires the SOS thread if requested and
    /// persists the resulting state.
    pub fn submit(
        &mut self,
        commands: impl IntoIterator<Item = SimCommand>,
        clock: Clock,
    ) -> StepReport {
        self.world.insert_resource(clock);
        self.world
            .resource_mut::<CommandQueue>()
            .0
            .extend(commands);
        self.schedule.run(&mut self.world);

        let events = std::mem::take(&mut self.world.resource_mut::<SimEventLog>().0);
        let effects = std::mem::take(&mut self.world.resource_mut::<EffectLog>().0);

        if effects.contains(&Effect::SosSignal) {
            spawn_sos(Arc::clone(&self.torch));
        }
        self.persist();
        StepReport { events, effects }
    }

    fn persist(&mut self) {
        let state = self.state().clone();
        if let Err(err) = self.prefs.save_state(&state) {
            tracing::error!("Failed to persist preferences: {}", err);
        }
    }

    pub fn login(
        &mut self,
        name: &str,
        password: &str,
        clock: Clock,
    ) -> Result<StepReport, LoginError> {
        let username = check_credentials(name, password)?;
        Ok(self.submit([SimCommand::Login { username }], clock))
    }

    /// Opens the principal screen: first-launch setup, then the wall-clock
    /// catch-up.
    pub fn start_session(&mut self, clock: Clock) -> StepReport {
        self.submit([SimCommand::OpenSession, SimCommand::CatchUp], clock)
    }

    pub fn logout(&mut self, clock: Clock) -> StepReport {
        self.submit([SimCommand::Logout], clock)
    }

    pub fn advance(&mut self, clock: Clock) -> StepReport {
        self.submit([SimCommand::Advance], clock)
    }

    pub fn reset(&mut self, clock: Clock) -> StepReport {
        self.submit([SimCommand::Reset], clock)
    }

    pub fn tap_shield(&mut self, clock: Clock) -> StepReport {
        self.submit([SimCommand::TapShield], clock)
    }

    pub fn feed(&self) -> Vec<Message> {
        let state = self.state();
        principal_feed(self.library(), state.cursor, &state.calendar())
    }

    pub fn guides(&self) -> Vec<Message> {
        let state = self.state();
        guide_list(self.library(), state.cursor, &state.calendar())
    }

    pub fn history(&self) -> Vec<Message> {
        let state = self.state();
        alert_history(self.library(), state.cursor, &state.calendar())
    }
}
