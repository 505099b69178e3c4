use crate::simulation::state::SimulationState;

pub trait PrefsRepository {
    fn load_or_init(&mut self) -> Result<SimulationState, Box<dyn std::error::Error>>;
    fn save_state(&mut self, state: &SimulationState) -> Result<(), Box<dyn std::error::Error>>;
}
