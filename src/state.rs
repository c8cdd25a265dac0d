use crate::contract::ContractGenerator;

/// Shared application state. The generator is stateless, so concurrent
/// requests never contend on anything here.
pub struct AppState {
    pub generator: ContractGenerator,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            generator: ContractGenerator::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
