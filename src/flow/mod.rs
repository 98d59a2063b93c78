mod controller;
mod state;

pub use controller::FlowController;
pub use state::{all_answered, FlowFailure, FlowState};
