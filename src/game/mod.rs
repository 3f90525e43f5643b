//! Game progression module
//!
//! Single-threaded state machine driven by player intents and a one-second
//! tick. All randomness flows through the controller's seeded RNG.

pub mod controller;
pub mod state;

pub use controller::Game;
pub use state::{
    BossFight, Feedback, GameEvent, Phase, PhaseKind, PlayerStats, QuestionTimer, Round,
};
