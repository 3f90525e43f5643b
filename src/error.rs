//! Error types
//!
//! Losing a level is a normal outcome (`Phase::GameOver`), never an error.
//! Everything here is a contract violation by the caller.

/// Core error type for the game.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// Generator called with an empty or out-of-bounds table range
    #[error("invalid table range {min}..={max}")]
    InvalidRange { min: u32, max: u32 },

    /// Round has no question at the current index
    #[error("no active question")]
    NoActiveQuestion,

    /// Intent not offered by the current state
    #[error("cannot {action} while in {phase}")]
    InvalidAction {
        action: &'static str,
        phase: &'static str,
    },

    /// Answer submitted before the previous feedback was dismissed
    #[error("feedback is still pending")]
    FeedbackPending,

    /// Tried to advance before answering the current question
    #[error("current question has not been answered")]
    AwaitingAnswer,

    /// Submitted value is not one of the presented options
    #[error("{0} is not one of the options")]
    UnknownOption(u32),

    /// `next_world` called on the last world
    #[error("no world after {0}")]
    NoNextWorld(usize),

    /// Rules or campaign failed validation
    #[error("invalid rules: {0}")]
    InvalidRules(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serde(String),
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Serde(err.to_string())
    }
}

/// Result type used throughout the crate.
pub type GameResult<T> = Result<T, GameError>;
