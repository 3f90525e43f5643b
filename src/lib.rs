//! Math Adventure - A world-hopping multiplication practice game
//!
//! Core modules:
//! - `quiz`: Multiple-choice question generation (seeded RNG only)
//! - `game`: Deterministic progression controller (menu -> worlds -> bosses -> victory)
//! - `config`: Static world definitions and tunable rules
//! - `view`: Per-screen snapshots for the presentation layer
//! - `audio`: Owned sound cue service
//! - `settings`: Player preferences

pub mod audio;
pub mod config;
pub mod error;
pub mod game;
pub mod quiz;
pub mod settings;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use audio::{AudioManager, Cue};
pub use config::{Campaign, FinalBossConfig, GameRules, WorldConfig};
pub use error::{GameError, GameResult};
pub use game::{Game, GameEvent, Phase, PhaseKind, PlayerStats};
pub use quiz::{Difficulty, Question, QuestionId};
pub use settings::Settings;
pub use view::Screen;

/// Game configuration constants
pub mod consts {
    /// Questions in a normal level
    pub const QUESTIONS_PER_LEVEL: usize = 10;
    /// Correct answers needed to clear a level (7 out of 10)
    pub const PASSING_SCORE_PER_LEVEL: usize = 7;
    /// Questions in a world guardian (mini-boss) fight
    pub const BOSS_QUESTIONS_COUNT: usize = 3;
    /// Correct answers needed to beat a world guardian. Fixed, not derived
    /// from BOSS_QUESTIONS_COUNT.
    pub const MINI_BOSS_REQUIRED_CORRECT: usize = 2;
    /// Questions in the final boss fight
    pub const FINAL_BOSS_QUESTIONS_COUNT: usize = 5;
    /// Correct answers needed to beat the final boss
    pub const FINAL_BOSS_REQUIRED_CORRECT: usize = 4;

    /// Base points for a correct answer
    pub const POINTS_CORRECT: u64 = 10;
    /// Extra points for answering within the speed threshold
    pub const POINTS_SPEED_BONUS: u64 = 5;
    /// Speed bonus threshold (inclusive, in seconds)
    pub const SPEED_THRESHOLD_SECS: u32 = 5;

    /// Boss health at the start of every boss battle
    pub const BOSS_MAX_HEALTH: f32 = 100.0;

    /// Second factor is always drawn from this range
    pub const FACTOR_B_MIN: u32 = 1;
    pub const FACTOR_B_MAX: u32 = 12;

    /// Final boss mixes every table
    pub const FINAL_BOSS_MIN_TABLE: u32 = 2;
    pub const FINAL_BOSS_MAX_TABLE: u32 = 12;

    /// Options shown per question
    pub const OPTION_COUNT: usize = 4;
}
