//! Question generation module
//!
//! Pure functions over a caller-owned RNG:
//! - No global randomness
//! - Same seed, same questions
//! - No controller or presentation dependencies

pub mod generator;
pub mod question;

pub use generator::{generate_final_boss_set, generate_question, generate_question_set};
pub use question::{Difficulty, Question, QuestionId};
