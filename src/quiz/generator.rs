//! Multiple-choice question generation
//!
//! Distractors come from three strategies, drawn independently per attempt:
//! near-miss (30%), off-by-one-factor (30%) and plausible-random (40%).
//! Candidates that are non-positive, equal to the answer, or already present
//! are discarded and another strategy is drawn.

use rand::Rng;
use rand::seq::SliceRandom;

use super::question::{Difficulty, Question, QuestionId};
use crate::consts::*;
use crate::error::{GameError, GameResult};

/// Tables must lie in `1..=MAX_TABLE`; keeps every product well inside `u32`
pub const MAX_TABLE: u32 = 10_000;

/// Cumulative strategy weights
const NEAR_MISS_WEIGHT: f64 = 0.3;
const OFF_BY_ONE_WEIGHT: f64 = 0.6;

/// Near-miss offset range (inclusive)
const NEAR_MISS_MAX_OFFSET: i64 = 5;

fn check_range(min_table: u32, max_table: u32) -> GameResult<()> {
    if min_table == 0 || min_table > max_table || max_table > MAX_TABLE {
        return Err(GameError::InvalidRange {
            min: min_table,
            max: max_table,
        });
    }
    Ok(())
}

/// One distractor candidate; may be invalid (filtered by the caller)
fn distractor_candidate<R: Rng + ?Sized>(
    rng: &mut R,
    factor_a: u32,
    factor_b: u32,
    min_table: u32,
    max_table: u32,
) -> i64 {
    let correct = factor_a as i64 * factor_b as i64;
    let strategy: f64 = rng.random();

    if strategy < NEAR_MISS_WEIGHT {
        let offset = rng.random_range(1..=NEAR_MISS_MAX_OFFSET);
        if rng.random_bool(0.5) {
            correct + offset
        } else {
            correct - offset
        }
    } else if strategy < OFF_BY_ONE_WEIGHT {
        let b = if rng.random_bool(0.5) {
            factor_b as i64 + 1
        } else {
            factor_b as i64 - 1
        };
        factor_a as i64 * b
    } else {
        let a = rng.random_range(min_table..=max_table) as i64;
        let b = rng.random_range(FACTOR_B_MIN..=FACTOR_B_MAX) as i64;
        a * b
    }
}

/// Generate a single question over `[min_table, max_table]`
pub fn generate_question<R: Rng + ?Sized>(
    rng: &mut R,
    min_table: u32,
    max_table: u32,
    difficulty: Difficulty,
) -> GameResult<Question> {
    check_range(min_table, max_table)?;

    let factor_a = rng.random_range(min_table..=max_table);
    let factor_b = rng.random_range(FACTOR_B_MIN..=FACTOR_B_MAX);
    let correct_answer = factor_a * factor_b;

    let mut options = Vec::with_capacity(OPTION_COUNT);
    options.push(correct_answer);

    // Terminates: correct + 1..=5 are always valid, distinct candidates
    while options.len() < OPTION_COUNT {
        let candidate = distractor_candidate(rng, factor_a, factor_b, min_table, max_table);
        if candidate <= 0 || candidate == correct_answer as i64 {
            continue;
        }
        let candidate = candidate as u32;
        if !options.contains(&candidate) {
            options.push(candidate);
        }
    }

    options.shuffle(rng);

    let mut shuffled = [0; OPTION_COUNT];
    shuffled.copy_from_slice(&options);

    Ok(Question {
        id: QuestionId(rng.random()),
        factor_a,
        factor_b,
        correct_answer,
        options: shuffled,
        difficulty,
    })
}

/// Generate `count` independent questions (repeats allowed)
pub fn generate_question_set<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    min_table: u32,
    max_table: u32,
    difficulty: Difficulty,
) -> GameResult<Vec<Question>> {
    check_range(min_table, max_table)?;
    (0..count)
        .map(|_| generate_question(rng, min_table, max_table, difficulty))
        .collect()
}

/// Final boss questions mix every table
pub fn generate_final_boss_set<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
) -> GameResult<Vec<Question>> {
    generate_question_set(
        rng,
        count,
        FINAL_BOSS_MIN_TABLE,
        FINAL_BOSS_MAX_TABLE,
        Difficulty::Hard,
    )
}
