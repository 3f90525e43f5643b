//! Game state and progression types
//!
//! Everything the controller mutates lives here. Per-phase data rides on the
//! `Phase` variant, so a round only exists while it is being played.

use serde::{Deserialize, Serialize};

use crate::audio::Cue;
use crate::consts::BOSS_MAX_HEALTH;
use crate::quiz::Question;

/// Which kind of question phase is (or was) running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseKind {
    /// Normal 10-question level
    Level,
    /// World guardian fight
    MiniBoss,
    /// Final dragon fight
    FinalBoss,
}

/// Per-question elapsed-seconds counter
///
/// Exactly one per round; `start` replaces any running count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTimer {
    elapsed_secs: u32,
    running: bool,
}

impl QuestionTimer {
    pub fn start(&mut self) {
        self.elapsed_secs = 0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance one second; returns false if the timer is stopped
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
        self.running
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Result of the last answer, shown until the player continues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub is_correct: bool,
    pub message: String,
    /// Always set; screens only show it after a wrong answer
    pub correct_answer: u32,
    pub points: u64,
}

/// One bounded sequence of questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub questions: Vec<Question>,
    /// 0-based, always `< questions.len()` for a non-empty round
    pub index: usize,
    pub correct_count: usize,
    pub timer: QuestionTimer,
    pub feedback: Option<Feedback>,
}

impl Round {
    /// Start a round with the timer running on the first question
    pub fn new(questions: Vec<Question>) -> Self {
        let mut timer = QuestionTimer::default();
        timer.start();
        Self {
            questions,
            index: 0,
            correct_count: 0,
            timer,
            feedback: None,
        }
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Move to the next question; false when the round is exhausted
    pub fn advance(&mut self) -> bool {
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            self.timer.start();
            true
        } else {
            false
        }
    }
}

/// A boss battle: a round plus a health bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossFight {
    pub round: Round,
    /// 0..=100, never increases during the fight
    pub health: f32,
    pub is_final: bool,
}

impl BossFight {
    pub fn new(questions: Vec<Question>, is_final: bool) -> Self {
        Self {
            round: Round::new(questions),
            health: BOSS_MAX_HEALTH,
            is_final,
        }
    }

    /// Health removed by one correct answer
    pub fn damage_per_hit(&self) -> f32 {
        if self.round.is_empty() {
            BOSS_MAX_HEALTH
        } else {
            BOSS_MAX_HEALTH / self.round.len() as f32
        }
    }

    /// Land a hit, floored at zero
    pub fn hit(&mut self) {
        self.health = (self.health - self.damage_per_hit()).max(0.0);
    }

    pub fn kind(&self) -> PhaseKind {
        if self.is_final {
            PhaseKind::FinalBoss
        } else {
            PhaseKind::MiniBoss
        }
    }
}

/// Top-level game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen (initial state, and the only target of a full restart)
    Menu,
    /// World description before its level
    WorldIntro,
    /// Normal level in progress
    Playing(Round),
    /// Level passed, guardian waiting
    LevelComplete,
    /// Final boss briefing (last world only)
    BossIntro,
    /// Guardian or final boss fight in progress
    BossBattle(BossFight),
    /// Guardian beaten, badge earned
    BossDefeated,
    /// A phase was failed
    GameOver { failed: PhaseKind },
    /// Final boss beaten; exits only via full restart
    Victory,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Menu => "MENU",
            Phase::WorldIntro => "WORLD_INTRO",
            Phase::Playing(_) => "PLAYING",
            Phase::LevelComplete => "LEVEL_COMPLETE",
            Phase::BossIntro => "BOSS_INTRO",
            Phase::BossBattle(_) => "BOSS_BATTLE",
            Phase::BossDefeated => "BOSS_DEFEATED",
            Phase::GameOver { .. } => "GAME_OVER",
            Phase::Victory => "VICTORY",
        }
    }

    /// Active question round, if any
    pub fn round(&self) -> Option<&Round> {
        match self {
            Phase::Playing(round) => Some(round),
            Phase::BossBattle(fight) => Some(&fight.round),
            _ => None,
        }
    }

    pub fn round_mut(&mut self) -> Option<&mut Round> {
        match self {
            Phase::Playing(round) => Some(round),
            Phase::BossBattle(fight) => Some(&mut fight.round),
            _ => None,
        }
    }

    pub fn boss(&self) -> Option<&BossFight> {
        match self {
            Phase::BossBattle(fight) => Some(fight),
            _ => None,
        }
    }
}

/// Running totals for one play-through
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Never decreases within a play-through
    pub score: u64,
    /// Append-only
    pub badges: Vec<String>,
    pub world_index: usize,
}

/// Output of the controller, drained by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Audio cue trigger
    Sound(Cue),
    PhaseChanged {
        from: &'static str,
        to: &'static str,
    },
    Answered {
        is_correct: bool,
        points: u64,
    },
    BadgeEarned(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Difficulty, QuestionId};

    fn question(n: u32) -> Question {
        Question {
            id: QuestionId(n as u64),
            factor_a: 2,
            factor_b: n,
            correct_answer: 2 * n,
            options: [2 * n, 2 * n + 1, 2 * n + 2, 2 * n + 3],
            difficulty: Difficulty::Hard,
        }
    }

    #[test]
    fn test_timer_replace_on_start() {
        let mut timer = QuestionTimer::default();
        assert!(!timer.tick());
        assert_eq!(timer.elapsed_secs(), 0);

        timer.start();
        timer.tick();
        timer.tick();
        assert_eq!(timer.elapsed_secs(), 2);

        // Restart resets instead of stacking
        timer.start();
        timer.tick();
        assert_eq!(timer.elapsed_secs(), 1);

        timer.stop();
        assert!(!timer.tick());
        assert_eq!(timer.elapsed_secs(), 1);
    }

    #[test]
    fn test_round_advance_bounds() {
        let mut round = Round::new(vec![question(1), question(2)]);
        assert!(round.timer.is_running());
        assert_eq!(round.current().map(|q| q.factor_b), Some(1));
        assert!(round.advance());
        assert_eq!(round.current().map(|q| q.factor_b), Some(2));
        assert!(!round.advance());
        assert_eq!(round.index, 1);
    }

    #[test]
    fn test_boss_health_floor() {
        let mut fight = BossFight::new(vec![question(1), question(2), question(3)], false);
        assert_eq!(fight.health, 100.0);
        fight.hit();
        assert!((fight.health - 100.0 * 2.0 / 3.0).abs() < 1e-4);
        for _ in 0..10 {
            fight.hit();
        }
        assert_eq!(fight.health, 0.0);
        assert_eq!(fight.kind(), PhaseKind::MiniBoss);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::Menu.name(), "MENU");
        assert_eq!(
            Phase::GameOver {
                failed: PhaseKind::Level
            }
            .name(),
            "GAME_OVER"
        );
        assert!(Phase::Victory.round().is_none());
        assert!(Phase::Playing(Round::new(vec![question(4)])).round().is_some());
    }
}
