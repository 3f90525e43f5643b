//! Progression controller
//!
//! Consumes player intents and timer ticks, mutates `PlayerStats` and the
//! current `Phase`, and queues `GameEvent`s for the presentation layer.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{BossFight, Feedback, GameEvent, Phase, PhaseKind, PlayerStats, Round};
use crate::audio::Cue;
use crate::config::{Campaign, CORRECT_MESSAGES, WRONG_MESSAGES, WorldConfig};
use crate::error::{GameError, GameResult};
use crate::quiz::{self, Difficulty, Question};

/// The game controller (sole writer of stats and phase)
#[derive(Debug, Clone)]
pub struct Game {
    campaign: Campaign,
    stats: PlayerStats,
    phase: Phase,
    seed: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Game {
    /// Stock campaign, seeded RNG
    pub fn new(seed: u64) -> Self {
        Self::from_parts(Campaign::default(), seed)
    }

    /// Custom campaign, validated up front
    pub fn with_campaign(campaign: Campaign, seed: u64) -> GameResult<Self> {
        campaign.validate()?;
        Ok(Self::from_parts(campaign, seed))
    }

    fn from_parts(campaign: Campaign, seed: u64) -> Self {
        Self {
            campaign,
            stats: PlayerStats::default(),
            phase: Phase::Menu,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    // === Accessors ===

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// World the player is currently in
    pub fn current_world(&self) -> Option<&WorldConfig> {
        self.campaign.world(self.stats.world_index)
    }

    pub fn is_last_world(&self) -> bool {
        self.campaign.is_last_world(self.stats.world_index)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.phase.round().and_then(Round::current)
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.phase.round().and_then(|r| r.feedback.as_ref())
    }

    pub fn boss_health(&self) -> Option<f32> {
        self.phase.boss().map(|b| b.health)
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Intents ===

    /// MENU -> WORLD_INTRO with fresh stats
    pub fn start_game(&mut self) -> GameResult<()> {
        self.require(matches!(self.phase, Phase::Menu), "start the game")?;
        self.stats = PlayerStats::default();
        self.events.push(GameEvent::Sound(Cue::Click));
        log::info!("New play-through (seed {})", self.seed);
        self.set_phase(Phase::WorldIntro);
        Ok(())
    }

    /// WORLD_INTRO (or GAME_OVER retry) -> PLAYING
    pub fn start_level(&mut self) -> GameResult<()> {
        self.require(
            matches!(self.phase, Phase::WorldIntro | Phase::GameOver { .. }),
            "start a level",
        )?;
        let (min, max) = self.world_range()?;
        let questions = quiz::generate_question_set(
            &mut self.rng,
            self.campaign.rules.questions_per_level,
            min,
            max,
            Difficulty::Normal,
        )?;
        log::info!(
            "World {} level: {} questions, tables {}..={}",
            self.stats.world_index,
            questions.len(),
            min,
            max
        );
        self.events.push(GameEvent::Sound(Cue::Click));
        self.set_phase(Phase::Playing(Round::new(questions)));
        Ok(())
    }

    /// Retry after a failed phase; always replays the current world's level
    pub fn retry(&mut self) -> GameResult<()> {
        self.require(matches!(self.phase, Phase::GameOver { .. }), "retry")?;
        self.start_level()
    }

    /// LEVEL_COMPLETE -> guardian fight, or BOSS_INTRO -> final boss fight
    pub fn start_boss(&mut self, is_final: bool) -> GameResult<()> {
        if is_final {
            self.require(matches!(self.phase, Phase::BossIntro), "start the final boss")?;
        } else {
            self.require(matches!(self.phase, Phase::LevelComplete), "start the guardian fight")?;
        }

        let rules = &self.campaign.rules;
        let questions = if is_final {
            quiz::generate_final_boss_set(&mut self.rng, rules.final_boss_question_count)?
        } else {
            let count = rules.boss_question_count;
            let (min, max) = self.world_range()?;
            quiz::generate_question_set(&mut self.rng, count, min, max, Difficulty::Hard)?
        };
        log::info!(
            "{} battle: {} questions",
            if is_final { "Final boss" } else { "Guardian" },
            questions.len()
        );
        self.events.push(GameEvent::Sound(Cue::BossHit));
        self.set_phase(Phase::BossBattle(BossFight::new(questions, is_final)));
        Ok(())
    }

    /// Submit an answer for the current question
    pub fn handle_answer(&mut self, selected: u32) -> GameResult<Feedback> {
        let phase_name = self.phase.name();
        let rules = &self.campaign.rules;

        let round = match &mut self.phase {
            Phase::Playing(round) => round,
            Phase::BossBattle(fight) => &mut fight.round,
            _ => {
                return Err(GameError::InvalidAction {
                    action: "answer",
                    phase: phase_name,
                });
            }
        };

        if round.feedback.is_some() {
            return Err(GameError::FeedbackPending);
        }
        let question = round.current().ok_or(GameError::NoActiveQuestion)?;
        if !question.has_option(selected) {
            return Err(GameError::UnknownOption(selected));
        }
        let is_correct = question.is_correct(selected);
        let correct_answer = question.correct_answer;

        round.timer.stop();
        let elapsed = round.timer.elapsed_secs();

        let mut points = 0;
        if is_correct {
            points = rules.points_correct;
            if elapsed <= rules.speed_threshold_secs {
                points += rules.speed_bonus;
            }
            self.stats.score += points;
            round.correct_count += 1;
            self.events.push(GameEvent::Sound(Cue::Correct));
        } else {
            self.events.push(GameEvent::Sound(Cue::Wrong));
        }

        let pool: &[&str] = if is_correct {
            &CORRECT_MESSAGES
        } else {
            &WRONG_MESSAGES
        };
        let message = pool[self.rng.random_range(0..pool.len())].to_string();

        let feedback = Feedback {
            is_correct,
            message,
            correct_answer,
            points,
        };
        round.feedback = Some(feedback.clone());

        log::debug!(
            "Q{} answered {} ({}s): {} +{}",
            round.index + 1,
            selected,
            elapsed,
            if is_correct { "correct" } else { "wrong" },
            points
        );
        self.events.push(GameEvent::Answered { is_correct, points });

        if is_correct {
            if let Phase::BossBattle(fight) = &mut self.phase {
                fight.hit();
                log::debug!("Boss hit, health {:.1}", fight.health);
                self.events.push(GameEvent::Sound(Cue::BossHit));
            }
        }
        Ok(feedback)
    }

    /// Dismiss feedback; advance or evaluate the phase
    pub fn next_question(&mut self) -> GameResult<()> {
        let phase_name = self.phase.name();
        let Some(round) = self.phase.round_mut() else {
            return Err(GameError::InvalidAction {
                action: "go to the next question",
                phase: phase_name,
            });
        };
        if round.feedback.take().is_none() {
            return Err(GameError::AwaitingAnswer);
        }
        self.events.push(GameEvent::Sound(Cue::Click));

        if round.advance() {
            return Ok(());
        }
        self.complete_phase();
        Ok(())
    }

    /// BOSS_DEFEATED -> next world's intro
    pub fn next_world(&mut self) -> GameResult<()> {
        self.require(matches!(self.phase, Phase::BossDefeated), "travel to the next world")?;
        if self.is_last_world() {
            return Err(GameError::NoNextWorld(self.stats.world_index));
        }
        self.stats.world_index += 1;
        self.events.push(GameEvent::Sound(Cue::Click));
        self.set_phase(Phase::WorldIntro);
        Ok(())
    }

    /// BOSS_DEFEATED on the last world -> BOSS_INTRO
    pub fn enter_final_boss(&mut self) -> GameResult<()> {
        self.require(
            matches!(self.phase, Phase::BossDefeated) && self.is_last_world(),
            "enter the final battle",
        )?;
        self.events.push(GameEvent::Sound(Cue::Click));
        self.set_phase(Phase::BossIntro);
        Ok(())
    }

    /// GAME_OVER -> MENU
    pub fn return_to_menu(&mut self) -> GameResult<()> {
        self.require(matches!(self.phase, Phase::GameOver { .. }), "return to the menu")?;
        self.events.push(GameEvent::Sound(Cue::Click));
        self.set_phase(Phase::Menu);
        Ok(())
    }

    /// Full restart from any state
    pub fn restart(&mut self) {
        self.stats = PlayerStats::default();
        self.events.push(GameEvent::Sound(Cue::Click));
        self.set_phase(Phase::Menu);
    }

    /// The "continue" action for the current screen
    pub fn advance(&mut self) -> GameResult<()> {
        let last_world = self.is_last_world();
        match self.phase {
            Phase::Menu => self.start_game(),
            Phase::WorldIntro => self.start_level(),
            Phase::Playing(_) | Phase::BossBattle(_) => self.next_question(),
            Phase::LevelComplete => self.start_boss(false),
            Phase::BossDefeated if last_world => self.enter_final_boss(),
            Phase::BossDefeated => self.next_world(),
            Phase::BossIntro => self.start_boss(true),
            Phase::GameOver { .. } => self.retry(),
            Phase::Victory => {
                self.restart();
                Ok(())
            }
        }
    }

    /// One-second timer tick; true if a question timer advanced
    pub fn tick(&mut self) -> bool {
        self.phase
            .round_mut()
            .map(|round| round.timer.tick())
            .unwrap_or(false)
    }

    // === Internals ===

    fn require(&self, allowed: bool, action: &'static str) -> GameResult<()> {
        if allowed {
            Ok(())
        } else {
            Err(GameError::InvalidAction {
                action,
                phase: self.phase.name(),
            })
        }
    }

    fn world_range(&self) -> GameResult<(u32, u32)> {
        self.current_world()
            .map(|w| (w.min_table, w.max_table))
            .ok_or(GameError::NoNextWorld(self.stats.world_index))
    }

    fn set_phase(&mut self, next: Phase) {
        let from = self.phase.name();
        let to = next.name();
        log::info!("Phase {} -> {}", from, to);
        self.phase = next;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Pass/fail evaluation at the end of a round
    fn complete_phase(&mut self) {
        let rules = &self.campaign.rules;
        let (kind, correct, required) = match &self.phase {
            Phase::Playing(round) => (PhaseKind::Level, round.correct_count, rules.passing_score),
            Phase::BossBattle(fight) => {
                let required = if fight.is_final {
                    rules.final_boss_required_correct
                } else {
                    rules.mini_boss_required_correct
                };
                (fight.kind(), fight.round.correct_count, required)
            }
            _ => return,
        };

        log::info!("{:?} finished: {}/{} required", kind, correct, required);

        if correct < required {
            self.events.push(GameEvent::Sound(Cue::GameOver));
            self.set_phase(Phase::GameOver { failed: kind });
            return;
        }

        match kind {
            PhaseKind::Level => {
                self.events.push(GameEvent::Sound(Cue::LevelUp));
                self.set_phase(Phase::LevelComplete);
            }
            PhaseKind::MiniBoss => {
                let badge = self.current_world().map(|w| w.badge_name.clone());
                if let Some(badge) = badge {
                    self.award_badge(badge);
                }
                self.events.push(GameEvent::Sound(Cue::Win));
                self.set_phase(Phase::BossDefeated);
            }
            PhaseKind::FinalBoss => {
                let badge = self.campaign.final_boss.badge_name.clone();
                self.award_badge(badge);
                self.events.push(GameEvent::Sound(Cue::Win));
                self.set_phase(Phase::Victory);
            }
        }
    }

    /// Badges are earned once per play-through, even across retries
    fn award_badge(&mut self, badge: String) {
        if self.stats.badges.contains(&badge) {
            return;
        }
        log::info!("Badge earned: {}", badge);
        self.stats.badges.push(badge.clone());
        self.events.push(GameEvent::BadgeEarned(badge));
    }
}
