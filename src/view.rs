//! Presentation snapshots
//!
//! `Screen` is everything a renderer needs for the current state. Building
//! one never mutates the controller.

use serde::Serialize;

use crate::game::{Feedback, Game, Phase, PhaseKind, Round};
use crate::quiz::Difficulty;

pub const GAME_TITLE: &str = "Malaysian Math Adventure";
pub const GAME_TAGLINE: &str = "Become the Multiplication Master!";

/// World metadata for intro and header display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldCard {
    pub index: usize,
    pub name: String,
    pub theme: String,
    pub description: String,
    pub icon: String,
    pub min_table: u32,
    pub max_table: u32,
}

/// Boss portrait for battle screens
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BossCard {
    pub name: String,
    pub emoji: String,
    pub description: String,
    /// 0..=100
    pub health: f32,
    pub is_final: bool,
}

/// Feedback overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackView {
    pub is_correct: bool,
    pub message: String,
    pub points: u64,
    /// Only shown after a wrong answer
    pub correct_answer: Option<u32>,
    pub detail: String,
}

impl From<&Feedback> for FeedbackView {
    fn from(feedback: &Feedback) -> Self {
        let (correct_answer, detail) = if feedback.is_correct {
            (None, "Next Challenge Awaits!".to_string())
        } else {
            (
                Some(feedback.correct_answer),
                format!("The answer was {}", feedback.correct_answer),
            )
        };
        Self {
            is_correct: feedback.is_correct,
            message: feedback.message.clone(),
            points: feedback.points,
            correct_answer,
            detail,
        }
    }
}

/// The question card shown while playing or fighting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionCard {
    /// World name, "GUARDIAN BATTLE" or "FINAL BOSS"
    pub header: String,
    /// 1-based
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    /// Boss questions are tagged hard
    pub difficulty: Difficulty,
    pub options: Vec<u32>,
    pub score: u64,
    pub elapsed_secs: u32,
    pub boss: Option<BossCard>,
    /// Options are disabled while this is set
    pub feedback: Option<FeedbackView>,
}

impl QuestionCard {
    /// "Q: 3/10"
    pub fn position(&self) -> String {
        format!("Q: {}/{}", self.number, self.total)
    }

    pub fn accepts_answer(&self) -> bool {
        self.feedback.is_none()
    }
}

/// What the button on the boss-defeated screen leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NextStep {
    NextWorld,
    FinalBattle,
}

/// Per-state render data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Menu {
        title: String,
        tagline: String,
        world_names: Vec<String>,
    },
    WorldIntro {
        world: WorldCard,
        score: u64,
        badges: Vec<String>,
    },
    Question(QuestionCard),
    LevelComplete {
        world: WorldCard,
        boss_name: String,
        boss_emoji: String,
        boss_description: String,
        score: u64,
    },
    BossDefeated {
        badge: String,
        badges: Vec<String>,
        next: NextStep,
        score: u64,
    },
    BossIntro {
        name: String,
        emoji: String,
        description: String,
        question_count: usize,
        min_table: u32,
        max_table: u32,
        required_correct: usize,
    },
    Victory {
        title: String,
        score: u64,
        badges: Vec<String>,
    },
    GameOver {
        failed: PhaseKind,
        message: String,
        score: u64,
    },
}

impl Screen {
    pub fn from_game(game: &Game) -> Self {
        let stats = game.stats();
        let campaign = game.campaign();
        let world_card = || {
            game.current_world().map(|w| WorldCard {
                index: stats.world_index,
                name: w.name.clone(),
                theme: w.theme.clone(),
                description: w.description.clone(),
                icon: w.icon.clone(),
                min_table: w.min_table,
                max_table: w.max_table,
            })
        };
        let menu = || Screen::Menu {
            title: GAME_TITLE.to_string(),
            tagline: GAME_TAGLINE.to_string(),
            world_names: campaign.worlds.iter().map(|w| w.name.clone()).collect(),
        };

        match game.phase() {
            Phase::Menu => menu(),
            Phase::WorldIntro => match world_card() {
                Some(world) => Screen::WorldIntro {
                    world,
                    score: stats.score,
                    badges: stats.badges.clone(),
                },
                None => menu(),
            },
            Phase::Playing(round) => {
                let header = game
                    .current_world()
                    .map(|w| w.name.clone())
                    .unwrap_or_default();
                question_card(game, round, header, None).unwrap_or_else(menu)
            }
            Phase::BossBattle(fight) => {
                let boss = if fight.is_final {
                    let fb = &campaign.final_boss;
                    BossCard {
                        name: fb.name.clone(),
                        emoji: fb.emoji.clone(),
                        description: fb.description.clone(),
                        health: fight.health,
                        is_final: true,
                    }
                } else {
                    let world = game.current_world();
                    BossCard {
                        name: world.map(|w| w.boss_name.clone()).unwrap_or_default(),
                        emoji: world.map(|w| w.boss_emoji.clone()).unwrap_or_default(),
                        description: world
                            .map(|w| w.boss_description.clone())
                            .unwrap_or_default(),
                        health: fight.health,
                        is_final: false,
                    }
                };
                let header = if fight.is_final {
                    "FINAL BOSS"
                } else {
                    "GUARDIAN BATTLE"
                };
                question_card(game, &fight.round, header.to_string(), Some(boss))
                    .unwrap_or_else(menu)
            }
            Phase::LevelComplete => match (world_card(), game.current_world()) {
                (Some(world), Some(w)) => Screen::LevelComplete {
                    world,
                    boss_name: w.boss_name.clone(),
                    boss_emoji: w.boss_emoji.clone(),
                    boss_description: w.boss_description.clone(),
                    score: stats.score,
                },
                _ => menu(),
            },
            Phase::BossDefeated => Screen::BossDefeated {
                badge: game
                    .current_world()
                    .map(|w| w.badge_name.clone())
                    .unwrap_or_default(),
                badges: stats.badges.clone(),
                next: if game.is_last_world() {
                    NextStep::FinalBattle
                } else {
                    NextStep::NextWorld
                },
                score: stats.score,
            },
            Phase::BossIntro => {
                let fb = &campaign.final_boss;
                Screen::BossIntro {
                    name: fb.name.clone(),
                    emoji: fb.emoji.clone(),
                    description: fb.description.clone(),
                    question_count: campaign.rules.final_boss_question_count,
                    min_table: crate::consts::FINAL_BOSS_MIN_TABLE,
                    max_table: crate::consts::FINAL_BOSS_MAX_TABLE,
                    required_correct: campaign.rules.final_boss_required_correct,
                }
            }
            Phase::Victory => Screen::Victory {
                title: campaign.final_boss.title.clone(),
                score: stats.score,
                badges: stats.badges.clone(),
            },
            Phase::GameOver { failed } => {
                let rules = &campaign.rules;
                let message = match failed {
                    PhaseKind::Level => format!(
                        "You need {}/{} correct to advance. Keep practicing!",
                        rules.passing_score, rules.questions_per_level
                    ),
                    PhaseKind::MiniBoss => {
                        "The Guardian was too strong this time. Review your tables and try again!"
                            .to_string()
                    }
                    PhaseKind::FinalBoss => format!(
                        "The {} was too strong this time. Review your tables and try again!",
                        campaign.final_boss.name
                    ),
                };
                Screen::GameOver {
                    failed: *failed,
                    message,
                    score: stats.score,
                }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::Menu { .. } => "menu",
            Screen::WorldIntro { .. } => "world_intro",
            Screen::Question(_) => "question",
            Screen::LevelComplete { .. } => "level_complete",
            Screen::BossDefeated { .. } => "boss_defeated",
            Screen::BossIntro { .. } => "boss_intro",
            Screen::Victory { .. } => "victory",
            Screen::GameOver { .. } => "game_over",
        }
    }
}

fn question_card(
    game: &Game,
    round: &Round,
    header: String,
    boss: Option<BossCard>,
) -> Option<Screen> {
    let question = round.current()?;
    Some(Screen::Question(QuestionCard {
        header,
        number: round.index + 1,
        total: round.len(),
        prompt: question.prompt(),
        difficulty: question.difficulty,
        options: question.options.to_vec(),
        score: game.stats().score,
        elapsed_secs: round.timer.elapsed_secs(),
        boss,
        feedback: game.feedback().map(FeedbackView::from),
    }))
}

impl Game {
    /// Snapshot for the presentation layer
    pub fn screen(&self) -> Screen {
        Screen::from_game(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_screen() {
        let game = Game::new(1);
        let Screen::Menu { title, world_names, .. } = game.screen() else {
            panic!("expected menu");
        };
        assert_eq!(title, GAME_TITLE);
        assert_eq!(world_names.len(), 4);
    }

    #[test]
    fn test_question_screen_and_feedback() {
        let mut game = Game::new(2);
        game.start_game().unwrap();
        assert_eq!(game.screen().name(), "world_intro");
        game.start_level().unwrap();

        let Screen::Question(card) = game.screen() else {
            panic!("expected question");
        };
        assert_eq!(card.position(), "Q: 1/10");
        assert_eq!(card.header, "Rainforest World 🌴");
        assert!(card.boss.is_none());
        assert_eq!(card.difficulty, Difficulty::Normal);
        assert!(card.accepts_answer());

        let q = game.current_question().unwrap().clone();
        let wrong = q.options.iter().copied().find(|&o| o != q.correct_answer).unwrap();
        game.handle_answer(wrong).unwrap();

        let Screen::Question(card) = game.screen() else {
            panic!("expected question");
        };
        let feedback = card.feedback.unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(feedback.correct_answer, Some(q.correct_answer));
        assert_eq!(feedback.detail, format!("The answer was {}", q.correct_answer));
    }

    #[test]
    fn test_boss_questions_tagged_hard() {
        let mut game = Game::new(4);
        game.start_game().unwrap();
        game.start_level().unwrap();
        for _ in 0..10 {
            let answer = game.current_question().unwrap().correct_answer;
            game.handle_answer(answer).unwrap();
            game.next_question().unwrap();
        }
        game.start_boss(false).unwrap();

        let Screen::Question(card) = game.screen() else {
            panic!("expected question");
        };
        assert_eq!(card.header, "GUARDIAN BATTLE");
        assert_eq!(card.difficulty, Difficulty::Hard);
        assert!(card.boss.is_some());

        let json = serde_json::to_value(Screen::Question(card)).unwrap();
        assert_eq!(json["difficulty"], Difficulty::Hard.as_str());
    }

    #[test]
    fn test_correct_feedback_hides_answer() {
        let view = FeedbackView::from(&Feedback {
            is_correct: true,
            message: "Superb! 🚀".into(),
            correct_answer: 42,
            points: 15,
        });
        assert_eq!(view.correct_answer, None);
        assert_eq!(view.detail, "Next Challenge Awaits!");
    }

    #[test]
    fn test_screen_serializes_with_tag() {
        let game = Game::new(3);
        let json = serde_json::to_value(game.screen()).unwrap();
        assert_eq!(json["screen"], "menu");
    }
}
