//! Static game configuration
//!
//! World definitions and tunable rules. Supplied once at startup and never
//! mutated by the controller.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, GameResult};
use crate::quiz::generator::MAX_TABLE;

/// A themed world with its own table range and guardian boss
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub id: u32,
    pub name: String,
    pub theme: String,
    pub description: String,
    pub min_table: u32,
    pub max_table: u32,
    pub icon: String,
    pub badge_name: String,
    pub boss_name: String,
    pub boss_emoji: String,
    pub boss_description: String,
}

/// The final boss at the end of the last world
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalBossConfig {
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub badge_name: String,
    /// Title awarded on victory
    pub title: String,
}

impl Default for FinalBossConfig {
    fn default() -> Self {
        Self {
            name: "Ultimate Math Dragon".into(),
            emoji: "🐉🔥".into(),
            description: "The final challenge to become the Multiplication Master of Malaysia!"
                .into(),
            badge_name: "Dragon Slayer 🐉⚔️".into(),
            title: "Multiplication Master of Malaysia 👑".into(),
        }
    }
}

/// Tunable scoring and pacing rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub questions_per_level: usize,
    pub passing_score: usize,
    pub boss_question_count: usize,
    /// Fixed threshold; revisit by hand if `boss_question_count` changes
    pub mini_boss_required_correct: usize,
    pub final_boss_question_count: usize,
    pub final_boss_required_correct: usize,
    pub points_correct: u64,
    pub speed_bonus: u64,
    pub speed_threshold_secs: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            questions_per_level: QUESTIONS_PER_LEVEL,
            passing_score: PASSING_SCORE_PER_LEVEL,
            boss_question_count: BOSS_QUESTIONS_COUNT,
            mini_boss_required_correct: MINI_BOSS_REQUIRED_CORRECT,
            final_boss_question_count: FINAL_BOSS_QUESTIONS_COUNT,
            final_boss_required_correct: FINAL_BOSS_REQUIRED_CORRECT,
            points_correct: POINTS_CORRECT,
            speed_bonus: POINTS_SPEED_BONUS,
            speed_threshold_secs: SPEED_THRESHOLD_SECS,
        }
    }
}

impl GameRules {
    /// Parse rules from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> GameResult<Self> {
        let rules: GameRules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> GameResult<()> {
        let phases = [
            ("questions_per_level", self.questions_per_level, "passing_score", self.passing_score),
            (
                "boss_question_count",
                self.boss_question_count,
                "mini_boss_required_correct",
                self.mini_boss_required_correct,
            ),
            (
                "final_boss_question_count",
                self.final_boss_question_count,
                "final_boss_required_correct",
                self.final_boss_required_correct,
            ),
        ];
        for (count_name, count, required_name, required) in phases {
            if count == 0 {
                return Err(GameError::InvalidRules(format!("{count_name} must be at least 1")));
            }
            if required > count {
                return Err(GameError::InvalidRules(format!(
                    "{required_name} ({required}) exceeds {count_name} ({count})"
                )));
            }
        }
        Ok(())
    }
}

/// Feedback pools, one message drawn per answer
pub const CORRECT_MESSAGES: [&str; 5] = [
    "Awesome! 🎉",
    "You're a Math Wizard! 🧙‍♂️",
    "Correct! ⭐",
    "Superb! 🚀",
    "Fantastic! 🌟",
];

pub const WRONG_MESSAGES: [&str; 4] = [
    "Oops! Try to remember this one.",
    "Not quite, but keep going!",
    "Close one! 🐢",
    "Don't give up! 💪",
];

/// Full campaign: ordered worlds, final boss and rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub worlds: Vec<WorldConfig>,
    pub final_boss: FinalBossConfig,
    #[serde(default)]
    pub rules: GameRules,
}

impl Default for Campaign {
    fn default() -> Self {
        Self {
            worlds: default_worlds(),
            final_boss: FinalBossConfig::default(),
            rules: GameRules::default(),
        }
    }
}

impl Campaign {
    /// Build and validate a campaign
    pub fn new(
        worlds: Vec<WorldConfig>,
        final_boss: FinalBossConfig,
        rules: GameRules,
    ) -> GameResult<Self> {
        let campaign = Self {
            worlds,
            final_boss,
            rules,
        };
        campaign.validate()?;
        Ok(campaign)
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        let campaign: Campaign = serde_json::from_str(json)?;
        campaign.validate()?;
        Ok(campaign)
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.worlds.is_empty() {
            return Err(GameError::InvalidRules("campaign has no worlds".into()));
        }
        for world in &self.worlds {
            if world.min_table == 0
                || world.min_table > world.max_table
                || world.max_table > MAX_TABLE
            {
                return Err(GameError::InvalidRules(format!(
                    "world '{}' has invalid table range {}..={}",
                    world.name, world.min_table, world.max_table
                )));
            }
        }
        self.rules.validate()
    }

    pub fn world(&self, index: usize) -> Option<&WorldConfig> {
        self.worlds.get(index)
    }

    pub fn is_last_world(&self, index: usize) -> bool {
        index + 1 == self.worlds.len()
    }
}

#[allow(clippy::too_many_arguments)]
fn world(
    id: u32,
    name: &str,
    theme: &str,
    description: &str,
    tables: (u32, u32),
    icon: &str,
    badge_name: &str,
    boss: (&str, &str, &str),
) -> WorldConfig {
    WorldConfig {
        id,
        name: name.into(),
        theme: theme.into(),
        description: description.into(),
        min_table: tables.0,
        max_table: tables.1,
        icon: icon.into(),
        badge_name: badge_name.into(),
        boss_name: boss.0.into(),
        boss_emoji: boss.1.into(),
        boss_description: boss.2.into(),
    }
}

/// The four stock worlds, tables 2 through 12
pub fn default_worlds() -> Vec<WorldConfig> {
    vec![
        world(
            0,
            "Rainforest World 🌴",
            "Taman Negara",
            "Trek through the ancient jungles of Taman Negara! Watch out for tigers.",
            (2, 5),
            "tree",
            "Rainforest Explorer 🐒",
            ("Rainforest Guardian", "🐅", "The Tiger Spirit challenges you!"),
        ),
        world(
            1,
            "Ocean World 🌊",
            "Pulau Redang",
            "Dive deep into the crystal waters of Pulau Redang. The sharks are hungry for math!",
            (6, 8),
            "waves",
            "Ocean Diver 🐠",
            ("Ocean Guardian", "🦈", "The Shark Spirit circles around you!"),
        ),
        world(
            2,
            "Sky World ☁️",
            "KL Tower",
            "Climb the Petronas Twin Towers and touch the clouds!",
            (9, 10),
            "cloud",
            "Sky Climber 🏙️",
            ("Sky Guardian", "🦅", "The Eagle Spirit soars above!"),
        ),
        world(
            3,
            "Galaxy World 🌌",
            "Langkawi Spaceport",
            "Blast off from Langkawi into the cosmos!",
            (11, 12),
            "star",
            "Galaxy Voyager 🚀",
            ("Galaxy Guardian", "🐉", "The Dragon Spirit guards the stars!"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_campaign_valid() {
        let campaign = Campaign::default();
        assert!(campaign.validate().is_ok());
        assert_eq!(campaign.worlds.len(), 4);
        assert!(campaign.is_last_world(3));
        assert!(!campaign.is_last_world(0));
        assert_eq!(campaign.world(1).map(|w| (w.min_table, w.max_table)), Some((6, 8)));
    }

    #[test]
    fn test_rules_defaults() {
        let rules = GameRules::default();
        assert_eq!(rules.questions_per_level, 10);
        assert_eq!(rules.passing_score, 7);
        assert_eq!(rules.boss_question_count, 3);
        assert_eq!(rules.mini_boss_required_correct, 2);
        assert_eq!(rules.final_boss_question_count, 5);
        assert_eq!(rules.final_boss_required_correct, 4);
        assert_eq!(rules.points_correct, 10);
        assert_eq!(rules.speed_bonus, 5);
        assert_eq!(rules.speed_threshold_secs, 5);
    }

    #[test]
    fn test_rules_from_partial_json() {
        let rules = GameRules::from_json(r#"{ "questions_per_level": 5, "passing_score": 3 }"#)
            .unwrap();
        assert_eq!(rules.questions_per_level, 5);
        assert_eq!(rules.passing_score, 3);
        assert_eq!(rules.boss_question_count, 3);
    }

    #[test]
    fn test_rules_rejects_unreachable_threshold() {
        let err = GameRules::from_json(r#"{ "passing_score": 11 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidRules(_)));

        let rules = GameRules {
            boss_question_count: 0,
            mini_boss_required_correct: 0,
            ..Default::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_campaign_rejects_bad_world() {
        let mut worlds = default_worlds();
        worlds[2].min_table = 11;
        worlds[2].max_table = 9;
        let result = Campaign::new(worlds, FinalBossConfig::default(), GameRules::default());
        assert!(matches!(result, Err(GameError::InvalidRules(_))));

        let empty = Campaign::new(Vec::new(), FinalBossConfig::default(), GameRules::default());
        assert!(empty.is_err());
    }

    #[test]
    fn test_campaign_json_round_trip_keeps_rules() {
        let campaign = Campaign::default();
        let json = serde_json::to_string(&campaign).unwrap();
        let parsed = Campaign::from_json(&json).unwrap();
        assert_eq!(parsed, campaign);
    }

    #[test]
    fn test_malformed_json_is_serde_error() {
        assert!(matches!(GameRules::from_json("{"), Err(GameError::Serde(_))));
    }
}
