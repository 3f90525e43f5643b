//! Question types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::OPTION_COUNT;

/// Question difficulty tag
///
/// Carried through generation and onto the question so screens can label
/// boss questions. Sampling is identical for both tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

/// Opaque per-instance question identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub u64);

impl fmt::Display for QuestionId {
    /// Base-36, like a short random token
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let mut n = self.0;
        let mut buf = Vec::with_capacity(13);
        loop {
            buf.push(DIGITS[(n % 36) as usize]);
            n /= 36;
            if n == 0 {
                break;
            }
        }
        buf.reverse();
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}

/// A multiple-choice multiplication question (immutable once generated)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub factor_a: u32,
    pub factor_b: u32,
    pub correct_answer: u32,
    /// Four distinct positive values in display order
    pub options: [u32; OPTION_COUNT],
    pub difficulty: Difficulty,
}

impl Question {
    /// Value-based check, independent of option order
    pub fn is_correct(&self, value: u32) -> bool {
        value == self.correct_answer
    }

    pub fn has_option(&self, value: u32) -> bool {
        self.options.contains(&value)
    }

    /// Display position of the correct answer
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|&o| o == self.correct_answer)
    }

    /// Question text, e.g. "7 × 8 = ?"
    pub fn prompt(&self) -> String {
        format!("{} × {} = ?", self.factor_a, self.factor_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question {
            id: QuestionId(42),
            factor_a: 7,
            factor_b: 8,
            correct_answer: 56,
            options: [54, 63, 56, 48],
            difficulty: Difficulty::Normal,
        }
    }

    #[test]
    fn test_prompt_and_lookup() {
        let q = sample();
        assert_eq!(q.prompt(), "7 × 8 = ?");
        assert!(q.is_correct(56));
        assert!(!q.is_correct(54));
        assert!(q.has_option(48));
        assert!(!q.has_option(55));
        assert_eq!(q.correct_index(), Some(2));
    }

    #[test]
    fn test_id_display_base36() {
        assert_eq!(QuestionId(0).to_string(), "0");
        assert_eq!(QuestionId(35).to_string(), "z");
        assert_eq!(QuestionId(36).to_string(), "10");
        assert_eq!(QuestionId(u64::MAX).to_string(), "3w5e11264sgsf");
    }
}
