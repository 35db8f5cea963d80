//! Core data model types for quizforge.
//!
//! These are the fundamental types the entire quizforge system uses to
//! represent questions, players, answers, and question banks.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Difficulty tier of a question. Drives the stratified sampler quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// The five supported question formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    FillBlanks,
    Matching,
    Classify,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multipleChoice"),
            QuestionKind::TrueFalse => write!(f, "trueFalse"),
            QuestionKind::FillBlanks => write!(f, "fillBlanks"),
            QuestionKind::Matching => write!(f, "matching"),
            QuestionKind::Classify => write!(f, "classify"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multipleChoice" => Ok(QuestionKind::MultipleChoice),
            "trueFalse" => Ok(QuestionKind::TrueFalse),
            "fillBlanks" => Ok(QuestionKind::FillBlanks),
            "matching" => Ok(QuestionKind::Matching),
            "classify" => Ok(QuestionKind::Classify),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A single question in a bank.
///
/// Created when the bank is loaded and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the bank.
    pub id: String,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// The question text shown to the player.
    pub prompt: String,
    /// Optional explanation shown in the feedback phase.
    #[serde(default)]
    pub explanation: Option<String>,
    /// The type-specific payload.
    pub body: QuestionBody,
}

impl Question {
    /// The question format of this entry.
    pub fn kind(&self) -> QuestionKind {
        self.body.kind()
    }
}

/// Type-specific question payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QuestionBody {
    /// Pick one option out of several.
    MultipleChoice {
        options: Vec<String>,
        correct_index: usize,
    },
    /// A statement that is either true or false.
    TrueFalse { answer: bool },
    /// Fill each blank with free text; every blank carries a list of
    /// accepted variants.
    FillBlanks { blanks: Vec<Vec<String>> },
    /// Reorder the right column to restore the original pairing.
    Matching { pairs: Vec<MatchPair> },
    /// Distribute every item into its ground-truth category.
    Classify {
        categories: Vec<String>,
        items: Vec<ClassifyItem>,
    },
}

impl QuestionBody {
    pub fn kind(&self) -> QuestionKind {
        match self {
            QuestionBody::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            QuestionBody::TrueFalse { .. } => QuestionKind::TrueFalse,
            QuestionBody::FillBlanks { .. } => QuestionKind::FillBlanks,
            QuestionBody::Matching { .. } => QuestionKind::Matching,
            QuestionBody::Classify { .. } => QuestionKind::Classify,
        }
    }
}

/// One left/right pair of a matching question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

/// One item of a classify question with its ground-truth category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyItem {
    pub id: String,
    pub text: String,
    pub category: String,
}

/// Raw user input for one question, produced by the presentation layer.
///
/// The variant must match the current question's [`QuestionKind`]; the core
/// only ever receives a finished answer (a selection, a final ordering, a
/// final partition), never intermediate interaction events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnswerPayload {
    MultipleChoice { selected: usize },
    TrueFalse { selected: bool },
    FillBlanks { entries: Vec<String> },
    /// `right_order[i]` is the original pair index of the right item the
    /// player placed at row `i`.
    Matching { right_order: Vec<usize> },
    /// Item id mapped to the category name the player chose for it.
    Classify { placements: HashMap<String, String> },
}

impl AnswerPayload {
    pub fn kind(&self) -> QuestionKind {
        match self {
            AnswerPayload::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            AnswerPayload::TrueFalse { .. } => QuestionKind::TrueFalse,
            AnswerPayload::FillBlanks { .. } => QuestionKind::FillBlanks,
            AnswerPayload::Matching { .. } => QuestionKind::Matching,
            AnswerPayload::Classify { .. } => QuestionKind::Classify,
        }
    }
}

/// One evaluated answer in the session log.
///
/// Appended exactly once per question, in question order; never mutated or
/// removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub raw_answer: AnswerPayload,
    pub is_correct: bool,
    pub timestamp: DateTime<Utc>,
}

/// A player's avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub id: String,
    pub name: String,
    pub emoji: String,
}

/// Player identity for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    pub initials: String,
    pub avatar: Option<Avatar>,
}

/// Topic metadata carried in a bank header. The `id` keys the leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A parsed question bank: topic metadata plus its questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    pub topic: TopicInfo,
    pub questions: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert_eq!(Difficulty::Hard.to_string(), "hard");
        assert_eq!("medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn question_kind_display_and_parse() {
        assert_eq!(QuestionKind::MultipleChoice.to_string(), "multipleChoice");
        assert_eq!(QuestionKind::FillBlanks.to_string(), "fillBlanks");
        assert_eq!(
            "classify".parse::<QuestionKind>().unwrap(),
            QuestionKind::Classify
        );
        assert!("essay".parse::<QuestionKind>().is_err());
    }

    #[test]
    fn body_kind_matches_variant() {
        let body = QuestionBody::TrueFalse { answer: true };
        assert_eq!(body.kind(), QuestionKind::TrueFalse);

        let body = QuestionBody::Matching {
            pairs: vec![MatchPair {
                left: "Asia".into(),
                right: "largest continent".into(),
            }],
        };
        assert_eq!(body.kind(), QuestionKind::Matching);
    }

    #[test]
    fn question_serde_roundtrip() {
        let question = Question {
            id: "geo-q1".into(),
            difficulty: Difficulty::Easy,
            prompt: "What is a mountain range?".into(),
            explanation: Some("A group of large mountains.".into()),
            body: QuestionBody::MultipleChoice {
                options: vec!["A group of mountains".into(), "A flat plain".into()],
                correct_index: 0,
            },
        };
        let json = serde_json::to_string(&question).unwrap();
        assert!(json.contains("\"multipleChoice\""), "tag should be camelCase: {json}");
        let deserialized: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id, "geo-q1");
        assert_eq!(deserialized.kind(), QuestionKind::MultipleChoice);
    }

    #[test]
    fn answer_payload_kind() {
        let payload = AnswerPayload::FillBlanks {
            entries: vec!["island".into()],
        };
        assert_eq!(payload.kind(), QuestionKind::FillBlanks);
    }
}
