//! TOML question-bank parser.
//!
//! Loads question banks from TOML files and directories, and validates
//! them. Structural problems (wrong payload for a question type,
//! out-of-range indices, unknown categories) are hard parse errors so a
//! malformed bank never reaches a session; softer authoring issues are
//! reported as warnings.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    ClassifyItem, Difficulty, MatchPair, Question, QuestionBank, QuestionBody, QuestionKind,
    TopicInfo,
};
use crate::sampler::QUOTAS;

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    topic: TomlTopic,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlTopic {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    difficulty: String,
    prompt: String,
    #[serde(default)]
    explanation: Option<String>,
    // Per-type payload fields; exactly one group must be present.
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    correct_index: Option<usize>,
    #[serde(default)]
    answer: Option<bool>,
    #[serde(default)]
    blanks: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pairs: Option<Vec<TomlPair>>,
    #[serde(default)]
    categories: Option<Vec<String>>,
    #[serde(default)]
    items: Option<Vec<TomlItem>>,
}

#[derive(Debug, Deserialize)]
struct TomlPair {
    left: String,
    right: String,
}

#[derive(Debug, Deserialize)]
struct TomlItem {
    id: String,
    text: String,
    category: String,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn load_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;

    load_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn load_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(convert_question)
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank {
        topic: TopicInfo {
            id: parsed.topic.id,
            title: parsed.topic.title,
            description: parsed.topic.description,
        },
        questions,
    })
}

fn convert_question(q: TomlQuestion) -> Result<Question> {
    let kind: QuestionKind = q
        .kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!("question '{}': {e}", q.id))?;
    let difficulty: Difficulty = q
        .difficulty
        .parse()
        .map_err(|e: String| anyhow::anyhow!("question '{}': {e}", q.id))?;

    let body = match kind {
        QuestionKind::MultipleChoice => {
            let options = q
                .options
                .with_context(|| format!("question '{}': multipleChoice needs options", q.id))?;
            let correct_index = q.correct_index.with_context(|| {
                format!("question '{}': multipleChoice needs correct_index", q.id)
            })?;
            anyhow::ensure!(
                options.len() >= 2,
                "question '{}': needs at least 2 options",
                q.id
            );
            anyhow::ensure!(
                correct_index < options.len(),
                "question '{}': correct_index {} out of range for {} options",
                q.id,
                correct_index,
                options.len()
            );
            QuestionBody::MultipleChoice {
                options,
                correct_index,
            }
        }
        QuestionKind::TrueFalse => {
            let answer = q
                .answer
                .with_context(|| format!("question '{}': trueFalse needs answer", q.id))?;
            QuestionBody::TrueFalse { answer }
        }
        QuestionKind::FillBlanks => {
            let blanks = q
                .blanks
                .with_context(|| format!("question '{}': fillBlanks needs blanks", q.id))?;
            anyhow::ensure!(
                !blanks.is_empty(),
                "question '{}': needs at least 1 blank",
                q.id
            );
            anyhow::ensure!(
                blanks.iter().all(|variants| !variants.is_empty()),
                "question '{}': every blank needs at least one accepted variant",
                q.id
            );
            QuestionBody::FillBlanks { blanks }
        }
        QuestionKind::Matching => {
            let pairs = q
                .pairs
                .with_context(|| format!("question '{}': matching needs pairs", q.id))?;
            anyhow::ensure!(
                pairs.len() >= 2,
                "question '{}': needs at least 2 pairs",
                q.id
            );
            QuestionBody::Matching {
                pairs: pairs
                    .into_iter()
                    .map(|p| MatchPair {
                        left: p.left,
                        right: p.right,
                    })
                    .collect(),
            }
        }
        QuestionKind::Classify => {
            let categories = q
                .categories
                .with_context(|| format!("question '{}': classify needs categories", q.id))?;
            let items = q
                .items
                .with_context(|| format!("question '{}': classify needs items", q.id))?;
            anyhow::ensure!(
                categories.len() >= 2,
                "question '{}': needs at least 2 categories",
                q.id
            );
            anyhow::ensure!(
                !items.is_empty(),
                "question '{}': needs at least 1 item",
                q.id
            );
            for item in &items {
                anyhow::ensure!(
                    categories.contains(&item.category),
                    "question '{}': item '{}' references undeclared category '{}'",
                    q.id,
                    item.id,
                    item.category
                );
            }
            QuestionBody::Classify {
                categories,
                items: items
                    .into_iter()
                    .map(|i| ClassifyItem {
                        id: i.id,
                        text: i.text,
                        category: i.category,
                    })
                    .collect(),
            }
        }
    };

    Ok(Question {
        id: q.id,
        difficulty,
        prompt: q.prompt,
        explanation: q.explanation,
        body,
    })
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match load_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for common authoring issues.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate question IDs
    let mut seen_ids = HashSet::new();
    for question in &bank.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question ID: {}", question.id),
            });
        }
    }

    // Empty prompts
    for question in &bank.questions {
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "prompt is empty".into(),
            });
        }
    }

    // Strata too thin to fill the sampler quotas
    for (difficulty, quota) in QUOTAS {
        let available = bank
            .questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .count();
        if available < quota {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!(
                    "only {available} {difficulty} question(s) for a quota of {quota}; sessions will run short"
                ),
            });
        }
    }

    // Duplicate classify item IDs and duplicate categories within a question
    for question in &bank.questions {
        if let QuestionBody::Classify { categories, items } = &question.body {
            let mut item_ids = HashSet::new();
            for item in items {
                if !item_ids.insert(&item.id) {
                    warnings.push(ValidationWarning {
                        question_id: Some(question.id.clone()),
                        message: format!("duplicate classify item ID: {}", item.id),
                    });
                }
            }
            let mut cats = HashSet::new();
            for category in categories {
                if !cats.insert(category) {
                    warnings.push(ValidationWarning {
                        question_id: Some(question.id.clone()),
                        message: format!("duplicate category: {category}"),
                    });
                }
            }
        }
    }

    warnings
}
