//! Per-type answer evaluators.
//!
//! One pure function per question format, mapping (question, raw answer)
//! to a correctness verdict. Every format is all-or-nothing: a question is
//! correct only if every sub-part (blank, pairing, item) is correct.

use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::EvaluateError;
use crate::model::{AnswerPayload, ClassifyItem, MatchPair, Question, QuestionBody};

/// Normalize free-text input for comparison: trim, lower-case, and strip
/// diacritics via NFD decomposition with combining marks removed, so that
/// `"Méseta "` and `"meseta"` compare equal.
pub fn normalize_text(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Evaluate a raw answer against a question.
///
/// Returns the correctness verdict, a refusal if the input is incomplete
/// (see [`EvaluateError::is_refusal`]), or a hard error for mismatched
/// payloads and malformed question data.
pub fn evaluate(question: &Question, answer: &AnswerPayload) -> Result<bool, EvaluateError> {
    match (&question.body, answer) {
        (
            QuestionBody::MultipleChoice {
                options,
                correct_index,
            },
            AnswerPayload::MultipleChoice { selected },
        ) => evaluate_multiple_choice(&question.id, options, *correct_index, *selected),
        (QuestionBody::TrueFalse { answer: expected }, AnswerPayload::TrueFalse { selected }) => {
            Ok(*selected == *expected)
        }
        (QuestionBody::FillBlanks { blanks }, AnswerPayload::FillBlanks { entries }) => {
            evaluate_fill_blanks(&question.id, blanks, entries)
        }
        (QuestionBody::Matching { pairs }, AnswerPayload::Matching { right_order }) => {
            evaluate_matching(pairs, right_order)
        }
        (
            QuestionBody::Classify { categories, items },
            AnswerPayload::Classify { placements },
        ) => evaluate_classify(categories, items, placements),
        (body, answer) => Err(EvaluateError::PayloadMismatch {
            expected: body.kind(),
            got: answer.kind(),
        }),
    }
}

fn evaluate_multiple_choice(
    question_id: &str,
    options: &[String],
    correct_index: usize,
    selected: usize,
) -> Result<bool, EvaluateError> {
    if correct_index >= options.len() {
        return Err(EvaluateError::MalformedQuestion {
            id: question_id.to_string(),
            reason: format!(
                "correct_index {correct_index} out of range for {} options",
                options.len()
            ),
        });
    }
    if selected >= options.len() {
        return Err(EvaluateError::ChoiceOutOfRange {
            selected,
            options: options.len(),
        });
    }
    Ok(selected == correct_index)
}

fn evaluate_fill_blanks(
    question_id: &str,
    blanks: &[Vec<String>],
    entries: &[String],
) -> Result<bool, EvaluateError> {
    if blanks.iter().any(|variants| variants.is_empty()) {
        return Err(EvaluateError::MalformedQuestion {
            id: question_id.to_string(),
            reason: "blank with no accepted variants".into(),
        });
    }
    if entries.len() != blanks.len() {
        return Err(EvaluateError::BlankCountMismatch {
            expected: blanks.len(),
            got: entries.len(),
        });
    }
    // All blanks must be non-empty before evaluation is allowed.
    if let Some(index) = entries.iter().position(|e| e.trim().is_empty()) {
        return Err(EvaluateError::EmptyBlank { index });
    }

    Ok(entries.iter().zip(blanks).all(|(entry, variants)| {
        let entry = normalize_text(entry);
        variants.iter().any(|v| normalize_text(v) == entry)
    }))
}

fn evaluate_matching(pairs: &[MatchPair], right_order: &[usize]) -> Result<bool, EvaluateError> {
    let n = pairs.len();
    let mut seen = vec![false; n];
    let valid = right_order.len() == n
        && right_order.iter().all(|&i| {
            if i >= n || seen[i] {
                false
            } else {
                seen[i] = true;
                true
            }
        });
    if !valid {
        return Err(EvaluateError::InvalidOrdering { pairs: n });
    }
    // The left column is fixed, so the pairing is restored exactly when
    // the right column is back in its original index order.
    Ok(right_order.iter().enumerate().all(|(pos, &idx)| pos == idx))
}

fn evaluate_classify(
    categories: &[String],
    items: &[ClassifyItem],
    placements: &HashMap<String, String>,
) -> Result<bool, EvaluateError> {
    for (item_id, category) in placements {
        if !items.iter().any(|i| &i.id == item_id) {
            return Err(EvaluateError::UnknownPlacement {
                what: "item",
                name: item_id.clone(),
            });
        }
        if !categories.contains(category) {
            return Err(EvaluateError::UnknownPlacement {
                what: "category",
                name: category.clone(),
            });
        }
    }
    // Evaluation is only permitted once every item has been placed.
    if let Some(item) = items.iter().find(|i| !placements.contains_key(&i.id)) {
        return Err(EvaluateError::UnplacedItem {
            item_id: item.id.clone(),
        });
    }

    Ok(items
        .iter()
        .all(|item| placements.get(&item.id) == Some(&item.category)))
}
