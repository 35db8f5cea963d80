//! Final score derivation.
//!
//! A pure function over the answer log; nothing here is cached or stored.

use serde::{Deserialize, Serialize};

use crate::model::AnswerRecord;

/// Derived session score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Number of correct answers.
    pub correct: u32,
    /// Number of answered questions.
    pub total: u32,
    /// `round(100 * correct / total)`, 0 when nothing was answered.
    pub percentage: u8,
    /// 3 at ≥90%, 2 at ≥70%, 1 at ≥50%, else 0.
    pub stars: u8,
}

/// Compute the score for an answer log.
pub fn compute_score(answers: &[AnswerRecord]) -> Score {
    let correct = answers.iter().filter(|a| a.is_correct).count() as u32;
    let total = answers.len() as u32;
    let percentage = if total == 0 {
        0
    } else {
        (100.0 * f64::from(correct) / f64::from(total)).round() as u8
    };
    let stars = match percentage {
        90..=100 => 3,
        70..=89 => 2,
        50..=69 => 1,
        _ => 0,
    };

    Score {
        correct,
        total,
        percentage,
        stars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerPayload;
    use chrono::Utc;

    fn answers(verdicts: &[bool]) -> Vec<AnswerRecord> {
        verdicts
            .iter()
            .enumerate()
            .map(|(i, &is_correct)| AnswerRecord {
                question_id: format!("q{i}"),
                raw_answer: AnswerPayload::TrueFalse { selected: true },
                is_correct,
                timestamp: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn empty_log_scores_zero() {
        let score = compute_score(&[]);
        assert_eq!(
            score,
            Score {
                correct: 0,
                total: 0,
                percentage: 0,
                stars: 0
            }
        );
    }

    #[test]
    fn perfect_run_earns_three_stars() {
        let score = compute_score(&answers(&[true; 10]));
        assert_eq!(score.correct, 10);
        assert_eq!(score.total, 10);
        assert_eq!(score.percentage, 100);
        assert_eq!(score.stars, 3);
    }

    #[test]
    fn star_thresholds() {
        // 9/10 = 90% → 3 stars; 7/10 = 70% → 2; 5/10 = 50% → 1; 4/10 → 0.
        let run = |correct: usize| {
            let mut verdicts = vec![true; correct];
            verdicts.resize(10, false);
            compute_score(&answers(&verdicts)).stars
        };
        assert_eq!(run(10), 3);
        assert_eq!(run(9), 3);
        assert_eq!(run(8), 2);
        assert_eq!(run(7), 2);
        assert_eq!(run(6), 1);
        assert_eq!(run(5), 1);
        assert_eq!(run(4), 0);
        assert_eq!(run(0), 0);
    }

    #[test]
    fn percentage_is_rounded() {
        // 2/3 = 66.67% → 67; 1/3 = 33.33% → 33.
        assert_eq!(compute_score(&answers(&[true, true, false])).percentage, 67);
        assert_eq!(compute_score(&answers(&[true, false, false])).percentage, 33);
    }

    #[test]
    fn rounding_can_cross_a_star_threshold() {
        // 7/8 = 87.5% rounds to 88 → still 2 stars; 8/9 = 88.9% → 89 → 2;
        // 9/10 = 90 → 3. The thresholds apply to the rounded percentage.
        let run = |correct: usize, total: usize| {
            let mut verdicts = vec![true; correct];
            verdicts.resize(total, false);
            compute_score(&answers(&verdicts))
        };
        assert_eq!(run(7, 8).percentage, 88);
        assert_eq!(run(7, 8).stars, 2);
        assert_eq!(run(17, 19).percentage, 89);
        assert_eq!(run(17, 19).stars, 2);
    }
}
