//! Stratified question sampler.
//!
//! Draws a balanced set from a bank: up to 4 easy, 4 medium, and 2 hard
//! questions, each stratum sampled uniformly without replacement, then the
//! concatenation is shuffled again so difficulty order is not observable.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Difficulty, Question};

/// Per-stratum quotas, in draw order.
pub const QUOTAS: [(Difficulty, usize); 3] = [
    (Difficulty::Easy, 4),
    (Difficulty::Medium, 4),
    (Difficulty::Hard, 2),
];

/// Maximum size of a selected question set.
pub const MAX_QUESTIONS: usize = 10;

/// Sample a question set from `bank` using the given randomness source.
///
/// A stratum with fewer questions than its quota contributes everything it
/// has, so the result may be shorter than [`MAX_QUESTIONS`]. The bank is
/// never mutated; selected questions are cloned out.
pub fn sample_questions<R: Rng + ?Sized>(bank: &[Question], rng: &mut R) -> Vec<Question> {
    let mut selected = Vec::with_capacity(MAX_QUESTIONS);

    for (difficulty, quota) in QUOTAS {
        let mut stratum: Vec<&Question> = bank
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .collect();
        stratum.shuffle(rng);
        selected.extend(stratum.into_iter().take(quota).cloned());
    }

    selected.shuffle(rng);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionBody;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn bank(easy: usize, medium: usize, hard: usize) -> Vec<Question> {
        let mut questions = Vec::new();
        let mut push = |difficulty: Difficulty, count: usize, tag: &str| {
            for i in 0..count {
                questions.push(Question {
                    id: format!("{tag}-{i}"),
                    difficulty,
                    prompt: format!("question {tag}-{i}"),
                    explanation: None,
                    body: QuestionBody::TrueFalse { answer: true },
                });
            }
        };
        push(Difficulty::Easy, easy, "easy");
        push(Difficulty::Medium, medium, "medium");
        push(Difficulty::Hard, hard, "hard");
        questions
    }

    fn difficulty_counts(selected: &[Question]) -> (usize, usize, usize) {
        let count = |d: Difficulty| selected.iter().filter(|q| q.difficulty == d).count();
        (
            count(Difficulty::Easy),
            count(Difficulty::Medium),
            count(Difficulty::Hard),
        )
    }

    #[test]
    fn full_bank_fills_every_quota() {
        let bank = bank(10, 10, 10);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selected = sample_questions(&bank, &mut rng);
            assert_eq!(selected.len(), MAX_QUESTIONS);
            assert_eq!(difficulty_counts(&selected), (4, 4, 2), "seed {seed}");

            let ids: HashSet<&str> = selected.iter().map(|q| q.id.as_str()).collect();
            assert_eq!(ids.len(), MAX_QUESTIONS, "duplicate ids with seed {seed}");
        }
    }

    #[test]
    fn exact_quota_bank_selects_everything() {
        let bank = bank(4, 4, 2);
        let mut rng = StdRng::seed_from_u64(7);
        let selected = sample_questions(&bank, &mut rng);
        assert_eq!(selected.len(), 10);
        assert_eq!(difficulty_counts(&selected), (4, 4, 2));
    }

    #[test]
    fn short_stratum_degrades_gracefully() {
        let bank = bank(2, 10, 0);
        let mut rng = StdRng::seed_from_u64(3);
        let selected = sample_questions(&bank, &mut rng);
        assert_eq!(difficulty_counts(&selected), (2, 4, 0));
        assert_eq!(selected.len(), 6);
    }

    #[test]
    fn empty_bank_selects_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample_questions(&[], &mut rng).is_empty());
    }

    #[test]
    fn bank_is_not_mutated() {
        let bank = bank(6, 6, 6);
        let ids_before: Vec<String> = bank.iter().map(|q| q.id.clone()).collect();
        let mut rng = StdRng::seed_from_u64(11);
        let _ = sample_questions(&bank, &mut rng);
        let ids_after: Vec<String> = bank.iter().map(|q| q.id.clone()).collect();
        assert_eq!(ids_before, ids_after);
    }

    #[test]
    fn seeded_sampling_is_deterministic() {
        let bank = bank(10, 10, 10);
        let pick = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            sample_questions(&bank, &mut rng)
                .iter()
                .map(|q| q.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(pick(42), pick(42));
    }

    #[test]
    fn final_shuffle_mixes_difficulties() {
        // With enough seeds, at least one draw must interleave strata; a
        // sampler that forgot the final shuffle would always emit
        // easy..medium..hard runs.
        let bank = bank(10, 10, 10);
        let interleaved = (0..50).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let selected = sample_questions(&bank, &mut rng);
            let difficulties: Vec<Difficulty> =
                selected.iter().map(|q| q.difficulty).collect();
            let mut sorted_runs = difficulties.clone();
            sorted_runs.sort_by_key(|d| match d {
                Difficulty::Easy => 0,
                Difficulty::Medium => 1,
                Difficulty::Hard => 2,
            });
            difficulties != sorted_runs
        });
        assert!(interleaved);
    }
}
