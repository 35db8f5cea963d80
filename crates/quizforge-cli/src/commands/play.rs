//! The `quizforge play` command.
//!
//! A thin terminal driver over the core session state machine: it collects
//! finished answers and renders session state; every rule (evaluation,
//! streaks, ordering) lives in `quizforge-core` and `quizforge-store`.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use quizforge_core::bank::{load_bank, validate_bank};
use quizforge_core::error::SessionError;
use quizforge_core::model::{AnswerPayload, Avatar, Question, QuestionBank, QuestionBody};
use quizforge_core::session::{GameSession, GameState};
use quizforge_store::ranking::DEFAULT_RANKING_LIMIT;
use quizforge_store::{FileStorage, GameResult, RankingStore};

use crate::commands::ranking::ranking_table;
use crate::config::load_config_from;

pub fn execute(
    bank_path: PathBuf,
    seed: Option<u64>,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let data_dir = data_dir.unwrap_or(config.data_dir);

    let bank = load_bank(&bank_path)?;
    for w in validate_bank(&bank) {
        eprintln!("warning: {}", w.message);
    }

    // One RNG drives both the sampler and the on-screen shuffles, so a
    // fixed --seed reproduces the whole run.
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    run(&bank, &mut rng, &mut input, &mut out, &data_dir)
}

/// Avatars offered during player configuration.
fn builtin_avatars() -> Vec<Avatar> {
    [
        ("avatar-1", "Cheerful", "😊"),
        ("avatar-2", "Explorer", "🚀"),
        ("avatar-3", "Thinker", "🧠"),
        ("avatar-4", "Star", "⭐"),
    ]
    .into_iter()
    .map(|(id, name, emoji)| Avatar {
        id: id.into(),
        name: name.into(),
        emoji: emoji.into(),
    })
    .collect()
}

fn run(
    bank: &QuestionBank,
    rng: &mut StdRng,
    input: &mut impl BufRead,
    out: &mut impl Write,
    data_dir: &Path,
) -> Result<()> {
    writeln!(out, "=== {} ===", bank.topic.title)?;
    if !bank.topic.description.is_empty() {
        writeln!(out, "{}", bank.topic.description)?;
    }
    writeln!(out)?;

    let mut session = GameSession::new();

    // Player configuration; the state machine rejects short initials.
    loop {
        let initials = prompt_line(input, out, "Initials (at least 2 characters): ")?;
        let avatars = builtin_avatars();
        writeln!(out, "Pick an avatar:")?;
        for (i, avatar) in avatars.iter().enumerate() {
            writeln!(out, "  {}. {} {}", i + 1, avatar.emoji, avatar.name)?;
        }
        let pick = prompt_index(input, out, "Avatar number: ", avatars.len())?;
        session.configure_player(&initials, avatars[pick].clone())?;

        match session.start_game_with_rng(&bank.questions, rng) {
            Ok(()) => break,
            Err(e @ (SessionError::InitialsTooShort | SessionError::AvatarMissing)) => {
                writeln!(out, "{e}. Try again.")?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    while session.state() == GameState::Playing {
        let question = session
            .current_question()
            .context("no current question while playing")?
            .clone();
        writeln!(
            out,
            "\nQuestion {}/{} [{}]",
            session.current_index() + 1,
            session.question_count(),
            question.difficulty
        )?;
        writeln!(out, "{}", question.prompt)?;

        let verdict = loop {
            let payload = collect_answer(&question, rng, input, out)?;
            match session.submit_answer(payload) {
                Ok(verdict) => break verdict,
                Err(SessionError::Evaluate(e)) if e.is_refusal() => {
                    writeln!(out, "Answer incomplete: {e}. Try again.")?;
                }
                Err(e) => return Err(e.into()),
            }
        };

        if verdict {
            writeln!(out, "Correct! Streak: {}", session.streak())?;
        } else {
            writeln!(out, "Incorrect.")?;
        }
        if let Some(explanation) = &question.explanation {
            writeln!(out, "{explanation}")?;
        }

        session.next_question()?;
    }

    let score = session.score();
    writeln!(
        out,
        "\nFinished! {} of {} correct — {}% {}",
        score.correct,
        score.total,
        score.percentage,
        "★".repeat(score.stars as usize)
    )?;
    writeln!(out, "Best streak: {}", session.max_streak())?;

    let result =
        GameResult::from_session(&session).context("session did not reach the results state")?;
    let mut store = RankingStore::new(FileStorage::new(data_dir));
    match store.save_ranking(&bank.topic.id, &result) {
        Some(entry) => {
            if let Some(position) = store.rank_position(&bank.topic.id, &entry.id) {
                writeln!(out, "You placed #{position} on '{}'.", bank.topic.title)?;
            }
            let top = store.topic_ranking(&bank.topic.id, DEFAULT_RANKING_LIMIT);
            writeln!(out, "{}", ranking_table(&top))?;
        }
        None => {
            writeln!(
                out,
                "The leaderboard could not be updated; your score still stands."
            )?;
        }
    }

    Ok(())
}

/// Collect a finished answer payload for one question.
fn collect_answer(
    question: &Question,
    rng: &mut StdRng,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<AnswerPayload> {
    match &question.body {
        QuestionBody::MultipleChoice { options, .. } => {
            for (i, option) in options.iter().enumerate() {
                writeln!(out, "  {}. {option}", i + 1)?;
            }
            let selected = prompt_index(input, out, "Your answer: ", options.len())?;
            Ok(AnswerPayload::MultipleChoice { selected })
        }
        QuestionBody::TrueFalse { .. } => {
            let selected = prompt_bool(input, out, "True or false? (t/f): ")?;
            Ok(AnswerPayload::TrueFalse { selected })
        }
        QuestionBody::FillBlanks { blanks } => {
            let mut entries = Vec::with_capacity(blanks.len());
            for i in 0..blanks.len() {
                entries.push(prompt_line(input, out, &format!("Blank {}: ", i + 1))?);
            }
            Ok(AnswerPayload::FillBlanks { entries })
        }
        QuestionBody::Matching { pairs } => {
            // The right column is shown shuffled; the player rebuilds the
            // original pairing, one left row at a time.
            let mut display: Vec<usize> = (0..pairs.len()).collect();
            display.shuffle(rng);
            for (i, &original) in display.iter().enumerate() {
                writeln!(out, "  {}. {}", i + 1, pairs[original].right)?;
            }

            let mut right_order = Vec::with_capacity(pairs.len());
            let mut used = vec![false; pairs.len()];
            for pair in pairs {
                let original = loop {
                    let pick = prompt_index(
                        input,
                        out,
                        &format!("Match for '{}': ", pair.left),
                        pairs.len(),
                    )?;
                    if used[pick] {
                        writeln!(out, "That item is already matched.")?;
                        continue;
                    }
                    used[pick] = true;
                    break display[pick];
                };
                right_order.push(original);
            }
            Ok(AnswerPayload::Matching { right_order })
        }
        QuestionBody::Classify { categories, items } => {
            writeln!(out, "Categories:")?;
            for (i, category) in categories.iter().enumerate() {
                writeln!(out, "  {}. {category}", i + 1)?;
            }

            let mut order: Vec<usize> = (0..items.len()).collect();
            order.shuffle(rng);
            let mut placements = HashMap::new();
            for &i in &order {
                let item = &items[i];
                let pick = prompt_index(
                    input,
                    out,
                    &format!("Category for '{}': ", item.text),
                    categories.len(),
                )?;
                placements.insert(item.id.clone(), categories[pick].clone());
            }
            Ok(AnswerPayload::Classify { placements })
        }
    }
}

/// Print `prompt` and read one trimmed line. Fails if stdin is closed.
fn prompt_line(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    anyhow::ensure!(read > 0, "input ended unexpectedly");
    Ok(line.trim().to_string())
}

/// Read a 1-based selection up to `max`, returning it zero-based.
fn prompt_index(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
    max: usize,
) -> Result<usize> {
    loop {
        let line = prompt_line(input, out, prompt)?;
        match line.parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => return Ok(n - 1),
            _ => writeln!(out, "Enter a number between 1 and {max}.")?,
        }
    }
}

fn prompt_bool(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> Result<bool> {
    loop {
        let line = prompt_line(input, out, prompt)?.to_lowercase();
        match line.as_str() {
            "t" | "true" => return Ok(true),
            "f" | "false" => return Ok(false),
            _ => writeln!(out, "Answer 't' or 'f'.")?,
        }
    }
}
