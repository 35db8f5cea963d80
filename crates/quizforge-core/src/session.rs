//! The single-player session state machine.
//!
//! A [`GameSession`] is an explicit value object; all mutation goes through
//! its transition methods and every illegal call is rejected with the
//! session left untouched. The lifecycle is fixed:
//!
//! ```text
//! PlayerConfig --start_game--> Playing --submit_answer--> Feedback
//!      ^                          ^                          |
//!      |                          +------next_question-------+
//!      +-----------reset_game-- Results <---(last question)--+
//! ```

use std::fmt;

use chrono::Utc;
use rand::Rng;

use crate::error::SessionError;
use crate::evaluate::evaluate;
use crate::model::{AnswerPayload, AnswerRecord, Avatar, Player, Question};
use crate::sampler::sample_questions;
use crate::score::{compute_score, Score};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Collecting player initials and avatar.
    PlayerConfig,
    /// Waiting for the answer to the current question.
    Playing,
    /// Showing the verdict for the just-answered question.
    Feedback,
    /// All questions answered; terminal until reset.
    Results,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::PlayerConfig => write!(f, "player-config"),
            GameState::Playing => write!(f, "playing"),
            GameState::Feedback => write!(f, "feedback"),
            GameState::Results => write!(f, "results"),
        }
    }
}

/// A single-player quiz session.
#[derive(Debug, Clone)]
pub struct GameSession {
    player: Player,
    state: GameState,
    selected_questions: Vec<Question>,
    current_index: usize,
    answers: Vec<AnswerRecord>,
    last_answer: Option<AnswerRecord>,
    streak: u32,
    max_streak: u32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Create a fresh session in the player-config state.
    pub fn new() -> Self {
        Self {
            player: Player::default(),
            state: GameState::PlayerConfig,
            selected_questions: Vec::new(),
            current_index: 0,
            answers: Vec::new(),
            last_answer: None,
            streak: 0,
            max_streak: 0,
        }
    }

    /// Set the player's initials and avatar. Initials are stored trimmed
    /// and upper-cased; length is validated when the game starts.
    pub fn configure_player(&mut self, initials: &str, avatar: Avatar) -> Result<(), SessionError> {
        if self.state != GameState::PlayerConfig {
            return Err(self.invalid("configure_player"));
        }
        self.player = Player {
            initials: initials.trim().to_uppercase(),
            avatar: Some(avatar),
        };
        Ok(())
    }

    /// Sample a question set from `bank` and transition to Playing.
    ///
    /// Rejected while any game is in progress, when the player is not
    /// fully configured (initials shorter than two characters, no avatar),
    /// or when the bank yields no questions.
    pub fn start_game(&mut self, bank: &[Question]) -> Result<(), SessionError> {
        self.start_game_with_rng(bank, &mut rand::thread_rng())
    }

    /// [`Self::start_game`] with an injected randomness source, so tests
    /// can seed the sampler.
    pub fn start_game_with_rng<R: Rng + ?Sized>(
        &mut self,
        bank: &[Question],
        rng: &mut R,
    ) -> Result<(), SessionError> {
        if self.state != GameState::PlayerConfig {
            return Err(self.invalid("start_game"));
        }
        if self.player.initials.chars().count() < 2 {
            return Err(SessionError::InitialsTooShort);
        }
        if self.player.avatar.is_none() {
            return Err(SessionError::AvatarMissing);
        }

        let selected = sample_questions(bank, rng);
        if selected.is_empty() {
            return Err(SessionError::EmptyBank);
        }

        self.selected_questions = selected;
        self.current_index = 0;
        self.answers = Vec::new();
        self.last_answer = None;
        self.streak = 0;
        self.max_streak = 0;
        self.state = GameState::Playing;
        Ok(())
    }

    /// Evaluate `raw` against the current question, append the answer
    /// record, update the streak counters, and transition to Feedback.
    ///
    /// Returns the verdict. An incomplete answer (empty blank, unplaced
    /// item) is refused without writing a record, leaving the session in
    /// Playing; submitting while in Feedback is rejected, so each question
    /// is answered exactly once.
    pub fn submit_answer(&mut self, raw: AnswerPayload) -> Result<bool, SessionError> {
        if self.state != GameState::Playing {
            return Err(self.invalid("submit_answer"));
        }
        let question = &self.selected_questions[self.current_index];
        let is_correct = evaluate(question, &raw)?;

        let record = AnswerRecord {
            question_id: question.id.clone(),
            raw_answer: raw,
            is_correct,
            timestamp: Utc::now(),
        };
        self.answers.push(record.clone());
        self.last_answer = Some(record);

        if is_correct {
            self.streak += 1;
            self.max_streak = self.max_streak.max(self.streak);
        } else {
            self.streak = 0;
        }

        self.state = GameState::Feedback;
        Ok(is_correct)
    }

    /// Leave the feedback phase: advance to the next question, or to
    /// Results after the last one.
    pub fn next_question(&mut self) -> Result<(), SessionError> {
        if self.state != GameState::Feedback {
            return Err(self.invalid("next_question"));
        }
        if self.current_index + 1 < self.selected_questions.len() {
            self.current_index += 1;
            self.last_answer = None;
            self.state = GameState::Playing;
        } else {
            self.state = GameState::Results;
        }
        Ok(())
    }

    /// Clear every session field and return to player configuration.
    /// Only legal from the Results state.
    pub fn reset_game(&mut self) -> Result<(), SessionError> {
        if self.state != GameState::Results {
            return Err(self.invalid("reset_game"));
        }
        *self = Self::new();
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidAction {
            action,
            state: self.state,
        }
    }

    // --- Read accessors for the presentation layer ---

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The question currently being played or reviewed, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.selected_questions.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn question_count(&self) -> usize {
        self.selected_questions.len()
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// The record written for the question under feedback, if any.
    pub fn last_answer(&self) -> Option<&AnswerRecord> {
        self.last_answer.as_ref()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    /// The score derived from the answers recorded so far.
    pub fn score(&self) -> Score {
        compute_score(&self.answers)
    }
}
