//! Per-topic leaderboard with ordering, capacity, and rank queries.
//!
//! Rankings are kept as one JSON document under a single storage key:
//! a map of `topicId` to an ordered entry list. Ordering (score
//! descending, then date descending) is re-applied on every save, and each
//! topic keeps at most [`RANKING_CAPACITY`] entries.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quizforge_core::model::Avatar;
use quizforge_core::score::Score;
use quizforge_core::session::{GameSession, GameState};

use crate::storage::{KeyValueStorage, StorageError};

/// Maximum entries retained per topic.
pub const RANKING_CAPACITY: usize = 100;

/// Default number of entries returned by ranking queries.
pub const DEFAULT_RANKING_LIMIT: usize = 10;

/// Storage key holding the whole ranking document.
const RANKINGS_KEY: &str = "rankings";

/// One persisted leaderboard entry. Field names are camelCase on the wire
/// for compatibility with previously stored documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub id: String,
    pub topic_id: String,
    pub initials: String,
    pub avatar: Avatar,
    /// Session percentage, 0–100.
    pub score: u8,
    pub correct: u32,
    pub total: u32,
    pub stars: u8,
    pub max_streak: u32,
    pub date: DateTime<Utc>,
}

/// A finished session's result, ready to be ranked.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub initials: String,
    pub avatar: Avatar,
    pub score: Score,
    pub max_streak: u32,
}

impl GameResult {
    /// Extract the result of a session that has reached the Results state.
    /// Returns `None` for sessions in any other state.
    pub fn from_session(session: &GameSession) -> Option<Self> {
        if session.state() != GameState::Results {
            return None;
        }
        let avatar = session.player().avatar.clone()?;
        Some(Self {
            initials: session.player().initials.clone(),
            avatar,
            score: session.score(),
            max_streak: session.max_streak(),
        })
    }
}

/// Aggregated statistics over one topic's leaderboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicStats {
    pub total_plays: usize,
    pub average_score: u32,
    pub highest_score: u8,
    pub unique_players: usize,
}

/// The per-topic leaderboard store.
pub struct RankingStore<S: KeyValueStorage> {
    storage: S,
}

type RankingMap = HashMap<String, Vec<RankingEntry>>;

impl<S: KeyValueStorage> RankingStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persist a finished session's result under `topic_id`.
    ///
    /// Builds the entry (fresh UUID, current timestamp), re-sorts the
    /// topic list, truncates it to [`RANKING_CAPACITY`], and writes the
    /// document back. Returns the saved entry, or `None` when the write
    /// fails — the caller's session is never rolled back, the leaderboard
    /// update is simply lost.
    pub fn save_ranking(&mut self, topic_id: &str, result: &GameResult) -> Option<RankingEntry> {
        let entry = RankingEntry {
            id: Uuid::new_v4().to_string(),
            topic_id: topic_id.to_string(),
            initials: result.initials.clone(),
            avatar: result.avatar.clone(),
            score: result.score.percentage,
            correct: result.score.correct,
            total: result.score.total,
            stars: result.score.stars,
            max_streak: result.max_streak,
            date: Utc::now(),
        };

        let mut rankings = self.load_all();
        let topic = rankings.entry(topic_id.to_string()).or_default();
        topic.push(entry.clone());
        sort_entries(topic);
        topic.truncate(RANKING_CAPACITY);

        match self.persist_all(&rankings) {
            Ok(()) => Some(entry),
            Err(e) => {
                tracing::error!("failed to save ranking for topic '{topic_id}': {e}");
                None
            }
        }
    }

    /// The top `limit` entries of a topic, in stored order.
    pub fn topic_ranking(&self, topic_id: &str, limit: usize) -> Vec<RankingEntry> {
        let mut entries = self.topic_entries(topic_id);
        entries.truncate(limit);
        entries
    }

    /// 1-based position of an entry within the full stored list for its
    /// topic, or `None` if the entry is absent (e.g. already evicted).
    pub fn rank_position(&self, topic_id: &str, entry_id: &str) -> Option<usize> {
        self.topic_entries(topic_id)
            .iter()
            .position(|e| e.id == entry_id)
            .map(|i| i + 1)
    }

    /// A player's entries for a topic in stored order, compared by
    /// initials case-insensitively.
    pub fn player_best_scores(
        &self,
        topic_id: &str,
        initials: &str,
        limit: usize,
    ) -> Vec<RankingEntry> {
        let wanted = initials.to_uppercase();
        let mut entries: Vec<RankingEntry> = self
            .topic_entries(topic_id)
            .into_iter()
            .filter(|e| e.initials.to_uppercase() == wanted)
            .collect();
        entries.truncate(limit);
        entries
    }

    /// Aggregate statistics for a topic; all zeroes when it has no
    /// entries.
    pub fn topic_stats(&self, topic_id: &str) -> TopicStats {
        let entries = self.topic_entries(topic_id);
        if entries.is_empty() {
            return TopicStats::default();
        }

        let total_plays = entries.len();
        let sum: u32 = entries.iter().map(|e| u32::from(e.score)).sum();
        let average_score =
            (f64::from(sum) / total_plays as f64).round() as u32;
        let highest_score = entries[0].score;
        let unique_players = entries
            .iter()
            .map(|e| e.initials.to_uppercase())
            .collect::<HashSet<_>>()
            .len();

        TopicStats {
            total_plays,
            average_score,
            highest_score,
            unique_players,
        }
    }

    /// Remove every stored ranking.
    pub fn clear_all(&mut self) -> Result<(), StorageError> {
        self.storage.remove(RANKINGS_KEY)
    }

    fn topic_entries(&self, topic_id: &str) -> Vec<RankingEntry> {
        self.load_all().remove(topic_id).unwrap_or_default()
    }

    /// Read the full ranking document, treating a missing or unreadable
    /// value as empty.
    fn load_all(&self) -> RankingMap {
        let raw = match self.storage.get(RANKINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return RankingMap::new(),
            Err(e) => {
                tracing::error!("failed to read rankings: {e}");
                return RankingMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                tracing::error!("discarding corrupt ranking document: {e}");
                RankingMap::new()
            }
        }
    }

    fn persist_all(&mut self, rankings: &RankingMap) -> Result<(), StorageError> {
        let json = serde_json::to_string(rankings)
            .map_err(|e| StorageError::Unavailable(format!("serialization failed: {e}")))?;
        self.storage.set(RANKINGS_KEY, &json)
    }
}

/// Score descending, then date descending (more recent wins ties).
fn sort_entries(entries: &mut [RankingEntry]) {
    entries.sort_by(|a, b| b.score.cmp(&a.score).then(b.date.cmp(&a.date)));
}
