//! The `quizforge ranking` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use quizforge_store::{FileStorage, RankingEntry, RankingStore};

use crate::config::load_config_from;

pub fn execute(
    topic: String,
    limit: Option<usize>,
    player: Option<String>,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let data_dir = data_dir.unwrap_or(config.data_dir);
    let limit = limit.unwrap_or(config.ranking_limit);

    let store = RankingStore::new(FileStorage::new(data_dir));

    let entries = match &player {
        Some(initials) => store.player_best_scores(&topic, initials, limit),
        None => store.topic_ranking(&topic, limit),
    };

    if entries.is_empty() {
        match player {
            Some(initials) => println!("No results for player '{initials}' on topic '{topic}'."),
            None => println!("No results yet for topic '{topic}'."),
        }
        return Ok(());
    }

    println!("{}", ranking_table(&entries));

    let stats = store.topic_stats(&topic);
    println!(
        "{} play(s), {} unique player(s), average score {}%",
        stats.total_plays, stats.unique_players, stats.average_score
    );

    Ok(())
}

/// Render leaderboard entries as a table, ranked from 1.
pub fn ranking_table(entries: &[RankingEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Player", "Score", "Stars", "Best streak", "Date"]);
    for (i, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            format!("{} {}", entry.avatar.emoji, entry.initials),
            format!("{}% ({}/{})", entry.score, entry.correct, entry.total),
            "★".repeat(entry.stars as usize),
            entry.max_streak.to_string(),
            entry.date.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    table
}
