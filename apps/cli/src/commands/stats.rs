//! Statistics commands.

use crate::state::AppState;
use serde::Serialize;
use vocab_core::AggregateStats;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: AggregateStats,
    pub learning_progress: u32,
}

/// Get overall progress statistics.
pub fn get_stats(state: &AppState) -> StatsReport {
    let stats = state.engine.aggregate_stats(&state.repository);
    StatsReport {
        learning_progress: stats.learning_progress(),
        stats,
    }
}

/// Delete all words and the session history.
pub fn reset_all(state: &mut AppState) -> anyhow::Result<()> {
    state.repository.clear()?;
    state.engine.reset_all()?;
    tracing::info!("reset all words and progress");
    Ok(())
}
