//! Study selection and progress statistics.

use crate::error::{Result, VocabError};
use crate::repository::WordRepository;
use crate::session::StudySession;
use crate::storage::{load_record, save_record, Storage, STATS_KEY};
use crate::types::{AggregateStats, StatsRecord, StudyMode, WordEntry, RECENT_PERFORMANCE_LIMIT};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;

/// Derives study lists and statistics from a repository, and owns the
/// session performance history.
///
/// Always reads the repository passed in; nothing is cached between calls.
pub struct StudyEngine<S: Storage> {
    storage: S,
    record: StatsRecord,
}

impl<S: Storage> StudyEngine<S> {
    /// Load the performance history. A missing record is an empty history.
    pub fn load(storage: S) -> Result<Self> {
        let mut record: StatsRecord = load_record(&storage, STATS_KEY)?.unwrap_or_default();
        truncate_history(&mut record.recent_performance);
        Ok(Self { storage, record })
    }

    /// Words to study in `mode`, as a copy of the collection.
    pub fn study_words<R: Storage>(&self, repo: &WordRepository<R>, mode: StudyMode) -> Vec<WordEntry> {
        self.study_words_with_rng(repo, mode, &mut rand::rng())
    }

    pub fn study_words_with_rng<R, G>(
        &self,
        repo: &WordRepository<R>,
        mode: StudyMode,
        rng: &mut G,
    ) -> Vec<WordEntry>
    where
        R: Storage,
        G: Rng + ?Sized,
    {
        let mut words = repo.list().to_vec();

        match mode {
            // Stable sort: equal scores keep repository order.
            StudyMode::Review => words.sort_by_key(|w| Reverse(w.difficulty_score())),
            StudyMode::Learn | StudyMode::Quiz => words.shuffle(rng),
        }

        tracing::debug!(mode = mode.as_str(), count = words.len(), "selected study words");
        words
    }

    pub fn start_session<R: Storage>(&self, repo: &WordRepository<R>, mode: StudyMode) -> StudySession {
        StudySession::new(mode, self.study_words(repo, mode))
    }

    /// Tier counts from the current entries plus the stored history.
    pub fn aggregate_stats<R: Storage>(&self, repo: &WordRepository<R>) -> AggregateStats {
        AggregateStats::compute(repo.list(), &self.record.recent_performance)
    }

    pub fn recent_performance(&self) -> &[f64] {
        &self.record.recent_performance
    }

    /// Append a session accuracy (0-100), keeping the most recent entries.
    pub fn record_study_session(&mut self, accuracy: f64) -> Result<()> {
        if !(0.0..=100.0).contains(&accuracy) {
            tracing::warn!(accuracy, "rejected session accuracy");
            return Err(VocabError::InvalidAccuracy(accuracy));
        }

        let mut next = self.record.clone();
        next.recent_performance.push(accuracy);
        truncate_history(&mut next.recent_performance);

        self.commit(next)?;
        tracing::info!(accuracy, "recorded study session");
        Ok(())
    }

    /// Record a finished session. Incomplete or empty sessions record nothing.
    ///
    /// Returns the accuracy that was recorded.
    pub fn complete_session(&mut self, session: &StudySession) -> Result<Option<f64>> {
        let Some(accuracy) = session.summary().and_then(|s| s.accuracy()) else {
            tracing::debug!(mode = session.mode().as_str(), "session not recorded");
            return Ok(None);
        };

        self.record_study_session(accuracy)?;
        Ok(Some(accuracy))
    }

    /// Forget the performance history.
    pub fn reset_all(&mut self) -> Result<()> {
        self.commit(StatsRecord::default())?;
        tracing::info!("reset statistics");
        Ok(())
    }

    fn commit(&mut self, next: StatsRecord) -> Result<()> {
        save_record(&self.storage, STATS_KEY, &next)?;
        self.record = next;
        Ok(())
    }
}

fn truncate_history(history: &mut Vec<f64>) {
    if history.len() > RECENT_PERFORMANCE_LIMIT {
        history.drain(..history.len() - RECENT_PERFORMANCE_LIMIT);
    }
}
