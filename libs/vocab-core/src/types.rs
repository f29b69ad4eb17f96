//! Core types for the vocabulary trainer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of session results kept in the performance history.
pub const RECENT_PERFORMANCE_LIMIT: usize = 7;

/// Normalize an English word into its dedup key.
pub fn dedup_key(english: &str) -> String {
    english.trim().to_lowercase()
}

/// English–Russian pair as supplied by an importer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub english: String,
    pub russian: String,
}

impl WordPair {
    pub fn new(english: impl Into<String>, russian: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            russian: russian.into(),
        }
    }
}

/// A vocabulary entry with its performance counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: String,
    pub english: String,
    pub russian: String,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub last_studied: Option<DateTime<Utc>>,
}

impl WordEntry {
    /// Create a fresh entry with a new id and zeroed counters.
    pub fn new(english: impl Into<String>, russian: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            english: english.into(),
            russian: russian.into(),
            correct_count: 0,
            incorrect_count: 0,
            last_studied: None,
        }
    }

    pub fn key(&self) -> String {
        dedup_key(&self.english)
    }

    /// How much more often the word was missed than answered.
    pub fn difficulty_score(&self) -> i64 {
        i64::from(self.incorrect_count) - i64::from(self.correct_count)
    }

    pub fn tier(&self) -> MasteryTier {
        MasteryTier::classify(self.correct_count, self.incorrect_count)
    }
}

/// Partial edit of a word's text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub russian: Option<String>,
}

/// Mastery classification of a single word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryTier {
    Mastered,
    Learning,
    Difficult,
}

impl MasteryTier {
    /// Classify counters. Mastered is checked first, then difficult; the
    /// remainder is learning, so every word lands in exactly one tier.
    pub fn classify(correct: u32, incorrect: u32) -> Self {
        if correct >= 3 && u64::from(correct) > 2 * u64::from(incorrect) {
            Self::Mastered
        } else if incorrect > correct {
            Self::Difficult
        } else {
            Self::Learning
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mastered => "mastered",
            Self::Learning => "learning",
            Self::Difficult => "difficult",
        }
    }
}

/// Study modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
    Learn,
    Quiz,
    Review,
}

impl Default for StudyMode {
    fn default() -> Self {
        Self::Learn
    }
}

impl StudyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learn => "learn",
            Self::Quiz => "quiz",
            Self::Review => "review",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "learn" => Some(Self::Learn),
            "quiz" => Some(Self::Quiz),
            "review" => Some(Self::Review),
            _ => None,
        }
    }

    pub fn answer_mode(&self) -> AnswerMode {
        match self {
            Self::Learn => AnswerMode::Flip,
            Self::Quiz | Self::Review => AnswerMode::Typed,
        }
    }
}

/// How a card is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerMode {
    /// Reveal the translation and self-grade.
    Flip,
    /// Type the translation and have it checked.
    Typed,
}

/// Matching mode for typed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    CaseInsensitive,
    Fuzzy,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::CaseInsensitive
    }
}

impl MatchingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case_insensitive",
            Self::Fuzzy => "fuzzy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "exact" => Some(Self::Exact),
            "case_insensitive" => Some(Self::CaseInsensitive),
            "fuzzy" => Some(Self::Fuzzy),
            _ => None,
        }
    }
}

/// Persisted performance history.
///
/// Older records also carried tier counts; those are derived and ignored here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    #[serde(default)]
    pub recent_performance: Vec<f64>,
}

/// Aggregate progress over the whole vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total_words: usize,
    pub mastered_words: usize,
    pub learning_words: usize,
    pub difficult_words: usize,
    pub recent_performance: Vec<f64>,
}

impl AggregateStats {
    /// Compute tier counts from entries and attach the stored history.
    pub fn compute(words: &[WordEntry], recent_performance: &[f64]) -> Self {
        let mut stats = Self {
            total_words: words.len(),
            recent_performance: recent_performance.to_vec(),
            ..Default::default()
        };

        for word in words {
            match word.tier() {
                MasteryTier::Mastered => stats.mastered_words += 1,
                MasteryTier::Learning => stats.learning_words += 1,
                MasteryTier::Difficult => stats.difficult_words += 1,
            }
        }

        stats
    }

    /// Overall progress 0-100, counting learning words at half weight.
    pub fn learning_progress(&self) -> u32 {
        if self.total_words == 0 {
            return 0;
        }

        let score = self.mastered_words as f64 + self.learning_words as f64 * 0.5;
        let percent = (score / self.total_words as f64 * 100.0).round();
        percent.min(100.0) as u32
    }
}

/// Result of a finished study pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub correct: usize,
    pub total: usize,
}

impl SessionSummary {
    /// Accuracy as a percentage, or None for an empty session.
    pub fn accuracy(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.correct as f64 / self.total as f64 * 100.0)
    }
}
