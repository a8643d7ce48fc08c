//! Grade report envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Claim, ScoreResult};

/// The outcome of grading one claim against one catalog snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Name of the catalog source that was queried.
    pub source: String,
    /// The parsed claim.
    pub claim: Claim,
    /// Records in the full catalog snapshot.
    pub catalog_size: usize,
    /// Records left after the cutoff filter.
    pub ranked_size: usize,
    /// Score and per-rule trace.
    pub score: ScoreResult,
}

impl GradeReport {
    pub fn new(
        source: impl Into<String>,
        claim: Claim,
        catalog_size: usize,
        ranked_size: usize,
        score: ScoreResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source: source.into(),
            claim,
            catalog_size,
            ranked_size,
            score,
        }
    }

    /// One-line summary of the total.
    pub fn summary(&self) -> String {
        format!("The correct total of points is: {}", self.score.total)
    }
}
