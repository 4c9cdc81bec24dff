//! Repository Pattern Abstractions
//!
//! Defines the persistence trait for prediction history, keeping the
//! pipeline independent of the storage backend.
//!
//! The store is an append-only log keyed by username: records are never
//! mutated or deleted, and the bounded "recent history" view is enforced
//! at read time, not by physical pruning.

use crate::domain::errors::PredictionError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One past prediction event for one user. Created exactly once per
/// successful prediction, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub username: String,
    pub symbol: String,
    pub predicted_price: f64,
    pub timestamp: DateTime<Utc>,
}

/// Repository for the per-user prediction history log
#[async_trait]
pub trait PredictionHistoryRepository: Send + Sync {
    /// Append a record with a server-assigned timestamp.
    async fn record(
        &self,
        username: &str,
        symbol: &str,
        predicted_price: f64,
    ) -> Result<(), PredictionError>;

    /// The `limit` most recently recorded entries for `username`,
    /// most-recent first, ordered by insertion (row id), never by
    /// timestamp equality. No deduplication by symbol.
    async fn recent_for(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<PredictionRecord>, PredictionError>;
}
