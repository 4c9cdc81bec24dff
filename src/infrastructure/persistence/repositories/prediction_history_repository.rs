use crate::domain::errors::PredictionError;
use crate::domain::repositories::{PredictionHistoryRepository, PredictionRecord};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sqlx::{Row, SqlitePool};

/// Append-only SQLite log of prediction events, one row per successful
/// prediction. Concurrent writers for different users never touch the
/// same rows; per-user write/read ordering is serialized by SQLite's
/// single-writer transaction model, so a read never sees a partial row.
pub struct SqlitePredictionHistoryRepository {
    pool: SqlitePool,
}

impl SqlitePredictionHistoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn persistence(e: impl std::fmt::Display) -> PredictionError {
        PredictionError::Persistence {
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl PredictionHistoryRepository for SqlitePredictionHistoryRepository {
    async fn record(
        &self,
        username: &str,
        symbol: &str,
        predicted_price: f64,
    ) -> Result<(), PredictionError> {
        sqlx::query(
            r#"
            INSERT INTO predictions (username, symbol, predicted_price, timestamp)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(symbol)
        .bind(predicted_price)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(Self::persistence)?;

        Ok(())
    }

    async fn recent_for(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<PredictionRecord>, PredictionError> {
        // Ordered by row id, not timestamp: insertion order is the
        // contract, and same-second inserts must not reorder.
        let rows = sqlx::query(
            r#"
            SELECT username, symbol, predicted_price, timestamp
            FROM predictions
            WHERE username = ?
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(username)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::persistence)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let ts: i64 = row.try_get("timestamp").map_err(Self::persistence)?;
            records.push(PredictionRecord {
                username: row.try_get("username").map_err(Self::persistence)?,
                symbol: row.try_get("symbol").map_err(Self::persistence)?,
                predicted_price: row.try_get("predicted_price").map_err(Self::persistence)?,
                timestamp: Utc
                    .timestamp_opt(ts, 0)
                    .single()
                    .ok_or_else(|| Self::persistence(format!("invalid stored timestamp {ts}")))?,
            });
        }
        Ok(records)
    }
}
