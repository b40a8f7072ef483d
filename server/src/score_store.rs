use std::time::Instant;

use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions};

use common::api::ScoreRecord;
use common::log;

use crate::server_config::MAX_DB_CONNECTIONS;

/// Persistence seam for score records. The store is append-only: there is
/// no update or delete path.
pub trait ScoreStore {
    fn top_scores(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<ScoreRecord>, String>> + Send;

    fn insert_score(
        &self,
        player_name: &str,
        score: i64,
    ) -> impl Future<Output = Result<i64, String>> + Send;
}

#[derive(Clone)]
pub struct PgScoreStore {
    pool: PgPool,
}

impl PgScoreStore {
    pub async fn connect(database_url: &str) -> Result<Self, String> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_DB_CONNECTIONS)
            .connect(database_url)
            .await
            .map_err(|e| format!("Failed to connect to database: {}", e))?;
        log!("Database connection pool created");
        Ok(Self { pool })
    }

    pub async fn ensure_schema(&self) -> Result<(), String> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS snake_scores (
                id BIGSERIAL PRIMARY KEY,
                player_name VARCHAR(50) NOT NULL,
                score BIGINT NOT NULL CHECK (score >= 0)
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to ensure snake_scores table: {}", e))?;
        Ok(())
    }
}

impl ScoreStore for PgScoreStore {
    async fn top_scores(&self, limit: i64) -> Result<Vec<ScoreRecord>, String> {
        let started = Instant::now();
        let rows = sqlx::query(
            "SELECT player_name, score FROM snake_scores ORDER BY score DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to fetch top scores: {}", e))?;

        let records = rows
            .into_iter()
            .map(|row| {
                Ok(ScoreRecord {
                    player_name: row
                        .try_get("player_name")
                        .map_err(|e| format!("Malformed score row: {}", e))?,
                    score: row
                        .try_get("score")
                        .map_err(|e| format!("Malformed score row: {}", e))?,
                })
            })
            .collect::<Result<Vec<ScoreRecord>, String>>()?;

        log!(
            "Fetched {} scores in {}ms",
            records.len(),
            started.elapsed().as_millis()
        );
        Ok(records)
    }

    async fn insert_score(&self, player_name: &str, score: i64) -> Result<i64, String> {
        let started = Instant::now();
        let row = sqlx::query(
            "INSERT INTO snake_scores (player_name, score) VALUES ($1, $2) RETURNING id",
        )
        .bind(player_name)
        .bind(score)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| format!("Failed to insert score: {}", e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| format!("Malformed insert result: {}", e))?;
        log!(
            "Inserted score {} for '{}' as id {} in {}ms",
            score,
            player_name,
            id,
            started.elapsed().as_millis()
        );
        Ok(id)
    }
}
