//! Rating repository

use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{RatingCalculation, RatingHistory},
};

/// Repository for rating calculations and per-user history
pub struct RatingRepository;

impl RatingRepository {
    /// A user's rating entries in calculation order, oldest first
    pub async fn history_for_user(pool: &PgPool, user_id: i32) -> AppResult<Vec<RatingHistory>> {
        let history = sqlx::query_as::<_, RatingHistory>(
            r#"
            SELECT * FROM rating_history
            WHERE user_id = $1
            ORDER BY rating_calculation_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(history)
    }

    /// Resolve calculations to their contests
    pub async fn calculations_by_ids(
        pool: &PgPool,
        ids: &[i32],
    ) -> AppResult<Vec<RatingCalculation>> {
        let calculations = sqlx::query_as::<_, RatingCalculation>(
            r#"SELECT * FROM rating_calculations WHERE id = ANY($1)"#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(calculations)
    }

    /// Number of rated participants per calculation
    pub async fn participant_counts(pool: &PgPool, ids: &[i32]) -> AppResult<Vec<(i32, i64)>> {
        let counts: Vec<(i32, i64)> = sqlx::query_as(
            r#"
            SELECT rating_calculation_id, COUNT(*) FROM rating_history
            WHERE rating_calculation_id = ANY($1)
            GROUP BY rating_calculation_id
            "#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(counts)
    }
}
