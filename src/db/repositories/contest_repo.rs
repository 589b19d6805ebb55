//! Contest repository

use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{Contest, ContestPlayer},
};

/// Repository for contest database operations
pub struct ContestRepository;

impl ContestRepository {
    /// Find contest by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> AppResult<Option<Contest>> {
        let contest = sqlx::query_as::<_, Contest>(r#"SELECT * FROM contests WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(contest)
    }

    /// Find several contests at once, keyed by the caller
    pub async fn find_by_ids(pool: &PgPool, ids: &[i32]) -> AppResult<Vec<Contest>> {
        let contests = sqlx::query_as::<_, Contest>(r#"SELECT * FROM contests WHERE id = ANY($1)"#)
            .bind(ids)
            .fetch_all(pool)
            .await?;

        Ok(contests)
    }

    /// List contests with pagination, latest start first. Non-public
    /// contests are included only when `include_hidden` is set.
    pub async fn list(
        pool: &PgPool,
        include_hidden: bool,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Contest>, i64)> {
        let contests = sqlx::query_as::<_, Contest>(
            r#"
            SELECT * FROM contests
            WHERE is_public OR $1
            ORDER BY start_time DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(include_hidden)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM contests WHERE is_public OR $1"#)
            .bind(include_hidden)
            .fetch_one(pool)
            .await?;

        Ok((contests, total))
    }

    /// Most recent public contests by start time
    pub async fn recent_public(pool: &PgPool, limit: i64) -> AppResult<Vec<Contest>> {
        let contests = sqlx::query_as::<_, Contest>(
            r#"
            SELECT * FROM contests
            WHERE is_public
            ORDER BY start_time DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(contests)
    }

    /// Ranklist rows for a contest, best score first
    pub async fn players(pool: &PgPool, contest_id: i32) -> AppResult<Vec<ContestPlayer>> {
        let players = sqlx::query_as::<_, ContestPlayer>(
            r#"
            SELECT * FROM contest_players
            WHERE contest_id = $1
            ORDER BY score DESC, id ASC
            "#,
        )
        .bind(contest_id)
        .fetch_all(pool)
        .await?;

        Ok(players)
    }

    /// One user's ranklist row in a contest
    pub async fn player(
        pool: &PgPool,
        contest_id: i32,
        user_id: i32,
    ) -> AppResult<Option<ContestPlayer>> {
        let player = sqlx::query_as::<_, ContestPlayer>(
            r#"SELECT * FROM contest_players WHERE contest_id = $1 AND user_id = $2"#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(player)
    }

    /// Number of registered players in a contest
    pub async fn participant_count(pool: &PgPool, contest_id: i32) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM contest_players WHERE contest_id = $1"#)
                .bind(contest_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}
