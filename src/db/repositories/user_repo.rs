//! User repository

use sqlx::PgPool;

use crate::{error::AppResult, models::User};

/// Sortable columns for the ranklist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RanklistSort {
    Rating,
    AcNum,
    Id,
    Username,
}

impl RanklistSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rating" => Some(Self::Rating),
            "ac_num" => Some(Self::AcNum),
            "id" => Some(Self::Id),
            "username" => Some(Self::Username),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::AcNum => "ac_num",
            Self::Id => "id",
            Self::Username => "username",
        }
    }
}

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(pool: &PgPool, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE username = $1"#)
            .bind(username)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Find several users at once, keyed by the caller
    pub async fn find_by_ids(pool: &PgPool, ids: &[i32]) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = ANY($1)"#)
            .bind(ids)
            .fetch_all(pool)
            .await?;

        Ok(users)
    }

    /// Paginated ranklist over listed users. Ties break toward the
    /// older account.
    pub async fn ranklist(
        pool: &PgPool,
        sort: RanklistSort,
        descending: bool,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<User>, i64)> {
        let direction = if descending { "DESC" } else { "ASC" };
        let sql = format!(
            "SELECT * FROM users WHERE is_show \
             ORDER BY {} {direction}, id ASC OFFSET $1 LIMIT $2",
            sort.column()
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM users WHERE is_show"#)
            .fetch_one(pool)
            .await?;

        Ok((users, total))
    }

    /// Top rated listed users
    pub async fn top_rated(pool: &PgPool, limit: i64) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE is_show
            ORDER BY rating DESC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Count all users
    pub async fn count(pool: &PgPool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM users"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
