//! Article repository

use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{Article, ArticleComment},
};

/// Which discussion board a listing covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleScope {
    /// Every board merged
    All,
    /// Site-wide board only (articles with no problem)
    Global,
    /// Articles attached to any problem
    Problems,
    /// One problem's board
    Problem(i32),
}

impl ArticleScope {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "global" => Some(Self::Global),
            "problems" => Some(Self::Problems),
            _ => None,
        }
    }

    fn binds(&self) -> (Option<i32>, bool, bool) {
        match self {
            Self::All => (None, false, false),
            Self::Global => (None, true, false),
            Self::Problems => (None, false, true),
            Self::Problem(id) => (Some(*id), false, false),
        }
    }
}

/// Optional notice filter for recent-article listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeFilter {
    All,
    NoticeOnly,
    NormalOnly,
}

impl NoticeFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "notice" => Some(Self::NoticeOnly),
            "normal" => Some(Self::NormalOnly),
            _ => None,
        }
    }

    fn bind(&self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::NoticeOnly => Some(true),
            Self::NormalOnly => Some(false),
        }
    }
}

/// Repository for discussion articles and comments
pub struct ArticleRepository;

impl ArticleRepository {
    /// Find article by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> AppResult<Option<Article>> {
        let article = sqlx::query_as::<_, Article>(r#"SELECT * FROM articles WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(article)
    }

    /// List articles in a scope, pinned notices first, then by bump time
    pub async fn list(
        pool: &PgPool,
        scope: ArticleScope,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Article>, i64)> {
        let (problem_id, global_only, problems_only) = scope.binds();

        let articles = sqlx::query_as::<_, Article>(
            r#"
            SELECT * FROM articles
            WHERE ($1::int IS NULL OR problem_id = $1)
              AND (NOT $2 OR problem_id IS NULL)
              AND (NOT $3 OR problem_id IS NOT NULL)
            ORDER BY is_notice DESC, sort_time DESC
            OFFSET $4 LIMIT $5
            "#,
        )
        .bind(problem_id)
        .bind(global_only)
        .bind(problems_only)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM articles
            WHERE ($1::int IS NULL OR problem_id = $1)
              AND (NOT $2 OR problem_id IS NULL)
              AND (NOT $3 OR problem_id IS NOT NULL)
            "#,
        )
        .bind(problem_id)
        .bind(global_only)
        .bind(problems_only)
        .fetch_one(pool)
        .await?;

        Ok((articles, total))
    }

    /// One user's articles, newest first
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: i32,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Article>, i64)> {
        let articles = sqlx::query_as::<_, Article>(
            r#"
            SELECT * FROM articles
            WHERE user_id = $1
            ORDER BY public_time DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM articles WHERE user_id = $1"#)
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok((articles, total))
    }

    /// Latest global articles, optionally restricted to notices or
    /// normal posts
    pub async fn recent_global(
        pool: &PgPool,
        filter: NoticeFilter,
        limit: i64,
    ) -> AppResult<Vec<Article>> {
        let articles = sqlx::query_as::<_, Article>(
            r#"
            SELECT * FROM articles
            WHERE problem_id IS NULL
              AND ($1::bool IS NULL OR is_notice = $1)
            ORDER BY sort_time DESC
            LIMIT $2
            "#,
        )
        .bind(filter.bind())
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(articles)
    }

    /// Site notices, newest first
    pub async fn notices(pool: &PgPool) -> AppResult<Vec<Article>> {
        let articles = sqlx::query_as::<_, Article>(
            r#"
            SELECT * FROM articles
            WHERE is_notice
            ORDER BY public_time DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(articles)
    }

    /// Number of discussion articles under a problem
    pub async fn count_for_problem(pool: &PgPool, problem_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM articles WHERE problem_id = $1"#)
            .bind(problem_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Comment counts for several articles at once, for list pages
    pub async fn comment_counts(pool: &PgPool, article_ids: &[i32]) -> AppResult<Vec<(i32, i64)>> {
        let counts: Vec<(i32, i64)> = sqlx::query_as(
            r#"
            SELECT article_id, COUNT(*) FROM article_comments
            WHERE article_id = ANY($1)
            GROUP BY article_id
            "#,
        )
        .bind(article_ids)
        .fetch_all(pool)
        .await?;

        Ok(counts)
    }

    /// Comments under an article, oldest first
    pub async fn comments(
        pool: &PgPool,
        article_id: i32,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<ArticleComment>, i64)> {
        let comments = sqlx::query_as::<_, ArticleComment>(
            r#"
            SELECT * FROM article_comments
            WHERE article_id = $1
            ORDER BY public_time ASC, id ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(article_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM article_comments WHERE article_id = $1"#)
                .bind(article_id)
                .fetch_one(pool)
                .await?;

        Ok((comments, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parsing() {
        assert_eq!(ArticleScope::parse("global"), Some(ArticleScope::Global));
        assert_eq!(ArticleScope::parse("problems"), Some(ArticleScope::Problems));
        assert_eq!(ArticleScope::parse("everything"), None);
    }

    #[test]
    fn test_notice_filter_binds() {
        assert_eq!(NoticeFilter::All.bind(), None);
        assert_eq!(NoticeFilter::NoticeOnly.bind(), Some(true));
        assert_eq!(NoticeFilter::NormalOnly.bind(), Some(false));
    }
}
