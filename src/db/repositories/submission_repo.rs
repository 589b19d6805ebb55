//! Submission repository

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::{
    error::AppResult,
    models::{Submission, SubmissionKind},
};

/// Filters accepted by the submission list query
#[derive(Debug, Clone, Default)]
pub struct SubmissionListFilter {
    pub user_id: Option<i32>,
    pub problem_id: Option<i32>,
    pub kind: Option<SubmissionKind>,
    pub contest_id: Option<i32>,
    pub min_score: Option<i32>,
    pub max_score: Option<i32>,
    /// Exact language match
    pub language: Option<String>,
    /// Only answer-file submissions (language empty or null)
    pub answer_only: bool,
    /// Only compiled/interpreted submissions
    pub code_only: bool,
    pub status: Option<String>,
    /// Restrict to publicly visible rows
    pub public_only: bool,
}

/// Ordering for the per-problem statistics endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticsOrder {
    Fastest,
    Shortest,
    Earliest,
}

impl StatisticsOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fastest" => Some(Self::Fastest),
            "shortest" => Some(Self::Shortest),
            "earliest" => Some(Self::Earliest),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fastest => "fastest",
            Self::Shortest => "shortest",
            Self::Earliest => "earliest",
        }
    }

    fn order_clause(&self) -> &'static str {
        match self {
            Self::Fastest => "total_time ASC",
            Self::Shortest => "code_length ASC",
            Self::Earliest => "submit_time ASC",
        }
    }
}

/// A user's standing on one problem: their accepted submission if any,
/// otherwise the latest attempt
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JudgeStateSummary {
    pub submission_id: i32,
    pub status: String,
    pub score: Option<i32>,
}

const LIST_CONDITIONS: &str = r#"
    ($1::int IS NULL OR user_id = $1)
    AND ($2::int IS NULL OR problem_id = $2)
    AND ($3::smallint IS NULL OR kind = $3)
    AND ($4::int IS NULL OR contest_id = $4)
    AND ($5::int IS NULL OR score >= $5)
    AND ($6::int IS NULL OR score <= $6)
    AND ($7::text IS NULL OR language = $7)
    AND (NOT $8 OR language IS NULL OR language = '')
    AND (NOT $9 OR (language IS NOT NULL AND language <> ''))
    AND ($10::text IS NULL OR status = $10)
    AND (NOT $11 OR is_public)
"#;

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Find submission by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> AppResult<Option<Submission>> {
        let submission =
            sqlx::query_as::<_, Submission>(r#"SELECT * FROM submissions WHERE id = $1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(submission)
    }

    /// List submissions with pagination and filters, newest first
    pub async fn list(
        pool: &PgPool,
        filter: &SubmissionListFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let list_sql = format!(
            "SELECT * FROM submissions WHERE {LIST_CONDITIONS} ORDER BY id DESC OFFSET $12 LIMIT $13"
        );
        let submissions = sqlx::query_as::<_, Submission>(&list_sql)
            .bind(filter.user_id)
            .bind(filter.problem_id)
            .bind(filter.kind.map(|k| k as i16))
            .bind(filter.contest_id)
            .bind(filter.min_score)
            .bind(filter.max_score)
            .bind(filter.language.as_deref())
            .bind(filter.answer_only)
            .bind(filter.code_only)
            .bind(filter.status.as_deref())
            .bind(filter.public_only)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM submissions WHERE {LIST_CONDITIONS}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(filter.user_id)
            .bind(filter.problem_id)
            .bind(filter.kind.map(|k| k as i16))
            .bind(filter.contest_id)
            .bind(filter.min_score)
            .bind(filter.max_score)
            .bind(filter.language.as_deref())
            .bind(filter.answer_only)
            .bind(filter.code_only)
            .bind(filter.status.as_deref())
            .bind(filter.public_only)
            .fetch_one(pool)
            .await?;

        Ok((submissions, total))
    }

    /// Top accepted standalone submissions for a problem
    pub async fn statistics(
        pool: &PgPool,
        problem_id: i32,
        order: StatisticsOrder,
        limit: i64,
    ) -> AppResult<Vec<Submission>> {
        let sql = format!(
            "SELECT * FROM submissions \
             WHERE problem_id = $1 AND kind = 0 AND status = 'Accepted' \
             ORDER BY {} LIMIT $2",
            order.order_clause()
        );

        let submissions = sqlx::query_as::<_, Submission>(&sql)
            .bind(problem_id)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        Ok(submissions)
    }

    /// Count all submissions
    pub async fn count(pool: &PgPool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM submissions"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Per-status submission counts for one user
    pub async fn status_counts_for_user(
        pool: &PgPool,
        user_id: i32,
    ) -> AppResult<Vec<(String, i64)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT status, COUNT(*) FROM submissions
            WHERE user_id = $1
            GROUP BY status
            ORDER BY status
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Distinct problems a user has solved
    pub async fn ac_problem_ids(pool: &PgPool, user_id: i32) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT problem_id FROM submissions
            WHERE user_id = $1 AND status = 'Accepted'
            ORDER BY problem_id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(ids)
    }

    /// Submit and AC counts per problem inside a contest
    pub async fn contest_problem_stats(
        pool: &PgPool,
        contest_id: i32,
    ) -> AppResult<Vec<(i32, i64, i64)>> {
        let rows: Vec<(i32, i64, i64)> = sqlx::query_as(
            r#"
            SELECT
                problem_id,
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'Accepted')
            FROM submissions
            WHERE kind = 1 AND contest_id = $1
            GROUP BY problem_id
            "#,
        )
        .bind(contest_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// The viewer's standing on each of several problems, for list pages
    pub async fn judge_states_for(
        pool: &PgPool,
        user_id: i32,
        problem_ids: &[i32],
    ) -> AppResult<Vec<(i32, JudgeStateSummary)>> {
        #[derive(FromRow)]
        struct Row {
            problem_id: i32,
            submission_id: i32,
            status: String,
            score: Option<i32>,
        }

        let rows = sqlx::query_as::<_, Row>(
            r#"
            SELECT DISTINCT ON (problem_id)
                problem_id, id AS submission_id, status, score
            FROM submissions
            WHERE user_id = $1 AND problem_id = ANY($2) AND kind = 0
            ORDER BY problem_id, (status = 'Accepted') DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(problem_ids)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                (
                    r.problem_id,
                    JudgeStateSummary {
                        submission_id: r.submission_id,
                        status: r.status,
                        score: r.score,
                    },
                )
            })
            .collect())
    }

    /// The viewer's standing on one problem: prefers an accepted
    /// submission, falls back to the most recent attempt
    pub async fn judge_state_for(
        pool: &PgPool,
        user_id: i32,
        problem_id: i32,
        in_contest: bool,
    ) -> AppResult<Option<JudgeStateSummary>> {
        let summary = sqlx::query_as::<_, JudgeStateSummary>(
            r#"
            SELECT id AS submission_id, status, score FROM submissions
            WHERE user_id = $1 AND problem_id = $2 AND kind = $3
            ORDER BY (status = 'Accepted') DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .bind(if in_contest { 1i16 } else { 0i16 })
        .fetch_optional(pool)
        .await?;

        Ok(summary)
    }
}
