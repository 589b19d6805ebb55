//! Problem repository

use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{Problem, ProblemTag},
};

/// Filters for the problem list query
#[derive(Debug, Clone, Default)]
pub struct ProblemListFilter {
    /// Substring match against the title; a numeric keyword also matches
    /// the problem id exactly
    pub keyword: Option<String>,
    /// Conjunctive tag filter: a problem must carry every listed tag
    pub tag_ids: Vec<i32>,
    /// Viewer ID for the ownership scope below
    pub viewer_id: Option<i32>,
    /// When false, only public problems and the viewer's own are listed
    pub include_hidden: bool,
}

impl ProblemListFilter {
    fn keyword_id(&self) -> Option<i32> {
        self.keyword.as_deref().and_then(|k| k.parse().ok())
    }
}

/// Sortable columns for the problem list, whitelisted to keep the
/// ORDER BY out of user hands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemSort {
    Id,
    Title,
    AcNum,
    SubmitNum,
    AcRate,
    PublicizeTime,
}

impl ProblemSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "ac_num" => Some(Self::AcNum),
            "submit_num" => Some(Self::SubmitNum),
            "ac_rate" => Some(Self::AcRate),
            "publicize_time" => Some(Self::PublicizeTime),
            _ => None,
        }
    }

    fn order_expr(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::AcNum => "ac_num",
            Self::SubmitNum => "submit_num",
            Self::AcRate => "(CASE WHEN submit_num = 0 THEN 0 ELSE ac_num::float8 / submit_num END)",
            Self::PublicizeTime => "publicize_time",
        }
    }
}

const SCOPE_CONDITIONS: &str = r#"
    (($1::text IS NULL AND $2::int IS NULL)
        OR title ILIKE '%' || $1 || '%'
        OR id = $2)
    AND (is_public OR $3 OR ($4::int IS NOT NULL AND user_id = $4))
"#;

/// Repository for problem database operations
pub struct ProblemRepository;

impl ProblemRepository {
    /// Find problem by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(problem)
    }

    /// Find several problems at once, keyed by the caller
    pub async fn find_by_ids(pool: &PgPool, ids: &[i32]) -> AppResult<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE id = ANY($1)"#)
            .bind(ids)
            .fetch_all(pool)
            .await?;

        Ok(problems)
    }

    /// List problems with pagination, keyword and tag filters
    pub async fn list(
        pool: &PgPool,
        filter: &ProblemListFilter,
        sort: ProblemSort,
        descending: bool,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Problem>, i64)> {
        let direction = if descending { "DESC" } else { "ASC" };

        if filter.tag_ids.is_empty() {
            let list_sql = format!(
                "SELECT * FROM problems WHERE {SCOPE_CONDITIONS} \
                 ORDER BY {} {direction} NULLS LAST, id ASC OFFSET $5 LIMIT $6",
                sort.order_expr()
            );
            let problems = sqlx::query_as::<_, Problem>(&list_sql)
                .bind(filter.keyword.as_deref())
                .bind(filter.keyword_id())
                .bind(filter.include_hidden)
                .bind(filter.viewer_id)
                .bind(offset)
                .bind(limit)
                .fetch_all(pool)
                .await?;

            let count_sql = format!("SELECT COUNT(*) FROM problems WHERE {SCOPE_CONDITIONS}");
            let total: i64 = sqlx::query_scalar(&count_sql)
                .bind(filter.keyword.as_deref())
                .bind(filter.keyword_id())
                .bind(filter.include_hidden)
                .bind(filter.viewer_id)
                .fetch_one(pool)
                .await?;

            return Ok((problems, total));
        }

        // Conjunctive tag match: keep only problems whose tag rows
        // cover the whole requested set.
        let list_sql = format!(
            "SELECT * FROM problems WHERE {SCOPE_CONDITIONS} \
             AND id IN ( \
               SELECT problem_id FROM problem_tag_map WHERE tag_id = ANY($5) \
               GROUP BY problem_id HAVING COUNT(DISTINCT tag_id) = $6 \
             ) \
             ORDER BY {} {direction} NULLS LAST, id ASC OFFSET $7 LIMIT $8",
            sort.order_expr()
        );
        let problems = sqlx::query_as::<_, Problem>(&list_sql)
            .bind(filter.keyword.as_deref())
            .bind(filter.keyword_id())
            .bind(filter.include_hidden)
            .bind(filter.viewer_id)
            .bind(&filter.tag_ids)
            .bind(filter.tag_ids.len() as i64)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        let count_sql = format!(
            "SELECT COUNT(*) FROM problems WHERE {SCOPE_CONDITIONS} \
             AND id IN ( \
               SELECT problem_id FROM problem_tag_map WHERE tag_id = ANY($5) \
               GROUP BY problem_id HAVING COUNT(DISTINCT tag_id) = $6 \
             )"
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(filter.keyword.as_deref())
            .bind(filter.keyword_id())
            .bind(filter.include_hidden)
            .bind(filter.viewer_id)
            .bind(&filter.tag_ids)
            .bind(filter.tag_ids.len() as i64)
            .fetch_one(pool)
            .await?;

        Ok((problems, total))
    }

    /// All tags, alphabetical
    pub async fn all_tags(pool: &PgPool) -> AppResult<Vec<ProblemTag>> {
        let tags =
            sqlx::query_as::<_, ProblemTag>(r#"SELECT * FROM problem_tags ORDER BY name ASC"#)
                .fetch_all(pool)
                .await?;

        Ok(tags)
    }

    /// Tags attached to one problem
    pub async fn tags_for_problem(pool: &PgPool, problem_id: i32) -> AppResult<Vec<ProblemTag>> {
        let tags = sqlx::query_as::<_, ProblemTag>(
            r#"
            SELECT t.* FROM problem_tags t
            JOIN problem_tag_map m ON m.tag_id = t.id
            WHERE m.problem_id = $1
            ORDER BY t.name ASC
            "#,
        )
        .bind(problem_id)
        .fetch_all(pool)
        .await?;

        Ok(tags)
    }

    /// Tags for several problems at once, for list pages
    pub async fn tags_for_problems(
        pool: &PgPool,
        problem_ids: &[i32],
    ) -> AppResult<Vec<(i32, ProblemTag)>> {
        #[derive(sqlx::FromRow)]
        struct Row {
            problem_id: i32,
            id: i32,
            name: String,
            color: String,
        }

        let rows = sqlx::query_as::<_, Row>(
            r#"
            SELECT m.problem_id, t.id, t.name, t.color
            FROM problem_tags t
            JOIN problem_tag_map m ON m.tag_id = t.id
            WHERE m.problem_id = ANY($1)
            ORDER BY t.name ASC
            "#,
        )
        .bind(problem_ids)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                (
                    r.problem_id,
                    ProblemTag {
                        id: r.id,
                        name: r.name,
                        color: r.color,
                    },
                )
            })
            .collect())
    }

    /// Most recently publicized problems
    pub async fn recent_public(pool: &PgPool, limit: i64) -> AppResult<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(
            r#"
            SELECT * FROM problems
            WHERE is_public
            ORDER BY publicize_time DESC NULLS LAST, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(problems)
    }

    /// Count public problems
    pub async fn count_public(pool: &PgPool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM problems WHERE is_public"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_whitelist() {
        assert_eq!(ProblemSort::parse("ac_rate"), Some(ProblemSort::AcRate));
        assert_eq!(ProblemSort::parse("id"), Some(ProblemSort::Id));
        assert_eq!(ProblemSort::parse("drop table"), None);
    }

    #[test]
    fn test_numeric_keyword_also_matches_id() {
        let filter = ProblemListFilter {
            keyword: Some("1001".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.keyword_id(), Some(1001));

        let text = ProblemListFilter {
            keyword: Some("graph".to_string()),
            ..Default::default()
        };
        assert_eq!(text.keyword_id(), None);
    }
}
