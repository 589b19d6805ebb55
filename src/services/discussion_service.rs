//! Discussion service

use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    constants::{HOME_RECENT_SIZE, MAX_PAGE_SIZE},
    db::repositories::{
        ArticleRepository, ArticleScope, NoticeFilter, ProblemRepository, UserRepository,
    },
    error::{AppError, AppResult},
    handlers::{
        discussions::response::{
            ArticleResponse, ArticleRow, CommentRow, CommentsResponse, DiscussionsListResponse,
            ProblemRef, RecentArticlesResponse,
        },
        users::response::UserSummary,
    },
    middleware::auth::AuthenticatedUser,
    models::{Article, ArticleComment},
    utils::{Pagination, url},
};

/// Discussion service for business logic
pub struct DiscussionService;

impl DiscussionService {
    /// List a discussion board, pinned notices first
    pub async fn list(
        pool: &PgPool,
        scope: ArticleScope,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> AppResult<DiscussionsListResponse> {
        let (offset, limit) = Pagination::window(page, per_page);
        let (articles, total) = ArticleRepository::list(pool, scope, offset, limit).await?;

        Ok(DiscussionsListResponse {
            articles: Self::shape_rows(pool, articles).await?,
            pagination: Pagination::new(page, per_page, total),
        })
    }

    /// One problem's board; the problem itself must be usable by the
    /// viewer
    pub async fn list_for_problem(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        problem_id: i32,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> AppResult<DiscussionsListResponse> {
        let problem = ProblemRepository::find_by_id(pool, problem_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        if !problem.is_allowed_use_by(viewer) {
            return Err(AppError::Forbidden(
                "You are not allowed to view this problem".to_string(),
            ));
        }

        Self::list(pool, ArticleScope::Problem(problem.id), page, per_page).await
    }

    /// Article detail with its first page of comments
    pub async fn article(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        id: i32,
    ) -> AppResult<ArticleResponse> {
        let article = Self::load(pool, id).await?;

        let (first_page, author, problem) = tokio::try_join!(
            Self::comments(pool, viewer, article.id, None, None),
            async {
                UserRepository::find_by_id(pool, article.user_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("User not found".to_string()))
            },
            async {
                match article.problem_id {
                    Some(problem_id) => {
                        Ok(ProblemRepository::find_by_id(pool, problem_id).await?)
                    }
                    None => Ok(None),
                }
            },
        )?;

        Ok(ArticleResponse {
            id: article.id,
            url: url::article_url(article.id),
            title: article.title.clone(),
            content: article.content.clone(),
            user: UserSummary::from(&author),
            problem: problem.as_ref().map(|p| ProblemRef {
                id: p.id,
                url: url::problem_url(p.id),
                title: p.title.clone(),
            }),
            public_time: article.public_time,
            sort_time: article.sort_time,
            is_notice: article.is_notice,
            allow_comment: article.allow_comment,
            allowed_edit: article.is_allowed_edit_by(viewer),
            allowed_comment: article.is_allowed_comment_by(viewer),
            comments: first_page.comments,
            comments_pagination: first_page.pagination,
        })
    }

    /// Paginated comments under an article, oldest first
    pub async fn comments(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        article_id: i32,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> AppResult<CommentsResponse> {
        let article = Self::load(pool, article_id).await?;

        let (offset, limit) = Pagination::window(page, per_page);
        let (comments, total) = ArticleRepository::comments(pool, article.id, offset, limit).await?;

        let user_ids: Vec<i32> = comments.iter().map(|c| c.user_id).collect();
        let users = UserRepository::find_by_ids(pool, &user_ids).await?;
        let summaries: HashMap<i32, UserSummary> =
            users.iter().map(|u| (u.id, UserSummary::from(u))).collect();

        let rows = comments
            .iter()
            .filter_map(|comment| {
                let user = summaries.get(&comment.user_id)?.clone();
                Some(comment_row(comment, user, viewer))
            })
            .collect();

        Ok(CommentsResponse {
            article_id: article.id,
            comments: rows,
            pagination: Pagination::new(page, per_page, total),
        })
    }

    /// Recent global articles for feeds
    pub async fn recent(
        pool: &PgPool,
        filter: NoticeFilter,
        count: Option<u32>,
    ) -> AppResult<RecentArticlesResponse> {
        let count = count.unwrap_or(HOME_RECENT_SIZE).min(MAX_PAGE_SIZE);
        let articles = ArticleRepository::recent_global(pool, filter, count as i64).await?;

        Ok(RecentArticlesResponse {
            articles: Self::shape_rows(pool, articles).await?,
        })
    }

    async fn load(pool: &PgPool, id: i32) -> AppResult<Article> {
        ArticleRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Article not found".to_string()))
    }

    async fn shape_rows(pool: &PgPool, articles: Vec<Article>) -> AppResult<Vec<ArticleRow>> {
        let article_ids: Vec<i32> = articles.iter().map(|a| a.id).collect();
        let user_ids: Vec<i32> = articles.iter().map(|a| a.user_id).collect();
        let problem_ids: Vec<i32> = articles.iter().filter_map(|a| a.problem_id).collect();

        let (users, problems, counts) = tokio::try_join!(
            UserRepository::find_by_ids(pool, &user_ids),
            ProblemRepository::find_by_ids(pool, &problem_ids),
            ArticleRepository::comment_counts(pool, &article_ids),
        )?;

        let summaries: HashMap<i32, UserSummary> =
            users.iter().map(|u| (u.id, UserSummary::from(u))).collect();
        let refs: HashMap<i32, ProblemRef> = problems
            .iter()
            .map(|p| {
                (
                    p.id,
                    ProblemRef {
                        id: p.id,
                        url: url::problem_url(p.id),
                        title: p.title.clone(),
                    },
                )
            })
            .collect();
        let counts: HashMap<i32, i64> = counts.into_iter().collect();

        Ok(articles
            .iter()
            .filter_map(|article| {
                let user = summaries.get(&article.user_id)?.clone();
                Some(ArticleRow {
                    id: article.id,
                    url: url::article_url(article.id),
                    title: article.title.clone(),
                    user,
                    problem: article
                        .problem_id
                        .and_then(|problem_id| refs.get(&problem_id).cloned()),
                    public_time: article.public_time,
                    sort_time: article.sort_time,
                    is_notice: article.is_notice,
                    comment_count: counts.get(&article.id).copied().unwrap_or(0),
                })
            })
            .collect())
    }
}

fn comment_row(
    comment: &ArticleComment,
    user: UserSummary,
    viewer: Option<&AuthenticatedUser>,
) -> CommentRow {
    CommentRow {
        id: comment.id,
        content: comment.content.clone(),
        user,
        public_time: comment.public_time,
        allowed_edit: comment.is_allowed_edit_by(viewer),
    }
}
