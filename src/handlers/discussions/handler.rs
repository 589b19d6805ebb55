//! Discussion handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    db::repositories::{ArticleScope, NoticeFilter},
    error::{AppError, AppResult},
    middleware::auth::OptionalAuth,
    services::DiscussionService,
    state::AppState,
};

use super::{
    request::{CommentsQuery, ListDiscussionsQuery, RecentArticlesQuery},
    response::{ArticleResponse, CommentsResponse, DiscussionsListResponse, RecentArticlesResponse},
};

/// List discussions across boards
pub async fn list_discussions(
    State(state): State<AppState>,
    Query(query): Query<ListDiscussionsQuery>,
) -> AppResult<Json<DiscussionsListResponse>> {
    let scope = query.scope.as_deref().unwrap_or("all");
    let scope = ArticleScope::parse(scope)
        .ok_or_else(|| AppError::Validation(format!("Unknown discussion scope: {scope}")))?;

    let response = DiscussionService::list(state.db(), scope, query.page, query.per_page).await?;

    Ok(Json(response))
}

/// List one problem's discussion board
pub async fn list_problem_discussions(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<i32>,
    Query(query): Query<ListDiscussionsQuery>,
) -> AppResult<Json<DiscussionsListResponse>> {
    let response = DiscussionService::list_for_problem(
        state.db(),
        viewer.as_ref(),
        id,
        query.page,
        query.per_page,
    )
    .await?;

    Ok(Json(response))
}

/// Article detail with its first page of comments
pub async fn get_article(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<i32>,
) -> AppResult<Json<ArticleResponse>> {
    let response = DiscussionService::article(state.db(), viewer.as_ref(), id).await?;

    Ok(Json(response))
}

/// Paginated comments under an article
pub async fn get_comments(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<i32>,
    Query(query): Query<CommentsQuery>,
) -> AppResult<Json<CommentsResponse>> {
    let response =
        DiscussionService::comments(state.db(), viewer.as_ref(), id, query.page, query.per_page)
            .await?;

    Ok(Json(response))
}

/// Recent global articles
pub async fn recent_articles(
    State(state): State<AppState>,
    Query(query): Query<RecentArticlesQuery>,
) -> AppResult<Json<RecentArticlesResponse>> {
    let filter = query.filter.as_deref().unwrap_or("all");
    let filter = NoticeFilter::parse(filter)
        .ok_or_else(|| AppError::Validation(format!("Unknown article filter: {filter}")))?;

    let response = DiscussionService::recent(state.db(), filter, query.count).await?;

    Ok(Json(response))
}
