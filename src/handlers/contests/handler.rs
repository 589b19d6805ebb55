//! Contest handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::submissions::{request::ListSubmissionsQuery, response::SubmissionsListResponse},
    middleware::auth::OptionalAuth,
    services::{ContestService, SubmissionService},
    state::AppState,
    visibility::TokenIssuer,
};

use super::{
    request::ListContestsQuery,
    response::{
        ContestDetailResponse, ContestProblemsResponse, ContestRanklistResponse,
        ContestsListResponse,
    },
};

/// List contests
pub async fn list_contests(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Query(query): Query<ListContestsQuery>,
) -> AppResult<Json<ContestsListResponse>> {
    let response =
        ContestService::list(state.db(), viewer.as_ref(), query.page, query.per_page).await?;

    Ok(Json(response))
}

/// Contest detail
pub async fn get_contest(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<i32>,
) -> AppResult<Json<ContestDetailResponse>> {
    let response = ContestService::detail(state.db(), viewer.as_ref(), id).await?;

    Ok(Json(response))
}

/// Letter-indexed contest problem list
pub async fn get_problems(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<i32>,
) -> AppResult<Json<ContestProblemsResponse>> {
    let response = ContestService::problems(state.db(), viewer.as_ref(), id).await?;

    Ok(Json(response))
}

/// Contest ranklist
pub async fn get_ranklist(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<i32>,
) -> AppResult<Json<ContestRanklistResponse>> {
    let response = ContestService::ranklist(state.db(), viewer.as_ref(), id).await?;

    Ok(Json(response))
}

/// Submissions inside a contest; the list service enforces the
/// ended-or-supervisor gate
pub async fn get_submissions(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<i32>,
    Query(query): Query<ListSubmissionsQuery>,
) -> AppResult<Json<SubmissionsListResponse>> {
    query.validate()?;

    let scoped = ListSubmissionsQuery {
        contest_id: Some(id),
        ..query
    };

    let tokens = TokenIssuer::new(&state.config().session.secret);
    let response = SubmissionService::list(state.db(), viewer.as_ref(), scoped, &tokens).await?;

    Ok(Json(response))
}
