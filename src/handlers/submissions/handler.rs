//! Submission handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::OptionalAuth,
    services::SubmissionService,
    state::AppState,
    visibility::TokenIssuer,
};

use super::{
    request::{DisplayConfigQuery, ListSubmissionsQuery},
    response::{DisplayConfigResponse, SubmissionDetailResponse, SubmissionsListResponse},
};

/// List submissions
pub async fn list_submissions(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Query(query): Query<ListSubmissionsQuery>,
) -> AppResult<Json<SubmissionsListResponse>> {
    query.validate()?;

    let tokens = TokenIssuer::new(&state.config().session.secret);
    let response = SubmissionService::list(state.db(), viewer.as_ref(), query, &tokens).await?;

    Ok(Json(response))
}

/// Get a single submission, shaped for the viewer
pub async fn get_submission(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<i32>,
) -> AppResult<Json<SubmissionDetailResponse>> {
    let tokens = TokenIssuer::new(&state.config().session.secret);
    let response = SubmissionService::detail(state.db(), viewer.as_ref(), id, &tokens).await?;

    Ok(Json(response))
}

/// Display config for an optional contest context
pub async fn get_display_config(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Query(query): Query<DisplayConfigQuery>,
) -> AppResult<Json<DisplayConfigResponse>> {
    let response =
        SubmissionService::display_config(state.db(), viewer.as_ref(), query.contest_id).await?;

    Ok(Json(response))
}
