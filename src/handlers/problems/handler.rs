//! Problem handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::OptionalAuth,
    services::ProblemService,
    state::AppState,
};

use super::{
    request::{ListProblemsQuery, StatisticsQuery},
    response::{
        ProblemDetailResponse, ProblemStatisticsResponse, ProblemsListResponse, TagsResponse,
    },
};

/// List problems
pub async fn list_problems(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Query(query): Query<ListProblemsQuery>,
) -> AppResult<Json<ProblemsListResponse>> {
    query.validate()?;

    let response = ProblemService::list(state.db(), viewer.as_ref(), query).await?;

    Ok(Json(response))
}

/// Problem detail
pub async fn get_problem(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<i32>,
) -> AppResult<Json<ProblemDetailResponse>> {
    let response = ProblemService::detail(state.db(), viewer.as_ref(), id).await?;

    Ok(Json(response))
}

/// Fastest/shortest/earliest accepted submissions for a problem
pub async fn get_statistics(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<i32>,
    Query(query): Query<StatisticsQuery>,
) -> AppResult<Json<ProblemStatisticsResponse>> {
    let order = query.order.as_deref().unwrap_or("fastest");
    let order = crate::db::repositories::StatisticsOrder::parse(order)
        .ok_or_else(|| AppError::Validation(format!("Unknown statistics order: {order}")))?;

    let response = ProblemService::statistics(state.db(), viewer.as_ref(), id, order).await?;

    Ok(Json(response))
}

/// All problem tags
pub async fn get_tags(State(state): State<AppState>) -> AppResult<Json<TagsResponse>> {
    let tags = ProblemService::tags(state.db()).await?;

    Ok(Json(TagsResponse { tags }))
}
