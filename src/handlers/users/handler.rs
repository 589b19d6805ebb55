//! User handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    error::{AppError, AppResult},
    middleware::auth::OptionalAuth,
    services::UserService,
    state::AppState,
};

use super::{
    request::{RanklistQuery, UserArticlesQuery},
    response::{
        AcProblemsResponse, RanklistResponse, RatingHistoryResponse, UserArticlesResponse,
        UserProfileResponse, UserStatisticsResponse,
    },
};

/// Get a user's profile
pub async fn get_user(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<i32>,
) -> AppResult<Json<UserProfileResponse>> {
    let profile = UserService::profile(
        state.db(),
        viewer.as_ref(),
        id,
        state.config().site.default_rating,
    )
    .await?;

    Ok(Json(profile))
}

/// Per-status submission counts for a user
pub async fn get_statistics(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserStatisticsResponse>> {
    let statistics = UserService::statistics(state.db(), id).await?;

    Ok(Json(statistics))
}

/// A user's reconstructed rating history
pub async fn get_rating_history(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RatingHistoryResponse>> {
    let history =
        UserService::rating_history(state.db(), id, state.config().site.default_rating).await?;

    Ok(Json(RatingHistoryResponse {
        user_id: id,
        history,
    }))
}

/// Problems a user has solved
pub async fn get_ac_problems(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AcProblemsResponse>> {
    let response = UserService::ac_problems(state.db(), id).await?;

    Ok(Json(response))
}

/// A user's articles, newest first
pub async fn get_articles(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<UserArticlesQuery>,
) -> AppResult<Json<UserArticlesResponse>> {
    let response = UserService::articles(state.db(), id, query.page, query.per_page).await?;

    Ok(Json(response))
}

/// Site-wide ranklist
pub async fn ranklist(
    State(state): State<AppState>,
    Query(query): Query<RanklistQuery>,
) -> AppResult<Json<RanklistResponse>> {
    let descending = match query.order.as_deref() {
        None | Some("desc") => true,
        Some("asc") => false,
        Some(other) => {
            return Err(AppError::Validation(format!("Unknown order: {other}")));
        }
    };

    let response = UserService::ranklist(
        state.db(),
        query.sort.as_deref(),
        descending,
        query.page,
        query.per_page,
    )
    .await?;

    Ok(Json(response))
}
