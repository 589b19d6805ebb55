//! Home dashboard handler implementations

use axum::{Json, extract::State};

use crate::{error::AppResult, services::HomeService, state::AppState};

use super::response::{
    HomeDashboardResponse, HomeRanklistResponse, LinksResponse, NoticesResponse,
    RecentContestsResponse, RecentProblemsResponse,
};

/// Aggregated dashboard; all blocks are fetched concurrently
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> AppResult<Json<HomeDashboardResponse>> {
    let response = HomeService::dashboard(state.db(), &state.config().site.links).await?;

    Ok(Json(response))
}

/// Site notices
pub async fn get_notices(State(state): State<AppState>) -> AppResult<Json<NoticesResponse>> {
    let notices = HomeService::notices(state.db()).await?;

    Ok(Json(NoticesResponse { notices }))
}

/// Ranklist head
pub async fn get_ranklist(State(state): State<AppState>) -> AppResult<Json<HomeRanklistResponse>> {
    let ranklist = HomeService::ranklist_head(state.db()).await?;

    Ok(Json(HomeRanklistResponse { ranklist }))
}

/// Most recently publicized problems
pub async fn get_recent_problems(
    State(state): State<AppState>,
) -> AppResult<Json<RecentProblemsResponse>> {
    let problems = HomeService::recent_problems(state.db()).await?;

    Ok(Json(RecentProblemsResponse { problems }))
}

/// Most recent public contests
pub async fn get_recent_contests(
    State(state): State<AppState>,
) -> AppResult<Json<RecentContestsResponse>> {
    let contests = HomeService::recent_contests(state.db()).await?;

    Ok(Json(RecentContestsResponse { contests }))
}

/// Footer links from site configuration
pub async fn get_links(State(state): State<AppState>) -> AppResult<Json<LinksResponse>> {
    Ok(Json(LinksResponse {
        links: state.config().site.links.clone(),
    }))
}
