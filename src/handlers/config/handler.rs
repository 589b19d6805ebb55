//! Site configuration handler implementations

use axum::{Json, extract::State};

use crate::{
    constants::languages,
    error::AppResult,
    middleware::auth::OptionalAuth,
    models::JudgeStatus,
    state::AppState,
};

use super::response::{
    JudgeStatusResponse, LanguagesResponse, SiteInfoResponse, SiteStatisticsResponse, ViewerInfo,
    status_entry,
};

/// Supported languages and the enabled subset
pub async fn get_languages(State(state): State<AppState>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: languages::ALL.iter().map(|s| s.to_string()).collect(),
        enabled: state.config().site.enabled_languages.clone(),
    })
}

/// Judge statuses with presentation hints
pub async fn get_judge_status() -> Json<JudgeStatusResponse> {
    Json(JudgeStatusResponse {
        statuses: JudgeStatus::ALL.iter().copied().map(status_entry).collect(),
    })
}

/// Site title and the current viewer
pub async fn get_site_info(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
) -> Json<SiteInfoResponse> {
    Json(SiteInfoResponse {
        title: state.config().site.title.clone(),
        viewer: viewer.map(|v| ViewerInfo {
            id: v.id,
            username: v.username,
            is_admin: v.is_admin,
            privileges: v.privileges,
        }),
    })
}

/// Site-wide counters, fetched concurrently
pub async fn get_statistics(
    State(state): State<AppState>,
) -> AppResult<Json<SiteStatisticsResponse>> {
    let response = crate::services::HomeService::site_statistics(state.db()).await?;

    Ok(Json(response))
}
