//! Home dashboard service

use sqlx::PgPool;

use crate::{
    constants::{HOME_RANKLIST_SIZE, HOME_RECENT_SIZE},
    db::repositories::{
        ArticleRepository, ContestRepository, ProblemRepository, SubmissionRepository,
        UserRepository,
    },
    error::AppResult,
    handlers::{
        config::response::SiteStatisticsResponse,
        home::response::{HomeContestRow, HomeDashboardResponse, HomeProblemRow, NoticeRow},
        users::response::UserSummary,
    },
};

/// Home dashboard service
pub struct HomeService;

impl HomeService {
    /// Every dashboard block in one response, fetched concurrently
    pub async fn dashboard(
        pool: &PgPool,
        links: &serde_json::Value,
    ) -> AppResult<HomeDashboardResponse> {
        let (notices, ranklist, recent_contests, recent_problems) = tokio::try_join!(
            Self::notices(pool),
            Self::ranklist_head(pool),
            Self::recent_contests(pool),
            Self::recent_problems(pool),
        )?;

        Ok(HomeDashboardResponse {
            notices,
            ranklist,
            recent_contests,
            recent_problems,
            links: links.clone(),
        })
    }

    /// Site notices, newest first
    pub async fn notices(pool: &PgPool) -> AppResult<Vec<NoticeRow>> {
        let notices = ArticleRepository::notices(pool).await?;

        Ok(notices.iter().map(NoticeRow::from).collect())
    }

    /// Top rated users for the dashboard ranklist block
    pub async fn ranklist_head(pool: &PgPool) -> AppResult<Vec<UserSummary>> {
        let users = UserRepository::top_rated(pool, HOME_RANKLIST_SIZE as i64).await?;

        Ok(users.iter().map(UserSummary::from).collect())
    }

    /// Most recently publicized problems
    pub async fn recent_problems(pool: &PgPool) -> AppResult<Vec<HomeProblemRow>> {
        let problems = ProblemRepository::recent_public(pool, HOME_RECENT_SIZE as i64).await?;

        Ok(problems.iter().map(HomeProblemRow::from).collect())
    }

    /// Most recent public contests
    pub async fn recent_contests(pool: &PgPool) -> AppResult<Vec<HomeContestRow>> {
        let contests = ContestRepository::recent_public(pool, HOME_RECENT_SIZE as i64).await?;

        Ok(contests.iter().map(HomeContestRow::from).collect())
    }

    /// Site-wide counters
    pub async fn site_statistics(pool: &PgPool) -> AppResult<SiteStatisticsResponse> {
        let (user_count, problem_count, submission_count) = tokio::try_join!(
            UserRepository::count(pool),
            ProblemRepository::count_public(pool),
            SubmissionRepository::count(pool),
        )?;

        Ok(SiteStatisticsResponse {
            user_count,
            problem_count,
            submission_count,
        })
    }
}
