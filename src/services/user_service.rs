//! User service

use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    constants::INITIAL_RATING_LABEL,
    db::repositories::{
        ArticleRepository, ContestRepository, RanklistSort, RatingRepository, SubmissionRepository,
        UserRepository,
    },
    error::{AppError, AppResult},
    handlers::users::response::{
        AcProblemsResponse, RanklistResponse, RanklistRow, RatingHistoryEntry, StatusCount,
        UserArticleRow, UserArticlesResponse, UserProfileResponse, UserStatisticsResponse,
    },
    middleware::auth::AuthenticatedUser,
    models::User,
    utils::Pagination,
};

/// Number of article stubs embedded in a profile
const PROFILE_ARTICLE_COUNT: i64 = 5;

/// User service for business logic
pub struct UserService;

impl UserService {
    /// Full profile with statistics, solved problems and rating history
    pub async fn profile(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        id: i32,
        default_rating: i32,
    ) -> AppResult<UserProfileResponse> {
        let user = Self::load(pool, id).await?;

        let (counts, ac_problem_ids, rating_history, (articles, _)) = tokio::try_join!(
            SubmissionRepository::status_counts_for_user(pool, user.id),
            SubmissionRepository::ac_problem_ids(pool, user.id),
            Self::rating_history(pool, user.id, default_rating),
            ArticleRepository::list_by_user(pool, user.id, 0, PROFILE_ARTICLE_COUNT),
        )?;

        let email = user
            .email_visible_to(viewer)
            .then(|| user.email.clone());

        Ok(UserProfileResponse {
            id: user.id,
            username: user.username.clone(),
            email,
            information: user.information.clone(),
            sex: user.sex,
            nameplate: user.nameplate.clone(),
            is_admin: user.is_admin,
            rating: user.rating,
            ac_num: user.ac_num,
            register_time: user.register_time,
            statistics: status_counts(counts),
            ac_problem_ids,
            rating_history,
            recent_articles: articles.iter().map(article_row).collect(),
            allowed_edit: user.is_allowed_edit_by(viewer),
        })
    }

    /// Per-status submission counts
    pub async fn statistics(pool: &PgPool, id: i32) -> AppResult<UserStatisticsResponse> {
        let user = Self::load(pool, id).await?;

        let counts = SubmissionRepository::status_counts_for_user(pool, user.id).await?;
        let total = counts.iter().map(|(_, n)| n).sum();

        Ok(UserStatisticsResponse {
            user_id: user.id,
            counts: status_counts(counts),
            total,
        })
    }

    /// Rating history reconstructed from settlement rows, starting from
    /// a synthetic seed entry at the site default
    pub async fn rating_history(
        pool: &PgPool,
        user_id: i32,
        default_rating: i32,
    ) -> AppResult<Vec<RatingHistoryEntry>> {
        let rows = RatingRepository::history_for_user(pool, user_id).await?;

        let calculation_ids: Vec<i32> = rows.iter().map(|r| r.rating_calculation_id).collect();
        let (calculations, participants) = tokio::try_join!(
            RatingRepository::calculations_by_ids(pool, &calculation_ids),
            RatingRepository::participant_counts(pool, &calculation_ids),
        )?;

        let contest_ids: Vec<i32> = calculations.iter().map(|c| c.contest_id).collect();
        let contests = ContestRepository::find_by_ids(pool, &contest_ids).await?;

        let contest_of: HashMap<i32, i32> =
            calculations.iter().map(|c| (c.id, c.contest_id)).collect();
        let titles: HashMap<i32, String> =
            contests.into_iter().map(|c| (c.id, c.title)).collect();
        let participants: HashMap<i32, i64> = participants.into_iter().collect();

        let mut history = vec![RatingHistoryEntry {
            contest_id: None,
            contest_title: INITIAL_RATING_LABEL.to_string(),
            rating_after: default_rating,
            delta: 0,
            rank: None,
            participants: None,
        }];

        let mut previous = default_rating;
        for row in &rows {
            // Settlements whose calculation or contest row is gone are
            // skipped rather than shown half-resolved
            let Some(contest_id) = contest_of.get(&row.rating_calculation_id) else {
                continue;
            };
            let Some(title) = titles.get(contest_id) else {
                continue;
            };

            history.push(RatingHistoryEntry {
                contest_id: Some(*contest_id),
                contest_title: title.clone(),
                rating_after: row.rating_after,
                delta: row.rating_after - previous,
                rank: Some(row.rank),
                participants: participants.get(&row.rating_calculation_id).copied(),
            });
            previous = row.rating_after;
        }

        Ok(history)
    }

    /// Problems a user has solved
    pub async fn ac_problems(pool: &PgPool, id: i32) -> AppResult<AcProblemsResponse> {
        let user = Self::load(pool, id).await?;

        let problem_ids = SubmissionRepository::ac_problem_ids(pool, user.id).await?;

        Ok(AcProblemsResponse {
            user_id: user.id,
            problem_ids,
        })
    }

    /// One user's articles, newest first
    pub async fn articles(
        pool: &PgPool,
        id: i32,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> AppResult<UserArticlesResponse> {
        let user = Self::load(pool, id).await?;

        let (offset, limit) = Pagination::window(page, per_page);
        let (articles, total) = ArticleRepository::list_by_user(pool, user.id, offset, limit).await?;

        Ok(UserArticlesResponse {
            articles: articles.iter().map(article_row).collect(),
            pagination: Pagination::new(page, per_page, total),
        })
    }

    /// Site-wide ranklist over listed users
    pub async fn ranklist(
        pool: &PgPool,
        sort: Option<&str>,
        descending: bool,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> AppResult<RanklistResponse> {
        let sort = match sort {
            None => RanklistSort::Rating,
            Some(s) => RanklistSort::parse(s)
                .ok_or_else(|| AppError::Validation(format!("Unknown sort column: {s}")))?,
        };

        let (offset, limit) = Pagination::window(page, per_page);
        let (users, total) = UserRepository::ranklist(pool, sort, descending, offset, limit).await?;

        let rows = users
            .iter()
            .map(|user| RanklistRow {
                id: user.id,
                username: user.username.clone(),
                nameplate: user.nameplate.clone(),
                information: user.information.clone(),
                rating: user.rating,
                ac_num: user.ac_num,
            })
            .collect();

        Ok(RanklistResponse {
            users: rows,
            pagination: Pagination::new(page, per_page, total),
        })
    }

    async fn load(pool: &PgPool, id: i32) -> AppResult<User> {
        UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

fn status_counts(counts: Vec<(String, i64)>) -> Vec<StatusCount> {
    counts
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect()
}

fn article_row(article: &crate::models::Article) -> UserArticleRow {
    UserArticleRow {
        id: article.id,
        title: article.title.clone(),
        public_time: article.public_time,
    }
}
