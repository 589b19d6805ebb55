//! Contest service

use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    db::repositories::{ContestRepository, ProblemRepository, SubmissionRepository, UserRepository},
    error::{AppError, AppResult},
    handlers::{
        contests::response::{
            ContestDetailResponse, ContestProblemEntry, ContestProblemsResponse,
            ContestRanklistResponse, ContestRanklistRow, ContestRow, ContestsListResponse,
            PlayerStanding, letter_index,
        },
        users::response::UserSummary,
    },
    middleware::auth::AuthenticatedUser,
    models::{Contest, Privilege},
    utils::{Pagination, url},
};

/// Contest service for business logic
pub struct ContestService;

impl ContestService {
    /// List contests; site managers also see non-public ones
    pub async fn list(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> AppResult<ContestsListResponse> {
        let (offset, limit) = Pagination::window(page, per_page);
        let include_hidden =
            viewer.is_some_and(|v| v.is_admin || v.has_privilege(Privilege::Manage));

        let (contests, total) = ContestRepository::list(pool, include_hidden, offset, limit).await?;

        Ok(ContestsListResponse {
            contests: contests.iter().map(ContestRow::from).collect(),
            pagination: Pagination::new(page, per_page, total),
        })
    }

    /// Contest detail with problems, admins and the viewer's standing
    pub async fn detail(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        id: i32,
    ) -> AppResult<ContestDetailResponse> {
        let contest = Self::load_visible(pool, viewer, id).await?;

        let (problems, admins, participant_count, player) = tokio::try_join!(
            Self::problem_entries(pool, &contest),
            async {
                let users = UserRepository::find_by_ids(pool, &contest.admin_ids).await?;
                Ok::<_, AppError>(users.iter().map(UserSummary::from).collect::<Vec<_>>())
            },
            ContestRepository::participant_count(pool, contest.id),
            async {
                match viewer {
                    Some(v) => Ok::<_, AppError>(
                        ContestRepository::player(pool, contest.id, v.id)
                            .await?
                            .map(|p| PlayerStanding {
                                score: p.score,
                                rank: p.rank(),
                            }),
                    ),
                    None => Ok(None),
                }
            },
        )?;

        Ok(ContestDetailResponse {
            id: contest.id,
            title: contest.title.clone(),
            subtitle: contest.subtitle.clone(),
            information: contest.information.clone(),
            kind: contest.kind.clone(),
            start_time: contest.start_time,
            end_time: contest.end_time,
            is_public: contest.is_public,
            hide_statistics: contest.hide_statistics,
            status: contest.status(),
            problems,
            admins,
            participant_count,
            player,
        })
    }

    /// Letter-indexed problem list
    pub async fn problems(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        id: i32,
    ) -> AppResult<ContestProblemsResponse> {
        let contest = Self::load_visible(pool, viewer, id).await?;
        let problems = Self::problem_entries(pool, &contest).await?;

        Ok(ContestProblemsResponse {
            contest_id: contest.id,
            problems,
        })
    }

    /// Contest ranklist; hidden while running with `hide_statistics`
    /// unless the viewer supervises the contest
    pub async fn ranklist(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        id: i32,
    ) -> AppResult<ContestRanklistResponse> {
        let contest = Self::load_visible(pool, viewer, id).await?;

        if contest.is_running() && contest.hide_statistics && !contest.is_supervisor(viewer) {
            return Err(AppError::Forbidden(
                "The ranklist is hidden while this contest is running".to_string(),
            ));
        }

        let players = ContestRepository::players(pool, contest.id).await?;
        let user_ids: Vec<i32> = players.iter().map(|p| p.user_id).collect();
        let users = UserRepository::find_by_ids(pool, &user_ids).await?;
        let summaries: HashMap<i32, UserSummary> =
            users.iter().map(|u| (u.id, UserSummary::from(u))).collect();

        // Standard competition ranking: equal scores share a rank
        let mut rows = Vec::with_capacity(players.len());
        let mut last_score = None;
        let mut last_rank = 0i64;
        for (index, player) in players.iter().enumerate() {
            let rank = if last_score == Some(player.score) {
                last_rank
            } else {
                index as i64 + 1
            };
            last_score = Some(player.score);
            last_rank = rank;

            let Some(user) = summaries.get(&player.user_id) else {
                continue;
            };
            rows.push(ContestRanklistRow {
                rank,
                user: user.clone(),
                score: player.score,
                score_details: player.score_details.clone(),
            });
        }

        Ok(ContestRanklistResponse {
            contest_id: contest.id,
            players: rows,
        })
    }

    async fn load_visible(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        id: i32,
    ) -> AppResult<Contest> {
        let contest = ContestRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        if !contest.is_visible_to(viewer) {
            return Err(AppError::Forbidden(
                "You are not allowed to view this contest".to_string(),
            ));
        }

        Ok(contest)
    }

    async fn problem_entries(
        pool: &PgPool,
        contest: &Contest,
    ) -> AppResult<Vec<ContestProblemEntry>> {
        let (problems, stats) = tokio::try_join!(
            ProblemRepository::find_by_ids(pool, &contest.problem_ids),
            async {
                if contest.statistics_published() {
                    SubmissionRepository::contest_problem_stats(pool, contest.id).await
                } else {
                    Ok(Vec::new())
                }
            },
        )?;

        let titles: HashMap<i32, String> = problems.into_iter().map(|p| (p.id, p.title)).collect();
        let counts: HashMap<i32, (i64, i64)> = stats
            .into_iter()
            .map(|(problem_id, submit, ac)| (problem_id, (submit, ac)))
            .collect();

        // Preserve the contest's own problem order; dangling ids are
        // skipped rather than surfaced
        Ok(contest
            .problem_ids
            .iter()
            .enumerate()
            .filter_map(|(index, problem_id)| {
                let title = titles.get(problem_id)?.clone();
                let (submit_count, ac_count) = match counts.get(problem_id) {
                    Some((submit, ac)) => (Some(*submit), Some(*ac)),
                    None if contest.statistics_published() => (Some(0), Some(0)),
                    None => (None, None),
                };
                Some(ContestProblemEntry {
                    letter: letter_index(index),
                    id: *problem_id,
                    url: url::contest_problem_url(contest.id, index + 1),
                    title,
                    submit_count,
                    ac_count,
                })
            })
            .collect())
    }
}
