//! Submission service
//!
//! Every submission leaving this service is shaped through the
//! visibility pipeline; raw rows never reach a handler.

use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    constants::languages,
    db::repositories::{
        ContestRepository, ProblemRepository, SubmissionListFilter, SubmissionRepository,
        UserRepository,
    },
    error::{AppError, AppResult},
    handlers::submissions::{
        request::ListSubmissionsQuery,
        response::{
            ContestSummary, DisplayConfig, DisplayConfigResponse, SubmissionDetailResponse,
            SubmissionRow, SubmissionsListResponse,
        },
    },
    middleware::auth::AuthenticatedUser,
    models::{Contest, Privilege, Submission, SubmissionKind},
    utils::{Pagination, url},
    visibility::{self, ContestGate, TokenIssuer},
};

/// Submission service for list and detail shaping
pub struct SubmissionService;

impl SubmissionService {
    /// List submissions with filters, each row shaped for the viewer
    pub async fn list(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        query: ListSubmissionsQuery,
        tokens: &TokenIssuer,
    ) -> AppResult<SubmissionsListResponse> {
        let (offset, limit) = Pagination::window(query.page, query.per_page);

        // Contest scope requires an ended public contest or a supervisor
        let contest_ctx = match query.contest_id {
            Some(contest_id) => {
                let contest = ContestRepository::find_by_id(pool, contest_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

                if !contest.is_supervisor(viewer) && !(contest.is_ended() && contest.is_public) {
                    return Err(AppError::Forbidden(
                        "Contest submissions are not visible yet".to_string(),
                    ));
                }

                let gate = ContestGate::resolve(&contest, viewer);
                Some((contest, gate))
            }
            None => None,
        };

        let display_config = DisplayConfig::for_context(contest_ctx.as_ref().map(|(_, g)| g));
        let contest_summary = contest_ctx.as_ref().map(|(c, _)| contest_summary(c));
        let is_filtered = query.is_filtered();

        // An unknown submitter matches nothing rather than erroring
        let submitter_id = match query.submitter.as_deref() {
            Some(name) => match UserRepository::find_by_username(pool, name).await? {
                Some(user) => Some(user.id),
                None => {
                    return Ok(SubmissionsListResponse {
                        submissions: Vec::new(),
                        pagination: Pagination::new(query.page, query.per_page, 0),
                        display_config,
                        contest: contest_summary,
                        is_filtered: true,
                    });
                }
            },
            None => None,
        };

        // A problem filter is permission-checked unless the viewer
        // manages problems or the list is already contest-gated
        if let Some(problem_id) = query.problem_id {
            let exempt = contest_ctx.is_some()
                || viewer
                    .is_some_and(|v| v.is_admin || v.has_privilege(Privilege::ManageProblem));
            if !exempt {
                let problem = ProblemRepository::find_by_id(pool, problem_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;
                if !problem.is_allowed_use_by(viewer) {
                    return Err(AppError::Forbidden(
                        "You are not allowed to view this problem".to_string(),
                    ));
                }
            }
        }

        let mut filter = SubmissionListFilter {
            user_id: submitter_id,
            problem_id: query.problem_id,
            kind: Some(if contest_ctx.is_some() {
                SubmissionKind::Contest
            } else {
                SubmissionKind::Standalone
            }),
            contest_id: query.contest_id,
            min_score: query.min_score,
            max_score: query.max_score,
            status: query.status.clone(),
            public_only: contest_ctx.is_none() && !sees_private(viewer),
            ..Default::default()
        };
        match query.language.as_deref() {
            Some(languages::SUBMIT_ANSWER) => filter.answer_only = true,
            Some(languages::NON_SUBMIT_ANSWER) => filter.code_only = true,
            Some(lang) => filter.language = Some(lang.to_string()),
            None => {}
        }

        let (submissions, total) = SubmissionRepository::list(pool, &filter, offset, limit).await?;

        let gate = contest_ctx.as_ref().map(|(_, g)| g);
        let rows = Self::shape_rows(pool, viewer, submissions, gate, tokens).await?;

        Ok(SubmissionsListResponse {
            submissions: rows,
            pagination: Pagination::new(query.page, query.per_page, total),
            display_config,
            contest: contest_summary,
            is_filtered,
        })
    }

    /// One submission, fully shaped; denies when no visibility path exists
    pub async fn detail(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        id: i32,
        tokens: &TokenIssuer,
    ) -> AppResult<SubmissionDetailResponse> {
        let submission = SubmissionRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        // A contest submission whose contest row is gone keeps its
        // gates closed instead of failing
        let gate = match (submission.in_contest(), submission.contest_id) {
            (true, Some(contest_id)) => ContestRepository::find_by_id(pool, contest_id)
                .await?
                .map(|c| ContestGate::resolve(&c, viewer)),
            _ => None,
        };

        let access = visibility::evaluate(&submission, viewer, gate.as_ref(), tokens);
        if !access.any_visible() {
            return Err(AppError::Forbidden(
                "You are not allowed to view this submission".to_string(),
            ));
        }

        let (username, problem_title) = tokio::try_join!(
            async {
                Ok::<_, AppError>(
                    UserRepository::find_by_id(pool, submission.user_id)
                        .await?
                        .map(|u| u.username)
                        .unwrap_or_default(),
                )
            },
            async {
                Ok::<_, AppError>(
                    ProblemRepository::find_by_id(pool, submission.problem_id)
                        .await?
                        .map(|p| p.title)
                        .unwrap_or_default(),
                )
            },
        )?;

        let result = visibility::rough_result(&submission, &access);
        let overall_result = visibility::overall_result(&submission, &access);
        let code = (access.allowed_see_code && !submission.is_submit_answer())
            .then(|| submission.code.clone());

        Ok(SubmissionDetailResponse {
            id: submission.id,
            url: url::submission_url(submission.id),
            problem_id: submission.problem_id,
            problem_title,
            user_id: submission.user_id,
            username,
            language: display_language(&submission),
            code,
            code_length: submission.code_length,
            submit_time: submission.submit_time,
            result,
            overall_result,
            allowed_see_code: access.allowed_see_code,
            allowed_see_data: access.allowed_see_data,
            allowed_see_detail: access.allowed_see_detail,
            allowed_rejudge: access.allowed_rejudge,
            token: access.token,
        })
    }

    /// Display config for an optional contest context
    pub async fn display_config(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        contest_id: Option<i32>,
    ) -> AppResult<DisplayConfigResponse> {
        let ctx = match contest_id {
            Some(id) => {
                let contest = ContestRepository::find_by_id(pool, id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;
                let gate = ContestGate::resolve(&contest, viewer);
                Some((contest, gate))
            }
            None => None,
        };

        Ok(DisplayConfigResponse {
            display_config: DisplayConfig::for_context(ctx.as_ref().map(|(_, g)| g)),
            contest: ctx.as_ref().map(|(c, _)| contest_summary(c)),
        })
    }

    async fn shape_rows(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        submissions: Vec<Submission>,
        gate: Option<&ContestGate>,
        tokens: &TokenIssuer,
    ) -> AppResult<Vec<SubmissionRow>> {
        let user_ids: Vec<i32> = submissions.iter().map(|s| s.user_id).collect();
        let problem_ids: Vec<i32> = submissions.iter().map(|s| s.problem_id).collect();

        let (users, problems) = tokio::try_join!(
            UserRepository::find_by_ids(pool, &user_ids),
            ProblemRepository::find_by_ids(pool, &problem_ids),
        )?;
        let usernames: HashMap<i32, String> =
            users.into_iter().map(|u| (u.id, u.username)).collect();
        let titles: HashMap<i32, String> = problems.into_iter().map(|p| (p.id, p.title)).collect();

        Ok(submissions
            .into_iter()
            .map(|submission| {
                let access = visibility::evaluate(&submission, viewer, gate, tokens);
                let result = visibility::rough_result(&submission, &access);
                let running = submission.running();

                SubmissionRow {
                    id: submission.id,
                    url: url::submission_url(submission.id),
                    problem_id: submission.problem_id,
                    problem_title: titles
                        .get(&submission.problem_id)
                        .cloned()
                        .unwrap_or_default(),
                    user_id: submission.user_id,
                    username: usernames
                        .get(&submission.user_id)
                        .cloned()
                        .unwrap_or_default(),
                    language: display_language(&submission),
                    code_length: submission.code_length,
                    result,
                    total_time: access.allowed_see_data.then_some(submission.total_time).flatten(),
                    max_memory: access.allowed_see_data.then_some(submission.max_memory).flatten(),
                    submit_time: submission.submit_time,
                    running,
                    token: running.then_some(access.token),
                }
            })
            .collect())
    }
}

/// Privileged viewers see non-public rows in the global list
fn sees_private(viewer: Option<&AuthenticatedUser>) -> bool {
    viewer.is_some_and(|v| {
        v.is_admin
            || v.has_privilege(Privilege::Manage)
            || v.has_privilege(Privilege::ManageProblem)
    })
}

/// Submit-answer submissions report the pseudo-language `answer`
fn display_language(submission: &Submission) -> Option<String> {
    if submission.is_submit_answer() {
        Some("answer".to_string())
    } else {
        submission.language.clone()
    }
}

fn contest_summary(contest: &Contest) -> ContestSummary {
    ContestSummary {
        id: contest.id,
        title: contest.title.clone(),
        ended: contest.is_ended(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn submission(language: Option<&str>) -> Submission {
        Submission {
            id: 1,
            user_id: 1,
            problem_id: 1,
            language: language.map(|s| s.to_string()),
            code: String::new(),
            code_length: 0,
            status: "Accepted".to_string(),
            score: Some(100),
            total_time: None,
            max_memory: None,
            is_public: true,
            kind: SubmissionKind::Standalone,
            contest_id: None,
            result: None,
            submit_time: Utc::now(),
        }
    }

    #[test]
    fn test_submit_answer_reports_answer_language() {
        assert_eq!(
            display_language(&submission(None)),
            Some("answer".to_string())
        );
        assert_eq!(
            display_language(&submission(Some(""))),
            Some("answer".to_string())
        );
        assert_eq!(
            display_language(&submission(Some("cpp"))),
            Some("cpp".to_string())
        );
    }

    #[test]
    fn test_anonymous_viewer_never_sees_private_rows() {
        assert!(!sees_private(None));

        let plain = AuthenticatedUser {
            id: 1,
            username: "alice".to_string(),
            is_admin: false,
            privileges: vec![],
        };
        assert!(!sees_private(Some(&plain)));

        let manager = AuthenticatedUser {
            privileges: vec![Privilege::ManageProblem],
            ..plain
        };
        assert!(sees_private(Some(&manager)));
    }
}
