//! Problem service

use std::collections::HashMap;

use sqlx::PgPool;

use crate::{
    constants::PROBLEM_STATISTICS_SIZE,
    db::repositories::{
        ArticleRepository, ProblemListFilter, ProblemRepository, ProblemSort, StatisticsOrder,
        SubmissionRepository, UserRepository,
    },
    error::{AppError, AppResult},
    handlers::{
        problems::{
            request::ListProblemsQuery,
            response::{
                ProblemDetailResponse, ProblemRow, ProblemStatisticsResponse,
                ProblemsListResponse, StatisticsEntry,
            },
        },
        users::response::UserSummary,
    },
    middleware::auth::AuthenticatedUser,
    models::{Privilege, Problem, ProblemTag},
    utils::{Pagination, url},
};

/// Problem service for business logic
pub struct ProblemService;

impl ProblemService {
    /// List problems with keyword, tag and sort parameters
    pub async fn list(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        query: ListProblemsQuery,
    ) -> AppResult<ProblemsListResponse> {
        let (offset, limit) = Pagination::window(query.page, query.per_page);

        let tag_ids = query
            .parsed_tag_ids()
            .map_err(|bad| AppError::Validation(format!("Invalid tag id: {bad}")))?;

        let sort = match query.sort.as_deref() {
            None => ProblemSort::Id,
            Some(s) => ProblemSort::parse(s)
                .ok_or_else(|| AppError::Validation(format!("Unknown sort column: {s}")))?,
        };
        let descending = match query.order.as_deref() {
            None | Some("asc") => false,
            Some("desc") => true,
            Some(other) => {
                return Err(AppError::Validation(format!("Unknown order: {other}")));
            }
        };

        let filter = ProblemListFilter {
            keyword: query.keyword.clone(),
            tag_ids,
            viewer_id: viewer.map(|v| v.id),
            include_hidden: viewer
                .is_some_and(|v| v.is_admin || v.has_privilege(Privilege::ManageProblem)),
        };

        let (problems, total) =
            ProblemRepository::list(pool, &filter, sort, descending, offset, limit).await?;

        let ids: Vec<i32> = problems.iter().map(|p| p.id).collect();
        let (tag_rows, judge_states) = tokio::try_join!(
            ProblemRepository::tags_for_problems(pool, &ids),
            async {
                match viewer {
                    Some(v) => SubmissionRepository::judge_states_for(pool, v.id, &ids).await,
                    None => Ok(Vec::new()),
                }
            },
        )?;

        let mut tags_by_problem: HashMap<i32, Vec<ProblemTag>> = HashMap::new();
        for (problem_id, tag) in tag_rows {
            tags_by_problem.entry(problem_id).or_default().push(tag);
        }
        let mut states: HashMap<_, _> = judge_states.into_iter().collect();

        let rows = problems
            .iter()
            .map(|problem| ProblemRow {
                id: problem.id,
                url: url::problem_url(problem.id),
                title: problem.title.clone(),
                is_public: problem.is_public,
                ac_num: problem.ac_num,
                submit_num: problem.submit_num,
                ac_rate: problem.ac_rate(),
                tags: tags_by_problem.remove(&problem.id).unwrap_or_default(),
                judge_state: states.remove(&problem.id),
                allowed_edit: problem.is_allowed_edit_by(viewer),
            })
            .collect();

        Ok(ProblemsListResponse {
            problems: rows,
            pagination: Pagination::new(query.page, query.per_page, total),
        })
    }

    /// Full problem statement with tags and viewer standing
    pub async fn detail(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        id: i32,
    ) -> AppResult<ProblemDetailResponse> {
        let problem = Self::load_usable(pool, viewer, id).await?;
        let allowed_edit = problem.is_allowed_edit_by(viewer);

        let (tags, discussion_count, owner, judge_state) = tokio::try_join!(
            ProblemRepository::tags_for_problem(pool, problem.id),
            ArticleRepository::count_for_problem(pool, problem.id),
            UserRepository::find_by_id(pool, problem.user_id),
            async {
                match viewer {
                    Some(v) => {
                        SubmissionRepository::judge_state_for(pool, v.id, problem.id, false).await
                    }
                    None => Ok(None),
                }
            },
        )?;

        // Anonymous problems keep their author to themselves
        let owner = if problem.is_anonymous && !allowed_edit {
            None
        } else {
            owner.as_ref().map(UserSummary::from)
        };

        Ok(ProblemDetailResponse {
            id: problem.id,
            url: url::problem_url(problem.id),
            title: problem.title.clone(),
            description: problem.description.clone(),
            input_format: problem.input_format.clone(),
            output_format: problem.output_format.clone(),
            example: problem.example.clone(),
            limit_and_hint: problem.limit_and_hint.clone(),
            time_limit: problem.time_limit,
            memory_limit: problem.memory_limit,
            kind: problem.kind.clone(),
            file_io: problem.file_io,
            file_io_input_name: problem.file_io_input_name.clone(),
            file_io_output_name: problem.file_io_output_name.clone(),
            is_public: problem.is_public,
            publicize_time: problem.publicize_time,
            ac_num: problem.ac_num,
            submit_num: problem.submit_num,
            ac_rate: problem.ac_rate(),
            tags,
            owner,
            discussion_count,
            judge_state,
            allowed_edit,
        })
    }

    /// Fastest/shortest/earliest accepted submissions for a problem
    pub async fn statistics(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        id: i32,
        order: StatisticsOrder,
    ) -> AppResult<ProblemStatisticsResponse> {
        let problem = Self::load_usable(pool, viewer, id).await?;

        let submissions =
            SubmissionRepository::statistics(pool, problem.id, order, PROBLEM_STATISTICS_SIZE)
                .await?;

        let user_ids: Vec<i32> = submissions.iter().map(|s| s.user_id).collect();
        let users = UserRepository::find_by_ids(pool, &user_ids).await?;
        let summaries: HashMap<i32, UserSummary> =
            users.iter().map(|u| (u.id, UserSummary::from(u))).collect();

        let entries = submissions
            .iter()
            .filter_map(|submission| {
                let user = summaries.get(&submission.user_id)?.clone();
                Some(StatisticsEntry {
                    submission_id: submission.id,
                    url: url::submission_url(submission.id),
                    user,
                    language: submission.language.clone(),
                    total_time: submission.total_time,
                    max_memory: submission.max_memory,
                    code_length: submission.code_length,
                    submit_time: submission.submit_time,
                })
            })
            .collect();

        Ok(ProblemStatisticsResponse {
            problem_id: problem.id,
            order: order.as_str().to_string(),
            submissions: entries,
        })
    }

    /// All tags, alphabetical
    pub async fn tags(pool: &PgPool) -> AppResult<Vec<ProblemTag>> {
        ProblemRepository::all_tags(pool).await
    }

    async fn load_usable(
        pool: &PgPool,
        viewer: Option<&AuthenticatedUser>,
        id: i32,
    ) -> AppResult<Problem> {
        let problem = ProblemRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        if !problem.is_allowed_use_by(viewer) {
            return Err(AppError::Forbidden(
                "You are not allowed to view this problem".to_string(),
            ));
        }

        Ok(problem)
    }
}
