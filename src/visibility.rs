//! Submission visibility and result shaping
//!
//! Every submission leaving this API passes through [`evaluate`], which
//! decides what a given viewer may see of a stored judge result, and
//! through the two projections built on top of it: the rough result (a
//! coarse status/score summary) and the overall result (the structured
//! per-subtask/per-testcase breakdown, possibly redacted).
//!
//! Denial is a value here, never an error: a viewer with no visibility
//! path gets all-false flags and the HTTP layer translates that into a
//! Forbidden response. A missing or corrupt stored result degrades to
//! the least-disclosing projection instead of failing the request.
//!
//! The decision is request-scoped and recomputed on every call; nothing
//! in this module is cached or persisted.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::middleware::auth::AuthenticatedUser;
use crate::models::contest::Contest;
use crate::models::submission::{RoughStatus, Submission};
use crate::models::user::Privilege;

/// Contest context for a contest submission, resolved by the caller
///
/// The two suppression gates are independent: an unfinished contest and
/// an explicit `hide_statistics` flag each withhold detail on their own,
/// and a supervisor bypasses both.
#[derive(Debug, Clone, Copy)]
pub struct ContestGate {
    pub ended: bool,
    pub hide_statistics: bool,
    pub viewer_is_supervisor: bool,
}

impl ContestGate {
    /// Build the gate from a loaded contest and the current viewer
    pub fn resolve(contest: &Contest, viewer: Option<&AuthenticatedUser>) -> Self {
        Self {
            ended: contest.is_ended(),
            hide_statistics: contest.hide_statistics,
            viewer_is_supervisor: contest.is_supervisor(viewer),
        }
    }

    /// Whether per-testcase detail and numeric usage are withheld
    pub fn suppresses_detail(&self) -> bool {
        if self.viewer_is_supervisor {
            return false;
        }
        !self.ended || self.hide_statistics
    }
}

/// What a viewer is allowed to see of one submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionAccess {
    pub allowed_see_code: bool,
    pub allowed_see_data: bool,
    pub allowed_see_detail: bool,
    pub allowed_rejudge: bool,
    /// Submission-scoped poll token; carries no authority by itself
    pub token: String,
}

impl SubmissionAccess {
    /// Whether any visibility path exists at all
    pub fn any_visible(&self) -> bool {
        self.allowed_see_code || self.allowed_see_data || self.allowed_see_detail
    }

    fn denied(token: String) -> Self {
        Self {
            allowed_see_code: false,
            allowed_see_data: false,
            allowed_see_detail: false,
            allowed_rejudge: false,
            token,
        }
    }

    fn full(token: String) -> Self {
        Self {
            allowed_see_code: true,
            allowed_see_data: true,
            allowed_see_detail: true,
            allowed_rejudge: true,
            token,
        }
    }
}

/// Decide what `viewer` may see of `submission`
///
/// `contest` must be the resolved gate when the submission belongs to a
/// contest; passing `None` for a contest submission (contest row gone)
/// closes both gates rather than failing.
pub fn evaluate(
    submission: &Submission,
    viewer: Option<&AuthenticatedUser>,
    contest: Option<&ContestGate>,
    tokens: &TokenIssuer,
) -> SubmissionAccess {
    let token = tokens.issue(submission.id);

    let elevated = viewer.is_some_and(|v| {
        v.id == submission.user_id
            || v.is_admin
            || v.has_privilege(Privilege::Manage)
            || v.has_privilege(Privilege::ManageProblem)
    });
    if elevated {
        return SubmissionAccess::full(token);
    }

    if !submission.is_public {
        return SubmissionAccess::denied(token);
    }

    let suppressed = if submission.in_contest() {
        contest.map(ContestGate::suppresses_detail).unwrap_or(true)
    } else {
        false
    };

    SubmissionAccess {
        allowed_see_code: true,
        allowed_see_data: !suppressed,
        allowed_see_detail: !suppressed,
        allowed_rejudge: false,
        token,
    }
}

/// Coarse status/score summary the viewer is authorized to see
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoughResult {
    pub status: String,
    pub score: Option<i32>,
}

/// Project the rough result for one submission
///
/// Without detail access the exact status collapses to a coarse bucket
/// and the score is withheld entirely, so partial-score information
/// cannot leak through a denied channel.
pub fn rough_result(submission: &Submission, access: &SubmissionAccess) -> RoughResult {
    if access.allowed_see_detail {
        RoughResult {
            status: submission.status.clone(),
            score: submission.score,
        }
    } else {
        RoughResult {
            status: coarsen_status(&submission.status).as_str().to_string(),
            score: None,
        }
    }
}

/// Collapse a stored status string to its coarse bucket
pub fn coarsen_status(status: &str) -> RoughStatus {
    crate::models::submission::JudgeStatus::parse(status).coarsen()
}

/// Structured detailed result, full or redacted
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OverallResult {
    /// The stored breakdown, passed through unmodified
    Full(serde_json::Value),
    /// Redaction marker plus whatever aggregates remain visible
    Redacted(RedactedResult),
}

/// Redacted overall result: aggregates only, subtask and testcase arrays
/// omitted entirely (an empty array would read as "zero subtasks")
#[derive(Debug, Clone, Serialize)]
pub struct RedactedResult {
    pub hidden: bool,
    pub score: Option<i32>,
    pub total_time: Option<i32>,
    pub max_memory: Option<i32>,
}

/// Project the overall result for one submission
pub fn overall_result(submission: &Submission, access: &SubmissionAccess) -> OverallResult {
    if access.allowed_see_detail {
        return OverallResult::Full(
            submission
                .result
                .clone()
                .unwrap_or(serde_json::Value::Null),
        );
    }

    if access.allowed_see_data {
        OverallResult::Redacted(RedactedResult {
            hidden: true,
            score: submission.score,
            total_time: submission.total_time,
            max_memory: submission.max_memory,
        })
    } else {
        OverallResult::Redacted(RedactedResult {
            hidden: true,
            score: None,
            total_time: None,
            max_memory: None,
        })
    }
}

/// Issues and resolves submission-scoped poll tokens
///
/// The token is a signed statement of "submission N", nothing more:
/// whoever presents it goes through [`evaluate`] again, so it never
/// widens access. Claims are deterministic, making the token stable for
/// a given submission.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

#[derive(Debug, Serialize, Deserialize)]
struct PollClaims {
    sub: i32,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue the poll token for a submission
    pub fn issue(&self, submission_id: i32) -> String {
        match jsonwebtoken::encode(
            &Header::default(),
            &PollClaims { sub: submission_id },
            &self.encoding,
        ) {
            Ok(token) => token,
            // HMAC signing over fixed-size claims does not fail in
            // practice; degrade to an unusable token instead of erroring
            Err(_) => String::new(),
        }
    }

    /// Resolve a poll token back to its submission id
    pub fn resolve(&self, token: &str) -> Option<i32> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        jsonwebtoken::decode::<PollClaims>(token, &self.decoding, &validation)
            .ok()
            .map(|data| data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submission::SubmissionKind;
    use chrono::Utc;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret")
    }

    fn submission(status: &str, score: Option<i32>, is_public: bool) -> Submission {
        Submission {
            id: 101,
            user_id: 5,
            problem_id: 1000,
            language: Some("cpp".to_string()),
            code: "int main() {}".to_string(),
            code_length: 13,
            status: status.to_string(),
            score,
            total_time: Some(120),
            max_memory: Some(4096),
            is_public,
            kind: SubmissionKind::Standalone,
            contest_id: None,
            result: Some(serde_json::json!({
                "score": score,
                "subtasks": [{"score": score, "cases": [{"status": status}]}]
            })),
            submit_time: Utc::now(),
        }
    }

    fn contest_submission(status: &str, score: Option<i32>, contest_id: i32) -> Submission {
        Submission {
            kind: SubmissionKind::Contest,
            contest_id: Some(contest_id),
            ..submission(status, score, true)
        }
    }

    fn viewer(id: i32, privileges: Vec<Privilege>) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            username: format!("user{id}"),
            is_admin: false,
            privileges,
        }
    }

    #[test]
    fn test_owner_gets_full_access() {
        let sub = submission("Wrong Answer", Some(40), false);
        let owner = viewer(5, vec![]);
        let access = evaluate(&sub, Some(&owner), None, &issuer());
        assert!(access.allowed_see_code);
        assert!(access.allowed_see_data);
        assert!(access.allowed_see_detail);
        assert!(access.allowed_rejudge);
    }

    #[test]
    fn test_private_submission_denied_to_strangers() {
        let sub = submission("Accepted", Some(100), false);
        let stranger = viewer(9, vec![]);

        let access = evaluate(&sub, Some(&stranger), None, &issuer());
        assert!(!access.any_visible());
        assert!(!access.allowed_rejudge);

        let anonymous = evaluate(&sub, None, None, &issuer());
        assert!(!anonymous.any_visible());
    }

    #[test]
    fn test_manage_problem_overrides_private_flag() {
        let sub = submission("Accepted", Some(100), false);
        let manager = viewer(9, vec![Privilege::ManageProblem]);
        let access = evaluate(&sub, Some(&manager), None, &issuer());
        assert!(access.allowed_see_detail);
        assert!(access.allowed_rejudge);
    }

    #[test]
    fn test_public_standalone_open_to_anonymous() {
        let sub = submission("Accepted", Some(100), true);
        let access = evaluate(&sub, None, None, &issuer());
        assert!(access.allowed_see_code);
        assert!(access.allowed_see_data);
        assert!(access.allowed_see_detail);
        assert!(!access.allowed_rejudge);

        let rough = rough_result(&sub, &access);
        assert_eq!(rough.status, "Accepted");
        assert_eq!(rough.score, Some(100));
    }

    #[test]
    fn test_running_contest_withholds_detail_and_score() {
        let sub = contest_submission("Wrong Answer", Some(40), 7);
        let gate = ContestGate {
            ended: false,
            hide_statistics: false,
            viewer_is_supervisor: false,
        };
        let access = evaluate(&sub, None, Some(&gate), &issuer());
        assert!(access.allowed_see_code);
        assert!(!access.allowed_see_data);
        assert!(!access.allowed_see_detail);

        let rough = rough_result(&sub, &access);
        assert_eq!(rough.status, "Failed");
        assert_eq!(rough.score, None);
    }

    #[test]
    fn test_ended_contest_reopens_detail() {
        let sub = contest_submission("Wrong Answer", Some(40), 7);
        let gate = ContestGate {
            ended: true,
            hide_statistics: false,
            viewer_is_supervisor: false,
        };
        let access = evaluate(&sub, None, Some(&gate), &issuer());
        assert!(access.allowed_see_detail);

        let rough = rough_result(&sub, &access);
        assert_eq!(rough.status, "Wrong Answer");
        assert_eq!(rough.score, Some(40));
    }

    #[test]
    fn test_ended_contest_never_hides_more_than_running() {
        // Monotonicity: for the same viewer, every flag granted while the
        // contest runs is still granted once it has ended.
        for hide_statistics in [false, true] {
            let sub = contest_submission("Partially Correct", Some(60), 7);
            let running = ContestGate {
                ended: false,
                hide_statistics,
                viewer_is_supervisor: false,
            };
            let ended = ContestGate {
                ended: true,
                hide_statistics,
                viewer_is_supervisor: false,
            };
            let before = evaluate(&sub, None, Some(&running), &issuer());
            let after = evaluate(&sub, None, Some(&ended), &issuer());
            assert!(!before.allowed_see_detail || after.allowed_see_detail);
            assert!(!before.allowed_see_data || after.allowed_see_data);
        }
    }

    #[test]
    fn test_hide_statistics_is_an_independent_gate() {
        // Even an ended contest keeps detail hidden while the flag is set.
        let sub = contest_submission("Accepted", Some(100), 7);
        let gate = ContestGate {
            ended: true,
            hide_statistics: true,
            viewer_is_supervisor: false,
        };
        let access = evaluate(&sub, None, Some(&gate), &issuer());
        assert!(!access.allowed_see_detail);

        let rough = rough_result(&sub, &access);
        assert_eq!(rough.status, "Accepted");
        assert_eq!(rough.score, None);
    }

    #[test]
    fn test_supervisor_bypasses_both_gates() {
        let sub = contest_submission("Wrong Answer", Some(40), 7);
        let gate = ContestGate {
            ended: false,
            hide_statistics: true,
            viewer_is_supervisor: true,
        };
        let access = evaluate(&sub, Some(&viewer(9, vec![])), Some(&gate), &issuer());
        assert!(access.allowed_see_detail);
        assert!(access.allowed_see_data);
    }

    #[test]
    fn test_missing_contest_closes_gates() {
        let sub = contest_submission("Accepted", Some(100), 7);
        let access = evaluate(&sub, None, None, &issuer());
        assert!(!access.allowed_see_detail);
        assert!(!access.allowed_see_data);
    }

    #[test]
    fn test_rough_coarsening_is_idempotent() {
        let sub = contest_submission("Runtime Error", Some(0), 7);
        let gate = ContestGate {
            ended: false,
            hide_statistics: false,
            viewer_is_supervisor: false,
        };
        let access = evaluate(&sub, None, Some(&gate), &issuer());

        let once = rough_result(&sub, &access);
        let mut recoarsened = sub.clone();
        recoarsened.status = once.status.clone();
        let twice = rough_result(&recoarsened, &access);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_overall_result_passes_through_when_allowed() {
        let sub = submission("Accepted", Some(100), true);
        let access = evaluate(&sub, None, None, &issuer());
        match overall_result(&sub, &access) {
            OverallResult::Full(value) => assert_eq!(value, sub.result.clone().unwrap()),
            OverallResult::Redacted(_) => panic!("expected full result"),
        }
    }

    #[test]
    fn test_overall_result_redacts_without_subtask_arrays() {
        let sub = contest_submission("Wrong Answer", Some(40), 7);
        let gate = ContestGate {
            ended: false,
            hide_statistics: false,
            viewer_is_supervisor: false,
        };
        let access = evaluate(&sub, None, Some(&gate), &issuer());

        let projected = overall_result(&sub, &access);
        let json = serde_json::to_value(&projected).unwrap();
        assert_eq!(json.get("hidden"), Some(&serde_json::Value::Bool(true)));
        assert!(json.get("subtasks").is_none());
        // Usage withheld along with detail during a running contest
        assert_eq!(json.get("score"), Some(&serde_json::Value::Null));
        assert_eq!(json.get("total_time"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_corrupt_stored_result_never_panics() {
        let mut sub = submission("Accepted", Some(100), true);
        sub.result = None;
        let access = evaluate(&sub, None, None, &issuer());
        match overall_result(&sub, &access) {
            OverallResult::Full(value) => assert!(value.is_null()),
            OverallResult::Redacted(_) => panic!("detail was allowed"),
        }
    }

    #[test]
    fn test_token_is_stable_and_viewer_independent() {
        let sub = submission("Accepted", Some(100), true);
        let tokens = issuer();

        let anonymous = evaluate(&sub, None, None, &tokens);
        let owner = evaluate(&sub, Some(&viewer(5, vec![])), None, &tokens);
        assert_eq!(anonymous.token, owner.token);
        assert_eq!(tokens.resolve(&anonymous.token), Some(sub.id));
    }

    #[test]
    fn test_token_resolution_rejects_forgeries() {
        let tokens = issuer();
        let other = TokenIssuer::new("another-secret");
        let forged = other.issue(101);
        assert_eq!(tokens.resolve(&forged), None);
        assert_eq!(tokens.resolve("garbage"), None);
    }
}
