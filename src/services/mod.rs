//! Business logic services
//!
//! Services compose repository queries into the view models the handlers
//! return. All submission shaping funnels through [`crate::visibility`].

mod contest_service;
mod discussion_service;
mod home_service;
mod problem_service;
mod submission_service;
mod user_service;

pub use contest_service::ContestService;
pub use discussion_service::DiscussionService;
pub use home_service::HomeService;
pub use problem_service::ProblemService;
pub use submission_service::SubmissionService;
pub use user_service::UserService;
