//! Frontend URL builder
//!
//! List and detail payloads carry canonical frontend paths so clients do
//! not hard-code route shapes.

pub fn problem_url(id: i32) -> String {
    format!("/problem/{id}")
}

pub fn user_url(id: i32) -> String {
    format!("/user/{id}")
}

pub fn submission_url(id: i32) -> String {
    format!("/submission/{id}")
}

pub fn contest_url(id: i32) -> String {
    format!("/contest/{id}")
}

/// Problem slot inside a contest, 1-based
pub fn contest_problem_url(contest_id: i32, index: usize) -> String {
    format!("/contest/{contest_id}/{index}")
}

pub fn article_url(id: i32) -> String {
    format!("/article/{id}")
}
