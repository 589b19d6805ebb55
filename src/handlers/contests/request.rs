//! Contest request DTOs

use serde::Deserialize;

/// List contests query parameters
#[derive(Debug, Deserialize)]
pub struct ListContestsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
