//! Rating models
//!
//! A rating calculation is one rated contest settlement; each participant
//! gets a rating history row pointing at it. A user's rating history is
//! reconstructed by walking these rows in calculation order.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One user's rating change from one rated contest
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RatingHistory {
    pub rating_calculation_id: i32,
    pub user_id: i32,
    pub rating_after: i32,
    /// Final rank in the rated contest
    pub rank: i32,
}

/// A rated contest settlement
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RatingCalculation {
    pub id: i32,
    pub contest_id: i32,
}
