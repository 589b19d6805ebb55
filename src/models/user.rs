//! User model and privileges

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::middleware::auth::AuthenticatedUser;

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub email: String,
    /// Whether the email may be shown to other users
    pub public_email: bool,
    pub information: Option<String>,
    pub is_admin: bool,
    /// Hidden users are excluded from ranklists
    pub is_show: bool,
    pub sex: Option<i16>,
    pub nameplate: Option<String>,
    pub rating: i32,
    pub ac_num: i32,
    pub register_time: DateTime<Utc>,
}

impl User {
    /// Whether the viewer may edit this profile
    pub fn is_allowed_edit_by(&self, viewer: Option<&AuthenticatedUser>) -> bool {
        match viewer {
            Some(v) => v.id == self.id || v.is_admin,
            None => false,
        }
    }

    /// Whether the email is disclosed to this viewer
    pub fn email_visible_to(&self, viewer: Option<&AuthenticatedUser>) -> bool {
        self.public_email || self.is_allowed_edit_by(viewer)
    }
}

/// Site-wide capability a user may hold
///
/// Privileges are a closed enum rather than free-form strings so a typo
/// can never silently grant or deny access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Privilege {
    /// Full management of submissions and contests
    Manage,
    /// Management of problems, including non-public ones
    ManageProblem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_wire_names() {
        assert_eq!(
            serde_json::to_string(&Privilege::ManageProblem).unwrap(),
            "\"manage_problem\""
        );
        assert_eq!(
            serde_json::from_str::<Privilege>("\"manage\"").unwrap(),
            Privilege::Manage
        );
    }
}
