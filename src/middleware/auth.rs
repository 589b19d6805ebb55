//! Authentication middleware
//!
//! The login service lives outside this crate; it issues signed session
//! tokens. Here we only decode them. Every endpoint of this read API
//! accepts anonymous viewers, so authentication is always optional and a
//! bad token simply yields an anonymous request.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{models::user::Privilege, state::AppState};

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: String,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub privileges: Vec<Privilege>,
    pub exp: i64,
}

/// Authenticated viewer extracted from a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
    pub is_admin: bool,
    pub privileges: Vec<Privilege>,
}

impl AuthenticatedUser {
    /// Typed privilege check
    pub fn has_privilege(&self, privilege: Privilege) -> bool {
        self.privileges.contains(&privilege)
    }
}

/// Optional authenticated viewer wrapper (never fails)
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(
            parts.extensions.get::<AuthenticatedUser>().cloned(),
        ))
    }
}

/// Optional authentication middleware (doesn't fail if no token)
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            match decode_session(token, &state.config().session.secret) {
                Some(user) => {
                    debug!(user_id = %user.id, username = %user.username, "Viewer authenticated");
                    request.extensions_mut().insert(user);
                }
                None => {
                    debug!(path = %request.uri().path(), "Ignoring invalid session token");
                }
            }
        }
    }

    next.run(request).await
}

fn decode_session(token: &str, secret: &str) -> Option<AuthenticatedUser> {
    let validation = Validation::new(Algorithm::HS256);
    let data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .ok()?;

    let id: i32 = data.claims.sub.parse().ok()?;

    Some(AuthenticatedUser {
        id,
        username: data.claims.username,
        is_admin: data.claims.is_admin,
        privileges: data.claims.privileges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn issue(claims: &SessionClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_valid_session() {
        let claims = SessionClaims {
            sub: "17".to_string(),
            username: "alice".to_string(),
            is_admin: false,
            privileges: vec![Privilege::ManageProblem],
            exp: (chrono::Utc::now().timestamp()) + 3600,
        };
        let token = issue(&claims, "secret");

        let user = decode_session(&token, "secret").expect("valid token");
        assert_eq!(user.id, 17);
        assert!(user.has_privilege(Privilege::ManageProblem));
        assert!(!user.has_privilege(Privilege::Manage));
    }

    #[test]
    fn test_decode_rejects_wrong_secret_and_garbage() {
        let claims = SessionClaims {
            sub: "17".to_string(),
            username: "alice".to_string(),
            is_admin: false,
            privileges: vec![],
            exp: (chrono::Utc::now().timestamp()) + 3600,
        };
        let token = issue(&claims, "secret");

        assert!(decode_session(&token, "other").is_none());
        assert!(decode_session("not-a-token", "secret").is_none());
    }
}
