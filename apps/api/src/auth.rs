//! Bearer-token authentication.
//!
//! Token issuance is an external concern; this layer only verifies an
//! `Authorization: Bearer <token>` header against the `api_tokens` table and
//! resolves the owning user. Handlers receive an `AuthUser` via extractor.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Candidate,
    Recruiter,
}

impl Role {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "candidate" => Some(Role::Candidate),
            "recruiter" => Some(Role::Recruiter),
            _ => None,
        }
    }
}

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn require_recruiter(&self) -> Result<(), AppError> {
        if self.role == Role::Recruiter {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    pub fn require_candidate(&self) -> Result<(), AppError> {
        if self.role == Role::Candidate {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let user: Option<UserRow> = sqlx::query_as(
            "SELECT u.* FROM api_tokens t JOIN users u ON u.id = t.user_id WHERE t.token = $1",
        )
        .bind(token)
        .fetch_optional(&state.db)
        .await?;

        let user = user.ok_or(AppError::Unauthorized)?;
        let role = Role::parse(&user.role).ok_or(AppError::Unauthorized)?;

        Ok(AuthUser { id: user.id, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_known_values() {
        assert_eq!(Role::parse("candidate"), Some(Role::Candidate));
        assert_eq!(Role::parse("recruiter"), Some(Role::Recruiter));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn test_role_checks() {
        let recruiter = AuthUser {
            id: Uuid::new_v4(),
            role: Role::Recruiter,
        };
        assert!(recruiter.require_recruiter().is_ok());
        assert!(recruiter.require_candidate().is_err());
    }
}
