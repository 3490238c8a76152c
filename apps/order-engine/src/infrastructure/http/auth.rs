//! Bearer credential resolution.
//!
//! Requests carry `Authorization: Bearer <user-id>`; the id is resolved
//! through the user store before any handler runs. Credential issuance is
//! outside this service.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::controller::AppState;
use crate::application::AppError;
use crate::domain::access::{User, UserRepository};
use crate::domain::catalog::ProductRepository;
use crate::domain::notifications::NotificationRepository;
use crate::domain::ordering::OrderRepository;
use crate::domain::production::BatchRepository;
use crate::domain::shared::UserId;

/// The authenticated caller, resolved from the bearer credential.
pub struct AuthUser(pub User);

impl<O, P, N, U, B> FromRequestParts<AppState<O, P, N, U, B>> for AuthUser
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
    N: NotificationRepository + 'static,
    U: UserRepository + 'static,
    B: BatchRepository + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<O, P, N, U, B>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::Authentication("Missing Authorization header".to_string())
            })?;

        let credential = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Authentication("Expected a bearer credential".to_string())
        })?;

        let user = state
            .user_repo
            .find_by_id(&UserId::new(credential.trim()))
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::Authentication("Unknown credential".to_string()))?;

        if !user.is_active {
            return Err(AppError::Authorization(
                "Account is pending approval".to_string(),
            ));
        }

        Ok(Self(user))
    }
}
