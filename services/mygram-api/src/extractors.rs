//! Axum extractors for the two auth pipeline stages
//!
//! [`AuthUser`] authenticates the bearer token. [`Owned`] additionally checks
//! that the caller owns the resource named by the path. [`ApiJson`] reads
//! request bodies and reports bad ones in the API error format.

use axum::extract::{FromRef, FromRequest, FromRequestParts, Path};
use axum::http::header;
use axum::http::request::Parts;
use axum::Json;

use mygram_auth_core::AuthError;
use mygram_db::{LookupFor, Repositories};
use mygram_types::{ResourceId, UserId};

use crate::error::ApiError;
use crate::state::AppState;

/// JSON request body; missing fields and malformed JSON become 400 `BAD_REQUEST`
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Authenticated user extracted from request
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = extract_token(parts);
        let user_id = app_state.accounts.pipeline().authenticate(token)?;
        Ok(Self { user_id })
    }
}

/// Bearer token from the Authorization header, if present and well-formed
fn extract_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resource from the request path that the authenticated caller owns
#[derive(Debug, Clone, Copy)]
pub struct Owned<I> {
    pub user_id: UserId,
    pub id: I,
}

impl<S, I> FromRequestParts<S> for Owned<I>
where
    AppState: FromRef<S>,
    S: Send + Sync,
    I: ResourceId,
    Repositories: LookupFor<I>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // stage one runs first so anonymous callers learn nothing about ids
        let AuthUser { user_id } = AuthUser::from_request_parts(parts, state).await?;

        // a segment that is not an id cannot name an existing resource
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthError::NotFound(I::KIND))?;
        let id = I::parse(&raw).map_err(|_| AuthError::NotFound(I::KIND))?;

        let app_state = AppState::from_ref(state);
        app_state
            .accounts
            .pipeline()
            .authorize(app_state.repos.owners(), user_id, id)
            .await?;

        Ok(Self { user_id, id })
    }
}
