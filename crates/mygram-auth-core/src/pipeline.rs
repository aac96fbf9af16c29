//! Auth pipeline
//!
//! Stage one turns a bearer token into a [`UserId`]; stage two checks that the
//! user owns the targeted resource. Either stage short-circuits with an error
//! before the protected operation runs.

use std::future::Future;

use mygram_db::OwnerLookup;
use mygram_types::{ResourceId, UserId};

use crate::ownership;
use crate::token::TokenService;
use crate::AuthError;

/// Composes token verification and ownership checks
#[derive(Debug, Clone)]
pub struct AuthPipeline {
    tokens: TokenService,
}

impl AuthPipeline {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }

    /// Token service used for stage one
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Stage one: resolve the caller's identity.
    ///
    /// Every failure is reported as [`AuthError::Unauthorized`]; the precise
    /// cause is logged and counted but not returned.
    pub fn authenticate(&self, token: Option<&str>) -> Result<UserId, AuthError> {
        let result = match token {
            Some(token) => self.tokens.verify(token),
            None => Err(AuthError::Unauthorized),
        };

        result.map_err(|err| {
            tracing::debug!(reason = err.reason(), "Authentication failed");
            metrics::counter!("mygram_auth_failures_total", "reason" => err.reason()).increment(1);
            AuthError::Unauthorized
        })
    }

    /// Stage two: require that `user` owns resource `id`
    pub async fn authorize<I, L>(&self, lookup: &L, user: UserId, id: I) -> Result<(), AuthError>
    where
        I: ResourceId,
        L: OwnerLookup<I> + ?Sized,
    {
        ownership::authorize(lookup, user, id)
            .await?
            .into_result(I::KIND)
    }

    /// Run both stages, then `op` with the authorized identity
    pub async fn run_owned<I, L, F, Fut, T>(
        &self,
        token: Option<&str>,
        lookup: &L,
        id: I,
        op: F,
    ) -> Result<T, AuthError>
    where
        I: ResourceId,
        L: OwnerLookup<I> + ?Sized,
        F: FnOnce(UserId) -> Fut,
        Fut: Future<Output = Result<T, AuthError>>,
    {
        let user = self.authenticate(token)?;
        self.authorize(lookup, user, id).await?;
        op(user).await
    }
}
