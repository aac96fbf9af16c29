//! Ownership authorizer
//!
//! One check shared by every owned resource kind: the requester may mutate a
//! resource only if they are its recorded owner.

use mygram_db::OwnerLookup;
use mygram_types::{ResourceId, ResourceKind, UserId};

use crate::AuthError;

/// Why access was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The resource does not exist
    NotFound,
    /// The resource belongs to someone else
    Forbidden,
}

/// Outcome of an ownership check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    /// Label for the `decision` metric dimension
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny(DenyReason::NotFound) => "not_found",
            Self::Deny(DenyReason::Forbidden) => "forbidden",
        }
    }

    /// Convert a denial into the matching error
    pub fn into_result(self, kind: ResourceKind) -> Result<(), AuthError> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(DenyReason::NotFound) => Err(AuthError::NotFound(kind)),
            Self::Deny(DenyReason::Forbidden) => Err(AuthError::Forbidden(kind)),
        }
    }
}

/// Decide whether `user` may mutate the resource `id`.
///
/// Read-only: the lookup is the only storage access. Storage failures become
/// [`AuthError::Internal`].
pub async fn authorize<I, L>(lookup: &L, user: UserId, id: I) -> Result<Decision, AuthError>
where
    I: ResourceId,
    L: OwnerLookup<I> + ?Sized,
{
    let decision = match lookup.find_owner(id).await? {
        None => Decision::Deny(DenyReason::NotFound),
        Some(owner) if owner == user => Decision::Allow,
        Some(_) => Decision::Deny(DenyReason::Forbidden),
    };

    metrics::counter!(
        "mygram_authorization_decisions_total",
        "kind" => I::KIND.as_str(),
        "decision" => decision.as_str()
    )
    .increment(1);

    if decision != Decision::Allow {
        tracing::debug!(%user, kind = %I::KIND, %id, decision = decision.as_str(), "Ownership check denied");
    }

    Ok(decision)
}
