//! Owned resource types
//!
//! Photos, comments and social media links all carry an immutable owner
//! [`UserId`](crate::UserId). Their identifiers implement [`ResourceId`] so the
//! ownership check can be written once for every kind.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of owned resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Photo,
    Comment,
    SocialMedia,
}

impl ResourceKind {
    /// Stable label for logs, metrics and error codes
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Comment => "comment",
            Self::SocialMedia => "social_media",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of an owned resource.
pub trait ResourceId:
    Copy + Eq + std::hash::Hash + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
    /// Kind of resource this identifier points at
    const KIND: ResourceKind;

    /// Wrap a raw UUID
    fn from_uuid(uuid: Uuid) -> Self;

    /// Underlying UUID
    fn as_uuid(&self) -> Uuid;

    /// Parse an identifier from a path segment
    fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }
}

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident => $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl ResourceId for $name {
            const KIND: ResourceKind = $kind;

            fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            fn as_uuid(&self) -> Uuid {
                self.0
            }
        }
    };
}

resource_id!(
    /// Unique photo identifier
    PhotoId => ResourceKind::Photo
);

resource_id!(
    /// Unique comment identifier
    CommentId => ResourceKind::Comment
);

resource_id!(
    /// Unique social media link identifier
    SocialMediaId => ResourceKind::SocialMedia
);
