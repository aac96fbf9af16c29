//! MyGram Types - Shared domain types
//!
//! This crate contains domain types used across MyGram crates:
//! - User identity
//! - Owned resource identifiers (photos, comments, social media links)

pub mod resource;
pub mod user;

pub use resource::*;
pub use user::*;
