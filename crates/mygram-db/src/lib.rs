//! MyGram DB - Database abstractions
//!
//! Repository traits for users, credentials and owned resources, with a
//! SQLx/PostgreSQL backend and an in-memory backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use mygram_db::{create_pool, run_migrations, Repositories};
//!
//! let pool = create_pool("postgres://localhost/mygram").await?;
//! run_migrations(&pool).await?;
//! let repos = Repositories::postgres(pool);
//!
//! let user = repos.users.find_by_email("user@example.com").await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;
pub mod repositories;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pool::{create_pool, create_pool_with_options, run_migrations, DbPool, PoolOptions};
pub use repo::*;
pub use repositories::{LookupFor, Repositories};
