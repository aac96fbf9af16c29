//! PostgreSQL repository implementations

mod comment;
mod credential;
mod photo;
mod social_media;
mod user;

pub use comment::PgCommentRepository;
pub use credential::PgCredentialRepository;
pub use photo::PgPhotoRepository;
pub use social_media::PgSocialMediaRepository;
pub use user::PgUserRepository;
