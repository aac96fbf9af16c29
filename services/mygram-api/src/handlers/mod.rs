//! HTTP handlers

mod comments;
mod health;
mod photos;
mod shared;
mod social_medias;
mod users;

pub use comments::{create_comment, delete_comment, list_comments, update_comment};
pub use health::{health, ready};
pub use photos::{create_photo, delete_photo, list_photos, update_photo};
pub use social_medias::{
    create_social_media, delete_social_media, list_social_medias, update_social_media,
};
pub use users::{delete_user, login, register, update_user};
