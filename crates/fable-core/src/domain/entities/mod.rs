//! Domain entities.

mod comment;
mod profile;
mod user;

pub use comment::Comment;
pub use profile::UserProfile;
pub use user::User;
