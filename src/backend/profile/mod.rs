//! Profile Module
//!
//! Account profile endpoints. Every route here sits behind the session gate
//! and reads the caller from `CurrentAccount`.

pub mod handlers;

pub use handlers::{get_me, get_user, list_users, update_avatar, update_profile};
pub use handlers::{UpdateAvatarRequest, UpdateProfileRequest};
