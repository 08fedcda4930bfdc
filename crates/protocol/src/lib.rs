//! Wire types shared between the bootstrap client and the identity service.

pub mod identity;

pub use identity::{CURRENT_USER_PATH, LOGIN_PATH, LoginRequest, LoginResponse, UserProfile};
