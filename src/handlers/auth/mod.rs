// handlers/auth/mod.rs - Session lifecycle handlers.
//
// Login and registration are the only routes that talk to the remote auth
// subsystem; every other route trusts the session cookie.

pub mod login;
pub mod logout;
pub mod register;

pub use login::{login_get, login_post};
pub use logout::logout;
pub use register::{register_get, register_post};
