//! Session authentication for the target platform
//!
//! This module establishes the authenticated session every scan worker
//! shares. Two modes are supported:
//! - a pre-captured session cookie pasted from a browser
//! - form-based login with a username and a secret resolved by the caller
//!
//! Either way the result is a [`Session`] wrapping a cookie-bearing HTTP
//! client; the scanner never knows which mode produced it.

mod credentials;
mod session;

pub use credentials::Credentials;
pub use session::{login, AuthError, Session};
