//! Offline credential validation.
//!
//! Credentials are JWT-shaped bearer tokens. The console never verifies the
//! signature; it only reads the embedded expiry to decide, without a server
//! round-trip, whether a stored credential is still worth presenting.

mod payload;
mod validator;

pub use payload::TokenPayload;
pub use validator::*;
