//! Basic authentication for the topics service.
//!
//! The remote engine accepts HTTP Basic credentials on both the fetch and
//! the post-back call. Presence of a username is what enables the header.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Username/password pair sent as `Authorization: Basic ...`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials. An empty password is still joined with the colon.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn into_parts(self) -> (String, String) {
        (self.username, self.password)
    }

    /// Full value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Basic {}", encode(&self.username, &self.password))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Encode `username:password` as standard base64.
///
/// Colons inside either field are not escaped; Basic auth cannot represent
/// a username containing one.
pub fn encode(username: &str, password: &str) -> String {
    STANDARD.encode(format!("{username}:{password}"))
}
