use std::fmt;

/// Account credentials for form-based login
///
/// The secret never appears in `Debug` output, so the struct can travel
/// through logs and error context without leaking it. Only the login
/// routine in this module tree can read it back.
#[derive(Clone)]
pub struct Credentials {
    /// Account name presented to the login form
    pub username: String,
    secret: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            secret: secret.into(),
        }
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}
