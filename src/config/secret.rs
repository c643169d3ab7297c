//! Redacting wrapper for the service access key.

use std::fmt;

/// A string that prints as `<REDACTED>` in `Debug` and `Display` output.
///
/// Holds the service access key so it never ends up in logs or panic messages.
///
/// # Example
///
/// ```
/// use learning_system::config::SecretString;
///
/// let key = SecretString::new("eyJhbGciOiJIUzI1NiJ9.anon");
/// assert_eq!(format!("{key:?}"), "<REDACTED>");
/// assert_eq!(key.bearer(), "Bearer eyJhbGciOiJIUzI1NiJ9.anon");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a secret value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret. Only call this when building a request.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value for this key.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Returns true if the secret is empty or whitespace.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
