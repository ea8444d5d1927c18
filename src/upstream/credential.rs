//! Upstream access token.
//!
//! The token is resolved from the environment once at startup and injected
//! into the handler state. It cannot be formatted: both `Debug` and
//! `Display` print a fixed placeholder, so no log statement can leak it.

use std::fmt;
use std::sync::Arc;

const REDACTED: &str = "[REDACTED]";

/// Secret token granting read access to the upstream repository.
#[derive(Clone)]
pub struct Credential(Arc<str>);

impl Credential {
    /// Wrap a token. Blank tokens count as absent.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(Arc::from(token)))
        }
    }

    /// Read the token from the process environment.
    pub fn from_env(var: &str) -> Option<Self> {
        Self::from_lookup(var, |key| std::env::var(key).ok())
    }

    /// Read the token through an arbitrary variable lookup.
    pub fn from_lookup<F>(var: &str, lookup: F) -> Option<Self>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        lookup(var).and_then(Self::new)
    }

    /// Raw token, only for building the outbound authorization header.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&REDACTED).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_absent() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   \n").is_none());
    }

    #[test]
    fn test_token_is_trimmed() {
        let credential = Credential::new("  ghp_abc123\n").unwrap();
        assert_eq!(credential.expose(), "ghp_abc123");
    }

    #[test]
    fn test_formatting_never_reveals_token() {
        let credential = Credential::new("ghp_supersecret").unwrap();
        let debug = format!("{:?}", credential);
        let display = format!("{}", credential);
        assert!(!debug.contains("supersecret"));
        assert!(!display.contains("supersecret"));
        assert_eq!(display, "[REDACTED]");

        let wrapped = format!("{:?}", Some(credential));
        assert!(!wrapped.contains("supersecret"));
    }

    #[test]
    fn test_from_lookup() {
        let found = Credential::from_lookup("GITHUB_PAT", |key| {
            assert_eq!(key, "GITHUB_PAT");
            Some("token".to_string())
        });
        assert_eq!(found.unwrap().expose(), "token");

        let missing = Credential::from_lookup("GITHUB_PAT", |_| None);
        assert!(missing.is_none());
    }
}
