//! Capability for running caller-supplied SQL.
//!
//! A [`TrustedQuery`] can only be obtained from [`QueryAuthorizer::authorize`],
//! so every code path that executes arbitrary SQL has been through a token check.

use crate::error::{ChatbotError, ChatbotResult};

/// Request header carrying the caller's token
pub const TRUSTED_QUERY_HEADER: &str = "x-trusted-query-token";

/// SQL text that a caller was authorized to run as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedQuery {
    sql: String,
}

impl TrustedQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

/// Checks caller tokens against the configured secret.
///
/// Without a configured secret the capability is switched off and every
/// request is refused.
#[derive(Clone, Default)]
pub struct QueryAuthorizer {
    token: Option<String>,
}

impl QueryAuthorizer {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn disabled() -> Self {
        Self { token: None }
    }

    /// Reads `TRUSTED_QUERY_TOKEN`; unset or empty disables the capability
    pub fn from_env() -> Self {
        Self::new(std::env::var("TRUSTED_QUERY_TOKEN").ok())
    }

    pub fn is_enabled(&self) -> bool {
        self.token.is_some()
    }

    pub fn authorize(&self, presented: Option<&str>, sql: impl Into<String>) -> ChatbotResult<TrustedQuery> {
        let Some(expected) = self.token.as_deref() else {
            return Err(ChatbotError::Forbidden(
                "Trusted queries are disabled on this server".to_string(),
            ));
        };

        let Some(presented) = presented else {
            return Err(ChatbotError::Unauthorized(format!(
                "Missing {} header",
                TRUSTED_QUERY_HEADER
            )));
        };

        if !constant_time_eq(expected.as_bytes(), presented.as_bytes()) {
            return Err(ChatbotError::Forbidden(
                "Invalid trusted query token".to_string(),
            ));
        }

        Ok(TrustedQuery { sql: sql.into() })
    }
}

impl std::fmt::Debug for QueryAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryAuthorizer")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
