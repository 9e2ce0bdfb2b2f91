//! Command metadata shared by application handlers.
//!
//! Handlers take a single `CommandMetadata` instead of loose correlation
//! and source parameters, so tracing spans stay consistent across every
//! discovery operation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Context that flows through command processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user the command acts on behalf of.
    pub user_id: UserId,

    /// Links related operations across a single chat turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Where the command came from (e.g. "chat", "voice", "admin").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata with required user ID.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
            source: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the source if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}
