//! Unified error handling for lanchat.
//!
//! Errors raised below the command layer. Everything the user sees is
//! rendered by [`crate::handlers::HandlerError`]; the types here are the
//! failures that flow into it.

use crate::transfer::{TransferAction, TransferState};
use thiserror::Error;

// ============================================================================
// Session Errors (facade operations)
// ============================================================================

/// A status or topic change refused by the session layer.
///
/// The message is the entire user-visible payload and is shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CommandError(String);

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The message exactly as it should be shown.
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Result type for session facade operations.
pub type CommandResult = Result<(), CommandError>;

// ============================================================================
// Transfer Errors (record state machine)
// ============================================================================

/// File transfer state machine errors.
///
/// The dispatcher validates state before calling a transition, so these only
/// surface when a record moved underneath it (e.g. the peer cancelled first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("cannot {action} a transfer that is {from}")]
    InvalidTransition {
        from: TransferState,
        action: TransferAction,
    },
}

impl TransferError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "invalid_transition",
        }
    }
}
