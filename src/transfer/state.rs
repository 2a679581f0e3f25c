//! File transfer state machine.
//!
//! ```text
//!                accept                 complete
//!   ┌─────────┐ ───────► ┌──────────┐ ─────────► ┌───────────┐
//!   │ Offered │          │ Accepted │            │ Completed │
//!   └────┬────┘          └────┬─────┘            └───────────┘
//!        │ reject             │ cancel
//!        ▼                    ▼
//!   ┌──────────┐         ┌───────────┐
//!   │ Rejected │         │ Cancelled │ ◄── cancel (from Offered)
//!   └──────────┘         └───────────┘
//! ```
//!
//! An outbound transfer in `Offered` is *waiting*: no peer has accepted and
//! no bytes have moved.

use crate::error::TransferError;
use std::fmt;

/// Lifecycle state of a single transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferState {
    Offered,
    Accepted,
    Rejected,
    Cancelled,
    Completed,
}

/// Transitions a caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferAction {
    Accept,
    Reject,
    Cancel,
    Complete,
}

impl TransferState {
    /// The state reached by applying `action`, or the reason it is not allowed.
    pub fn apply(self, action: TransferAction) -> Result<Self, TransferError> {
        use TransferAction::*;
        use TransferState::*;

        match (self, action) {
            (Offered, Accept) => Ok(Accepted),
            (Offered, Reject) => Ok(Rejected),
            (Offered | Accepted, Cancel) => Ok(Cancelled),
            (Accepted, Complete) => Ok(Completed),
            (from, action) => Err(TransferError::InvalidTransition { from, action }),
        }
    }

    /// Rejected, cancelled and completed transfers never change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled | Self::Completed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Offered => "offered",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TransferAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Cancel => "cancel",
            Self::Complete => "complete",
        })
    }
}
