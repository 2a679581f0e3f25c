//! lanchat - a serverless LAN chat client core
//!
//! Command dispatch for `/commands` typed by the local user, the file transfer
//! state machine and its registry, and topic and away bookkeeping. The
//! transport that moves bytes over the network sits behind
//! [`network::NetworkEvent`] and is not part of this crate.

pub mod config;
pub mod error;
pub mod handlers;
pub mod input;
pub mod network;
pub mod session;
pub mod state;
pub mod transfer;

pub use config::Config;
pub use error::{CommandError, CommandResult, TransferError};
pub use handlers::{CommandParser, ParserParams};
pub use input::{InputRouter, Route};
pub use session::{ChatView, SessionDirectory, SessionFacade, SystemLog};
