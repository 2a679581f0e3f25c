//! Events queued for the transport.

use crate::state::UserCode;
use crate::transfer::TransferId;

/// Something the local user did that peers need to hear about.
///
/// Events are delivered fire-and-forget; the session never waits for the
/// transport to act on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkEvent {
    /// A line for the main chat.
    Chat { text: String },
    /// A private message to one peer.
    PrivateMessage { to: UserCode, text: String },
    Away { message: String },
    Back,
    /// The topic changed. Empty `text` removes it.
    Topic { text: String },
    NickChanged { nick: String },
    /// A file offer to one peer.
    FileOffered {
        to: UserCode,
        id: TransferId,
        file_name: String,
        size: u64,
    },
    /// We withdrew an offer before the peer accepted it.
    TransferAborted {
        to: UserCode,
        id: TransferId,
        file_name: String,
    },
}

impl NetworkEvent {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Chat { .. } => "chat",
            Self::PrivateMessage { .. } => "private_message",
            Self::Away { .. } => "away",
            Self::Back => "back",
            Self::Topic { .. } => "topic",
            Self::NickChanged { .. } => "nick",
            Self::FileOffered { .. } => "file_offered",
            Self::TransferAborted { .. } => "transfer_aborted",
        }
    }
}
