//! Collaborator boundaries consumed by the command layer.
//!
//! The dispatcher never reaches for global state: every collaborator is
//! handed to [`crate::handlers::CommandParser::new`] as a trait object, which
//! is also how tests substitute recording doubles.

use crate::error::CommandResult;
use crate::state::{Topic, UserRef};
use crate::transfer::TransferId;
use std::path::Path;

/// Read access to who is in the chat.
pub trait SessionDirectory: Send + Sync {
    /// Resolve a nick (case-sensitive) to a user.
    fn lookup_user(&self, nick: &str) -> Option<UserRef>;

    /// The local user.
    fn current_user(&self) -> UserRef;

    /// Everyone currently known, including the local user.
    fn users(&self) -> Vec<UserRef>;

    /// The latest topic change, `None` if no topic was ever set.
    fn topic(&self) -> Option<Topic>;
}

/// Operations that go out to the network and can be refused.
///
/// Network delivery is fire-and-forget: an `Ok` means the request was
/// accepted locally and queued, not that peers have seen it.
pub trait SessionFacade: Send + Sync {
    fn go_away(&self, message: &str) -> CommandResult;

    fn come_back(&self) -> CommandResult;

    /// Change the topic. An empty `text` removes it.
    fn change_topic(&self, text: &str) -> CommandResult;

    /// Tell `user` we withdrew the offer of `file_name`.
    fn notify_transfer_abort(&self, user: &UserRef, id: TransferId, file_name: &str);

    fn change_nick(&self, nick: &str) -> CommandResult;

    fn send_private_message(&self, user: &UserRef, text: &str) -> CommandResult;

    /// Offer `file` to `user`.
    fn send_file(&self, user: &UserRef, file: &Path) -> CommandResult;

    /// Send a line to the main chat.
    fn send_chat_message(&self, text: &str) -> CommandResult;
}

/// The system message log.
pub trait SystemLog: Send + Sync {
    fn show_system_message(&self, message: &str);
}

/// Refresh signals for the chat display.
pub trait ChatView: Send + Sync {
    /// The topic changed and should be redrawn.
    fn show_topic(&self);

    fn clear_chat(&self);

    /// The user asked to leave.
    fn request_quit(&self);
}
