//! Command handler context and core types.
//!
//! Defines the `Context<'a>` struct passed to all handlers, the `Handler`
//! trait, and `HandlerError`, which owns the wording of every user-facing
//! failure.

use crate::config::TransferConfig;
use crate::error::{CommandError, TransferError};
use crate::session::{ChatView, SessionDirectory, SessionFacade, SystemLog};
use crate::transfer::{TransferId, TransferRegistry};
use thiserror::Error;

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// Who is in the chat, and the current topic.
    pub directory: &'a dyn SessionDirectory,
    /// Network-facing operations that can be refused.
    pub session: &'a dyn SessionFacade,
    /// System message output.
    pub log: &'a dyn SystemLog,
    /// Display refresh signals.
    pub view: &'a dyn ChatView,
    /// Live file transfers.
    pub transfers: &'a TransferRegistry,
    /// Transfer settings (rename bounds).
    pub settings: &'a TransferConfig,
}

impl Context<'_> {
    /// Show one line (or block) in the system message log.
    #[inline]
    pub fn system_message(&self, message: impl AsRef<str>) {
        self.log.show_system_message(message.as_ref());
    }
}

/// Errors that can occur during command handling.
///
/// Display strings are the text after the `/<command> - ` prefix; see
/// [`HandlerError::to_system_message`].
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("wrong number of arguments: {0}")]
    WrongArgumentCount(&'static str),

    #[error("missing argument {0}")]
    MissingArgument(&'static str),

    #[error("missing arguments {0}")]
    MissingArguments(&'static str),

    #[error("no such user '{0}'")]
    NoSuchUser(String),

    /// The command targeted the local user.
    #[error("no point in doing that!")]
    SelfTarget,

    #[error("invalid file id argument: '{0}'")]
    InvalidTransferId(String),

    #[error("no file with id {id} offered by {nick}")]
    NoOfferedFile { id: TransferId, nick: String },

    #[error("no file transfer with id {id} going on with {nick}")]
    NoTransfer { id: TransferId, nick: String },

    #[error("already receiving '{file}' from {nick}")]
    AlreadyReceiving { file: String, nick: String },

    #[error("transfer of '{file}' from {nick} has not started yet")]
    NotStarted { file: String, nick: String },

    #[error("unable to find a free file name for '{0}'")]
    NoFreeFileName(String),

    #[error("you are already away: '{0}'")]
    AlreadyAway(String),

    #[error("you are not away")]
    NotAway,

    #[error("'{0}' is not a valid nick name. (1-10 letters)")]
    InvalidNick(String),

    #[error("you are already called '{0}'")]
    SameNick(String),

    #[error("the nick name '{0}' is in use by someone else")]
    NickInUse(String),

    #[error("no such file '{0}'")]
    NoSuchFile(String),

    #[error("unknown command")]
    UnknownCommand,

    /// Refused by the session layer; shown verbatim.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// A record changed state underneath the handler.
    #[error("internal error: {0}")]
    Transfer(#[from] TransferError),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::WrongArgumentCount(_) => "wrong_argument_count",
            Self::MissingArgument(_) | Self::MissingArguments(_) => "missing_argument",
            Self::NoSuchUser(_) => "no_such_user",
            Self::SelfTarget => "self_target",
            Self::InvalidTransferId(_) => "invalid_transfer_id",
            Self::NoOfferedFile { .. } | Self::NoTransfer { .. } => "no_such_transfer",
            Self::AlreadyReceiving { .. } => "already_receiving",
            Self::NotStarted { .. } => "not_started",
            Self::NoFreeFileName(_) => "no_free_file_name",
            Self::AlreadyAway(_) => "already_away",
            Self::NotAway => "not_away",
            Self::InvalidNick(_) => "invalid_nick",
            Self::SameNick(_) => "same_nick",
            Self::NickInUse(_) => "nick_in_use",
            Self::NoSuchFile(_) => "no_such_file",
            Self::UnknownCommand => "unknown_command",
            Self::Command(_) => "session_refused",
            Self::Transfer(e) => e.error_code(),
        }
    }

    /// Render as the single system message shown for `/<command>`.
    ///
    /// Returns `None` for internal errors, which are logged instead.
    pub fn to_system_message(&self, command: &str) -> Option<String> {
        match self {
            Self::Command(e) => Some(e.message().to_string()),
            Self::Transfer(_) => None,
            Self::UnknownCommand => Some(format!(
                "Unknown command '/{command}'. Type /help for a list of commands"
            )),
            other => Some(format!("/{command} - {other}")),
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// Trait implemented by all command handlers.
///
/// `args` is everything after the command token, leading whitespace included.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &Context<'_>, args: &str) -> HandlerResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::{TransferAction, TransferState};

    #[test]
    fn test_prefixed_messages() {
        let err = HandlerError::WrongArgumentCount("<nick> <id>");
        assert_eq!(
            err.to_system_message("reject").as_deref(),
            Some("/reject - wrong number of arguments: <nick> <id>")
        );

        let err = HandlerError::NoOfferedFile {
            id: 1,
            nick: "SomeOne".to_string(),
        };
        assert_eq!(
            err.to_system_message("receive").as_deref(),
            Some("/receive - no file with id 1 offered by SomeOne")
        );
    }

    #[test]
    fn test_session_errors_are_verbatim() {
        let err = HandlerError::from(CommandError::new("Don't set the topic!"));
        assert_eq!(
            err.to_system_message("topic").as_deref(),
            Some("Don't set the topic!")
        );
        assert_eq!(err.error_code(), "session_refused");
    }

    #[test]
    fn test_internal_errors_are_silent() {
        let err = HandlerError::from(TransferError::InvalidTransition {
            from: TransferState::Cancelled,
            action: TransferAction::Accept,
        });
        assert_eq!(err.to_system_message("receive"), None);
        assert_eq!(err.error_code(), "invalid_transition");
    }

    #[test]
    fn test_unknown_command_message() {
        assert_eq!(
            HandlerError::UnknownCommand.to_system_message("dance").as_deref(),
            Some("Unknown command '/dance'. Type /help for a list of commands")
        );
    }
}
