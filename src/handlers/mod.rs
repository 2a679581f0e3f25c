//! Chat command handlers.
//!
//! This module contains the Handler trait and command registry for dispatching
//! `/command` lines typed by the local user to the matching handler.
//!
//! Handlers return failures as a [`HandlerError`]; [`CommandParser`] turns
//! each one into exactly one system message.

mod core;
mod helpers;
mod messaging;
mod misc;
mod topic;
mod transfer;
mod user_query;
mod user_status;

pub use self::core::{
    CommandParser, Context, Handler, HandlerError, HandlerResult, ParserParams, Registry,
};
pub use messaging::MsgHandler;
pub use misc::{AboutHandler, ClearHandler, HelpHandler, QuitHandler};
pub use topic::{TopicHandler, fix_topic};
pub use transfer::{CancelHandler, ReceiveHandler, RejectHandler, SendHandler, TransfersHandler};
pub use user_query::{UsersHandler, WhoisHandler};
pub use user_status::{AwayHandler, BackHandler, NickHandler};
