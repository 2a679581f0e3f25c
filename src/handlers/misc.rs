//! Client-side handlers: CLEAR, ABOUT, HELP, QUIT
//!
//! None of these take arguments; anything after the command is ignored.

use super::{Context, Handler, HandlerResult};

const HELP_TEXT: &str = "LanChat commands:\n\
/about - information about LanChat\n\
/away <away message> - set status to away\n\
/back - set status to not away\n\
/cancel <nick> <id> - cancel an ongoing file transfer with a user\n\
/clear - clear all the text from the chat\n\
/help - show this help message\n\
/msg <nick> <msg> - send a private message to a user\n\
/nick <new nick> - changes your nick name\n\
/quit - quit from the chat\n\
/receive <nick> <id> - accept a file transfer request from a user\n\
/reject <nick> <id> - reject a file transfer request from a user\n\
/send <nick> <file> - send a file to a user\n\
/topic <optional new topic> - prints the current topic, or changes the topic\n\
/transfers - shows a list of all file transfers and their status\n\
/users - show the user list\n\
/whois <nick> - show information about a user\n\
//<text> - send the text as a normal message, with a single slash";

/// Handler for the `/clear` command.
pub struct ClearHandler;

impl Handler for ClearHandler {
    fn handle(&self, ctx: &Context<'_>, _args: &str) -> HandlerResult {
        ctx.view.clear_chat();
        Ok(())
    }
}

/// Handler for the `/about` command.
pub struct AboutHandler;

impl Handler for AboutHandler {
    fn handle(&self, ctx: &Context<'_>, _args: &str) -> HandlerResult {
        ctx.system_message(about_text());
        Ok(())
    }
}

pub(crate) fn about_text() -> String {
    format!(
        "This is LanChat v{}, by {}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS").replace(':', ", ")
    )
}

/// Handler for the `/help` command.
pub struct HelpHandler;

impl Handler for HelpHandler {
    fn handle(&self, ctx: &Context<'_>, _args: &str) -> HandlerResult {
        ctx.system_message(HELP_TEXT);
        Ok(())
    }
}

/// Handler for the `/quit` command.
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &Context<'_>, _args: &str) -> HandlerResult {
        ctx.view.request_quit();
        Ok(())
    }
}
