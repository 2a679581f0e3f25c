//! MSG handler.

use super::helpers::{first_and_rest, resolve_peer};
use super::{Context, Handler, HandlerError, HandlerResult};
use tracing::debug;

/// Handler for the `/msg <nick> <msg>` command.
pub struct MsgHandler;

impl Handler for MsgHandler {
    fn handle(&self, ctx: &Context<'_>, args: &str) -> HandlerResult {
        let (nick, text) = first_and_rest(args)
            .filter(|(_, text)| !text.is_empty())
            .ok_or(HandlerError::MissingArguments("<nick> <msg>"))?;
        let user = resolve_peer(ctx, nick)?;

        ctx.session.send_private_message(&user, text)?;
        debug!(nick = %nick, len = text.len(), "Private message sent");
        Ok(())
    }
}
