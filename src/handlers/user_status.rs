//! User status handlers: AWAY, BACK, NICK

use super::{Context, Handler, HandlerError, HandlerResult};
use crate::state::is_valid_nick;
use tracing::debug;

/// Handler for the `/away <away message>` command.
pub struct AwayHandler;

impl Handler for AwayHandler {
    fn handle(&self, ctx: &Context<'_>, args: &str) -> HandlerResult {
        let message = args.trim();
        if message.is_empty() {
            return Err(HandlerError::MissingArgument("<away message>"));
        }

        let me = ctx.directory.current_user();
        if let Some(current) = me.away_message() {
            return Err(HandlerError::AlreadyAway(current));
        }

        ctx.session.go_away(message)?;
        debug!(message = %message, "Marked away");
        Ok(())
    }
}

/// Handler for the `/back` command. Extra arguments are ignored.
pub struct BackHandler;

impl Handler for BackHandler {
    fn handle(&self, ctx: &Context<'_>, _args: &str) -> HandlerResult {
        if !ctx.directory.current_user().is_away() {
            return Err(HandlerError::NotAway);
        }

        ctx.session.come_back()?;
        debug!("Marked back");
        Ok(())
    }
}

/// Handler for the `/nick <new nick>` command.
///
/// Nick syntax and collisions are checked here. The session may still refuse
/// the change for its own reasons.
pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &Context<'_>, args: &str) -> HandlerResult {
        let nick = args.trim();
        if nick.is_empty() {
            return Err(HandlerError::MissingArgument("<nick>"));
        }
        if !is_valid_nick(nick) {
            return Err(HandlerError::InvalidNick(nick.to_string()));
        }

        let me = ctx.directory.current_user();
        if me.nick() == nick {
            return Err(HandlerError::SameNick(nick.to_string()));
        }
        if let Some(other) = ctx.directory.lookup_user(nick)
            && !other.is_same(&me)
        {
            return Err(HandlerError::NickInUse(nick.to_string()));
        }

        ctx.session.change_nick(nick)?;
        debug!(old = %me.nick(), new = %nick, "Nick change requested");
        Ok(())
    }
}
