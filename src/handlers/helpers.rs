//! Argument parsing and lookup helpers shared by the handlers.

use super::{Context, HandlerError};
use crate::state::UserRef;
use crate::transfer::TransferId;

/// Split `<nick> <id>`. Any other token count is an arity error.
pub fn nick_and_id(args: &str) -> Result<(&str, &str), HandlerError> {
    let mut tokens = args.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(nick), Some(id), None) => Ok((nick, id)),
        _ => Err(HandlerError::WrongArgumentCount("<nick> <id>")),
    }
}

/// Split the first token from free text: `<nick> <text...>`.
///
/// Returns `None` when `args` is blank. The rest is trimmed and may be empty.
pub fn first_and_rest(args: &str) -> Option<(&str, &str)> {
    let args = args.trim();
    if args.is_empty() {
        return None;
    }
    match args.find(char::is_whitespace) {
        Some(pos) => Some((&args[..pos], args[pos..].trim())),
        None => Some((args, "")),
    }
}

/// Resolve `nick` to a user other than ourselves.
pub fn resolve_peer(ctx: &Context<'_>, nick: &str) -> Result<UserRef, HandlerError> {
    let user = ctx
        .directory
        .lookup_user(nick)
        .ok_or_else(|| HandlerError::NoSuchUser(nick.to_string()))?;

    if user.is_same(&ctx.directory.current_user()) {
        return Err(HandlerError::SelfTarget);
    }

    Ok(user)
}

pub fn parse_transfer_id(raw: &str) -> Result<TransferId, HandlerError> {
    raw.parse()
        .map_err(|_| HandlerError::InvalidTransferId(raw.to_string()))
}
