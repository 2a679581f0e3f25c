//! File transfer handlers: RECEIVE, REJECT, CANCEL, SEND, TRANSFERS
//!
//! Each handler validates in the same order: arity, user, not self, id,
//! record. The record is then locked for the whole check-then-transition.

use super::helpers::{first_and_rest, nick_and_id, parse_transfer_id, resolve_peer};
use super::{Context, Handler, HandlerError, HandlerResult};
use crate::transfer::{
    Direction, FileTransfer, InboundTransfer, Transfer, TransferState, unique_file_name,
};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Resolve `<nick> <id>` to a live inbound offer.
fn inbound_offer(
    ctx: &Context<'_>,
    args: &str,
) -> Result<(String, Arc<InboundTransfer>), HandlerError> {
    let (nick, raw_id) = nick_and_id(args)?;
    let user = resolve_peer(ctx, nick)?;
    let id = parse_transfer_id(raw_id)?;

    let transfer = ctx
        .transfers
        .get_inbound(&user, id)
        .ok_or_else(|| HandlerError::NoOfferedFile {
            id,
            nick: nick.to_string(),
        })?;

    Ok((nick.to_string(), transfer))
}

/// Handler for the `/reject <nick> <id>` command.
pub struct RejectHandler;

impl Handler for RejectHandler {
    fn handle(&self, ctx: &Context<'_>, args: &str) -> HandlerResult {
        let (nick, transfer) = inbound_offer(ctx, args)?;
        let mut guard = transfer.lock();

        if guard.is_accepted() {
            return Err(HandlerError::AlreadyReceiving {
                file: guard.file_name(),
                nick,
            });
        }
        if guard.state().is_terminal() {
            return Err(HandlerError::NoOfferedFile {
                id: transfer.id(),
                nick,
            });
        }

        guard.reject()?;
        info!(nick = %nick, id = transfer.id(), file = %guard.file_name(), "Rejected file");
        Ok(())
    }
}

/// Handler for the `/receive <nick> <id>` command.
///
/// If the target file already exists the download is redirected to the
/// first free `<name>_<n>.<ext>` before accepting.
pub struct ReceiveHandler;

impl Handler for ReceiveHandler {
    fn handle(&self, ctx: &Context<'_>, args: &str) -> HandlerResult {
        let (nick, transfer) = inbound_offer(ctx, args)?;
        let mut guard = transfer.lock();

        if guard.is_accepted() {
            return Err(HandlerError::AlreadyReceiving {
                file: guard.file_name(),
                nick,
            });
        }
        if guard.state().is_terminal() {
            return Err(HandlerError::NoOfferedFile {
                id: transfer.id(),
                nick,
            });
        }

        if guard.file().exists() {
            let existing = guard.file_name();
            let renamed = unique_file_name(guard.file(), ctx.settings.max_rename_attempts)
                .ok_or_else(|| HandlerError::NoFreeFileName(existing.clone()))?;
            let renamed_name = renamed
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            ctx.system_message(format!(
                "/receive - file '{existing}' already exists - renaming to '{renamed_name}'"
            ));
            guard.set_file(renamed);
        }

        guard.accept()?;
        info!(
            nick = %nick,
            id = transfer.id(),
            file = %guard.file().display(),
            "Accepted file"
        );
        Ok(())
    }
}

/// Handler for the `/cancel <nick> <id>` command.
///
/// Works on either direction. An outbound offer nobody accepted yet is also
/// dropped from the registry and the peer is told it was withdrawn.
pub struct CancelHandler;

impl Handler for CancelHandler {
    fn handle(&self, ctx: &Context<'_>, args: &str) -> HandlerResult {
        let (nick, raw_id) = nick_and_id(args)?;
        let user = resolve_peer(ctx, nick)?;
        let id = parse_transfer_id(raw_id)?;

        let no_transfer = || HandlerError::NoTransfer {
            id,
            nick: nick.to_string(),
        };
        let transfer = ctx.transfers.get(&user, id).ok_or_else(no_transfer)?;

        match &transfer {
            Transfer::Inbound(inbound) => {
                let mut guard = inbound.lock();
                if guard.state().is_terminal() {
                    return Err(no_transfer());
                }
                if !guard.is_accepted() {
                    return Err(HandlerError::NotStarted {
                        file: guard.file_name(),
                        nick: nick.to_string(),
                    });
                }
                guard.cancel()?;
                info!(nick = %nick, id, "Cancelled receiving file");
            }
            Transfer::Outbound(outbound) => {
                let mut guard = outbound.lock();
                if guard.state().is_terminal() {
                    return Err(no_transfer());
                }
                let waiting = guard.is_waiting();
                let file_name = guard.file_name();
                guard.cancel()?;
                info!(nick = %nick, id, waiting, "Cancelled sending file");

                if waiting {
                    ctx.transfers.remove(&transfer);
                    ctx.session
                        .notify_transfer_abort(outbound.user(), id, &file_name);
                    ctx.system_message(format!(
                        "You cancelled sending of {file_name} to {nick}"
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Handler for the `/send <nick> <file>` command.
///
/// The file path is free text and may contain spaces.
pub struct SendHandler;

impl Handler for SendHandler {
    fn handle(&self, ctx: &Context<'_>, args: &str) -> HandlerResult {
        let (nick, path) = first_and_rest(args)
            .filter(|(_, path)| !path.is_empty())
            .ok_or(HandlerError::MissingArguments("<nick> <file>"))?;
        let user = resolve_peer(ctx, nick)?;

        let file = Path::new(path);
        if !file.is_file() {
            return Err(HandlerError::NoSuchFile(path.to_string()));
        }

        ctx.session.send_file(&user, file)?;
        info!(nick = %nick, file = %file.display(), "Offered file");
        Ok(())
    }
}

/// Handler for the `/transfers` command.
pub struct TransfersHandler;

impl Handler for TransfersHandler {
    fn handle(&self, ctx: &Context<'_>, _args: &str) -> HandlerResult {
        let transfers = ctx.transfers.all();
        if transfers.is_empty() {
            ctx.system_message("No file transfers");
            return Ok(());
        }

        let mut lines = vec!["File transfers:".to_string()];
        lines.extend(transfers.iter().map(describe));
        ctx.system_message(lines.join("\n"));
        Ok(())
    }
}

/// `Sending doc.pdf to SomeOne [id 1]: waiting (0%)`
fn describe(transfer: &Transfer) -> String {
    let (verb, preposition) = match transfer.direction() {
        Direction::Outbound => ("Sending", "to"),
        Direction::Inbound => ("Receiving", "from"),
    };
    let state = match (transfer.direction(), transfer.state()) {
        (Direction::Outbound, TransferState::Offered) => "waiting",
        (_, state) => state.as_str(),
    };

    format!(
        "{verb} {} {preposition} {} [id {}]: {state} ({}%)",
        transfer.file_name(),
        transfer.user().nick(),
        transfer.id(),
        transfer.percent_done()
    )
}
