//! The command dispatcher.
//!
//! `CommandParser::parse` takes one full `/command args` line, runs it to
//! completion and turns any failure into exactly one system message. It never
//! returns an error to the caller.

use super::context::{Context, HandlerError};
use super::registry::Registry;
use crate::config::TransferConfig;
use crate::handlers::topic;
use crate::session::{ChatView, SessionDirectory, SessionFacade, SystemLog};
use crate::transfer::TransferRegistry;
use std::sync::Arc;
use tracing::warn;

/// Collaborators handed to [`CommandParser::new`].
pub struct ParserParams {
    pub directory: Arc<dyn SessionDirectory>,
    pub session: Arc<dyn SessionFacade>,
    pub log: Arc<dyn SystemLog>,
    pub view: Arc<dyn ChatView>,
    pub transfers: Arc<TransferRegistry>,
    pub settings: TransferConfig,
}

pub struct CommandParser {
    directory: Arc<dyn SessionDirectory>,
    session: Arc<dyn SessionFacade>,
    log: Arc<dyn SystemLog>,
    view: Arc<dyn ChatView>,
    transfers: Arc<TransferRegistry>,
    settings: TransferConfig,
    registry: Registry,
}

impl CommandParser {
    pub fn new(params: ParserParams) -> Self {
        Self {
            directory: params.directory,
            session: params.session,
            log: params.log,
            view: params.view,
            transfers: params.transfers,
            settings: params.settings,
            registry: Registry::new(),
        }
    }

    fn context(&self) -> Context<'_> {
        Context {
            directory: self.directory.as_ref(),
            session: self.session.as_ref(),
            log: self.log.as_ref(),
            view: self.view.as_ref(),
            transfers: &self.transfers,
            settings: &self.settings,
        }
    }

    /// Run one command line, e.g. `/receive SomeOne 1`.
    pub fn parse(&self, line: &str) {
        let (command, args) = split_command(line);
        let ctx = self.context();

        if let Err(e) = self.registry.dispatch(&ctx, command, args) {
            report(&ctx, command, &e);
        }
    }

    /// Apply `raw` as the new topic, unless it matches the current one once
    /// both are trimmed.
    pub fn fix_topic(&self, raw: &str) {
        let ctx = self.context();

        if let Err(e) = topic::fix_topic(&ctx, raw) {
            report(&ctx, "topic", &e);
        }
    }

    /// Whether the command token of `line` names a registered command.
    pub fn is_command(&self, line: &str) -> bool {
        self.registry.contains(split_command(line).0)
    }

    /// Usage counts of commands run so far.
    pub fn command_stats(&self) -> Vec<(&'static str, u64)> {
        self.registry.get_command_stats()
    }
}

/// Split `/cmd args` on the first whitespace. `args` keeps its leading whitespace.
fn split_command(line: &str) -> (&str, &str) {
    let line = line.strip_prefix('/').unwrap_or(line);
    match line.find(char::is_whitespace) {
        Some(pos) => line.split_at(pos),
        None => (line, ""),
    }
}

fn report(ctx: &Context<'_>, command: &str, error: &HandlerError) {
    match error.to_system_message(command) {
        Some(message) => ctx.system_message(message),
        None => warn!(command = %command, error = %error, "Command aborted"),
    }
}
