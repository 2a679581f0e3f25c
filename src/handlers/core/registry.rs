//! Command handler registry and dispatch.
//!
//! The `Registry` maps command tokens to handlers and keeps usage counters.

use super::context::{Context, Handler, HandlerError, HandlerResult};
use crate::handlers::{
    messaging::MsgHandler,
    misc::{AboutHandler, ClearHandler, HelpHandler, QuitHandler},
    topic::TopicHandler,
    transfer::{CancelHandler, ReceiveHandler, RejectHandler, SendHandler, TransfersHandler},
    user_query::{UsersHandler, WhoisHandler},
    user_status::{AwayHandler, BackHandler, NickHandler},
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Level, debug, span};

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
    /// Command usage counters
    command_counts: HashMap<&'static str, AtomicU64>,
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        // File transfer handlers
        handlers.insert("reject", Box::new(RejectHandler));
        handlers.insert("receive", Box::new(ReceiveHandler));
        handlers.insert("cancel", Box::new(CancelHandler));
        handlers.insert("send", Box::new(SendHandler));
        handlers.insert("transfers", Box::new(TransfersHandler));

        // Status handlers
        handlers.insert("away", Box::new(AwayHandler));
        handlers.insert("back", Box::new(BackHandler));
        handlers.insert("nick", Box::new(NickHandler));

        // Topic
        handlers.insert("topic", Box::new(TopicHandler));

        // Messaging and user queries
        handlers.insert("msg", Box::new(MsgHandler));
        handlers.insert("users", Box::new(UsersHandler));
        handlers.insert("whois", Box::new(WhoisHandler));

        // Client handlers
        handlers.insert("clear", Box::new(ClearHandler));
        handlers.insert("about", Box::new(AboutHandler));
        handlers.insert("help", Box::new(HelpHandler));
        handlers.insert("quit", Box::new(QuitHandler));

        // Initialize command counters for all registered commands
        let command_counts = handlers
            .keys()
            .map(|&cmd| (cmd, AtomicU64::new(0)))
            .collect();

        Self {
            handlers,
            command_counts,
        }
    }

    /// Whether `name` (without the leading slash) is a registered command.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Get command usage statistics, most used first.
    pub fn get_command_stats(&self) -> Vec<(&'static str, u64)> {
        let mut stats: Vec<_> = self
            .command_counts
            .iter()
            .map(|(cmd, count)| (*cmd, count.load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0) // Only include used commands
            .collect();

        // Sort by usage count (descending), then name for a stable order
        stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        stats
    }

    /// Dispatch `args` to the handler for `name`.
    ///
    /// Command tokens are case-sensitive.
    pub fn dispatch(&self, ctx: &Context<'_>, name: &str, args: &str) -> HandlerResult {
        let Some(handler) = self.handlers.get(name) else {
            debug!(command = %name, "Unknown command");
            return Err(HandlerError::UnknownCommand);
        };

        if let Some(counter) = self.command_counts.get(name) {
            counter.fetch_add(1, Ordering::Relaxed);
        }

        let command_span = span!(Level::DEBUG, "command", name = %name);
        let _enter = command_span.enter();

        let result = handler.handle(ctx, args);

        if let Err(ref e) = result {
            debug!(command = %name, code = e.error_code(), error = %e, "Command error");
        }

        result
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
