//! Routing of typed input lines.
//!
//! `/known-command` lines go to the [`CommandParser`]. Everything else,
//! including `/words` that are not commands, is sent as a chat message.
//! `//text` sends `/text` literally.

use crate::handlers::CommandParser;
use crate::session::{SessionFacade, SystemLog};
use std::sync::Arc;
use tracing::debug;

/// Where a line ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Command,
    Chat,
    Ignored,
}

pub struct InputRouter {
    parser: CommandParser,
    session: Arc<dyn SessionFacade>,
    log: Arc<dyn SystemLog>,
}

impl InputRouter {
    pub fn new(
        parser: CommandParser,
        session: Arc<dyn SessionFacade>,
        log: Arc<dyn SystemLog>,
    ) -> Self {
        Self {
            parser,
            session,
            log,
        }
    }

    pub fn parser(&self) -> &CommandParser {
        &self.parser
    }

    pub fn route(&self, line: &str) -> Route {
        if line.trim().is_empty() {
            return Route::Ignored;
        }

        if let Some(escaped) = line.strip_prefix("//") {
            self.chat(&format!("/{escaped}"));
            return Route::Chat;
        }

        if line.starts_with('/') && self.parser.is_command(line) {
            self.parser.parse(line);
            return Route::Command;
        }

        self.chat(line);
        Route::Chat
    }

    fn chat(&self, text: &str) {
        if let Err(e) = self.session.send_chat_message(text) {
            debug!(error = %e, "Chat message refused");
            self.log.show_system_message(e.message());
        }
    }
}
