//! lanchat - console client
//!
//! Reads lines from stdin, routes them through the command layer and logs
//! the events a network transport would deliver.

use lanchat::config::Config;
use lanchat::handlers::{CommandParser, ParserParams};
use lanchat::input::InputRouter;
use lanchat::network::{LocalSession, LocalSessionParams, NetworkEvent};
use lanchat::session::{ChatView, SessionDirectory, SystemLog};
use lanchat::state::User;
use lanchat::transfer::TransferRegistry;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// System messages go to stdout, prefixed like the chat does.
struct ConsoleLog;

impl SystemLog for ConsoleLog {
    fn show_system_message(&self, message: &str) {
        for line in message.lines() {
            println!("*** {line}");
        }
    }
}

struct ConsoleView {
    session: Arc<LocalSession>,
    quit: watch::Sender<bool>,
}

impl ChatView for ConsoleView {
    fn show_topic(&self) {
        let title = self
            .session
            .topic()
            .filter(|t| !t.is_removal())
            .map(|t| format!("{} - {}", self.session.current_user().nick(), t.text))
            .unwrap_or_else(|| self.session.current_user().nick());
        println!("== {title} ==");
    }

    fn clear_chat(&self) {
        // ANSI clear screen, cursor home
        print!("\x1b[2J\x1b[H");
    }

    fn request_quit(&self) {
        self.quit.send_replace(true);
    }
}

/// Stand-in for the LAN transport: logs what would go on the wire.
async fn run_transport(mut events: mpsc::UnboundedReceiver<NetworkEvent>) {
    while let Some(event) = events.recv().await {
        info!(kind = event.kind(), ?event, "Outgoing");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "lanchat.toml".to_string());
    let config = Config::load_or_default(&config_path)?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let code = config.user.code.unwrap_or_else(rand::random);
    let me = Arc::new(User::new(config.user.nick.clone(), code));
    info!(nick = %config.user.nick, code, config = %config_path, "Starting lanchat");

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let transport = tokio::spawn(run_transport(event_rx));

    let transfers = Arc::new(TransferRegistry::new());
    let session = Arc::new(LocalSession::new(LocalSessionParams {
        me,
        chat: config.chat.clone(),
        download_dir: config.user.download_path(),
        transfers: transfers.clone(),
        events: event_tx,
    }));

    let (quit_tx, mut quit_rx) = watch::channel(false);
    let log: Arc<dyn SystemLog> = Arc::new(ConsoleLog);
    let view = Arc::new(ConsoleView {
        session: session.clone(),
        quit: quit_tx,
    });

    let parser = CommandParser::new(ParserParams {
        directory: session.clone(),
        session: session.clone(),
        log: log.clone(),
        view,
        transfers,
        settings: config.transfers.clone(),
    });
    let router = InputRouter::new(parser, session.clone(), log.clone());

    log.show_system_message("Welcome to LanChat! Type /help for a list of commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    router.route(&line);
                }
                None => break,
            },
            _ = quit_rx.changed() => break,
        }
    }

    for (command, count) in router.parser().command_stats() {
        info!(command, count, "Command usage");
    }

    // Dropping the session closes the event queue and lets the transport drain.
    drop(router);
    drop(session);
    if let Err(e) = transport.await {
        warn!(error = %e, "Transport task failed");
    }

    info!("Bye");
    Ok(())
}
