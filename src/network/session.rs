//! In-process session state backed by an event queue.
//!
//! `LocalSession` owns the user list and topic board, validates what the
//! local user asks for, applies it locally and queues a [`NetworkEvent`]
//! for the transport. Remote activity comes back in through the `peer_*`
//! and `*_received` methods.

use super::NetworkEvent;
use crate::config::ChatConfig;
use crate::error::{CommandError, CommandResult};
use crate::session::{SessionDirectory, SessionFacade};
use crate::state::{DashMapExt, Topic, TopicBoard, UserCode, UserRef, is_valid_nick};
use crate::transfer::{
    FileTransfer, InboundTransfer, OutboundTransfer, Transfer, TransferId, TransferRegistry,
    TransferState,
};
use chrono::Local;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Parameters for creating a new `LocalSession`.
pub struct LocalSessionParams {
    pub me: UserRef,
    pub chat: ChatConfig,
    pub download_dir: PathBuf,
    pub transfers: Arc<TransferRegistry>,
    pub events: mpsc::UnboundedSender<NetworkEvent>,
}

pub struct LocalSession {
    me: UserRef,
    users: DashMap<UserCode, UserRef>,
    topic: RwLock<TopicBoard>,
    limits: ChatConfig,
    download_dir: PathBuf,
    transfers: Arc<TransferRegistry>,
    next_transfer_id: AtomicI32,
    events: mpsc::UnboundedSender<NetworkEvent>,
}

impl LocalSession {
    pub fn new(params: LocalSessionParams) -> Self {
        let users = DashMap::new();
        users.insert(params.me.code(), params.me.clone());

        Self {
            me: params.me,
            users,
            topic: RwLock::new(TopicBoard::new(params.chat.topic_history)),
            limits: params.chat,
            download_dir: params.download_dir,
            transfers: params.transfers,
            next_transfer_id: AtomicI32::new(1),
            events: params.events,
        }
    }

    fn emit(&self, event: NetworkEvent) {
        let kind = event.kind();
        if self.events.send(event).is_err() {
            warn!(kind, "Transport is gone, event dropped");
        } else {
            debug!(kind, "Event queued");
        }
    }

    /// A peer showed up, or announced itself again.
    pub fn peer_joined(&self, user: UserRef) {
        info!(nick = %user.nick(), code = user.code(), "User joined");
        self.users.insert(user.code(), user);
    }

    /// A peer left. Returns the user if it was known.
    pub fn peer_left(&self, code: UserCode) -> Option<UserRef> {
        let (_, user) = self.users.remove(&code)?;
        info!(nick = %user.nick(), code, "User left");
        Some(user)
    }

    /// A peer offered us a file. The download target is inside the
    /// configured download directory, whatever path the peer sent.
    pub fn offer_received(
        &self,
        from: &UserRef,
        id: TransferId,
        file_name: &str,
        size: u64,
    ) -> Arc<InboundTransfer> {
        let name = Path::new(file_name)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "unnamed".into());
        let transfer = Arc::new(InboundTransfer::new(
            id,
            from.clone(),
            self.download_dir.join(name),
            size,
        ));

        info!(nick = %from.nick(), id, file = %transfer.file_name(), size, "File offered to us");
        self.transfers.add_inbound(transfer.clone());
        transfer
    }

    /// The transport moved every byte of `transfer`. Marks it completed
    /// and drops it from the registry.
    pub fn transfer_finished(&self, transfer: &Transfer) {
        if transfer.state() == TransferState::Accepted
            && let Err(e) = transfer.as_file_transfer().complete()
        {
            warn!(id = transfer.id(), error = %e, "Could not complete transfer");
        }
        self.retire(transfer);
    }

    /// The transfer broke off or the peer withdrew it. Marks it cancelled
    /// unless it already ended, and drops it from the registry.
    pub fn transfer_aborted(&self, transfer: &Transfer) {
        if !transfer.state().is_terminal()
            && let Err(e) = transfer.as_file_transfer().cancel()
        {
            warn!(id = transfer.id(), error = %e, "Could not cancel transfer");
        }
        self.retire(transfer);
    }

    fn retire(&self, transfer: &Transfer) {
        if self.transfers.remove(transfer) {
            info!(
                nick = %transfer.user().nick(),
                id = transfer.id(),
                state = transfer.state().as_str(),
                "Transfer retired"
            );
        }
    }

    /// A peer changed the topic.
    pub fn topic_received(&self, text: &str, author: &str) -> bool {
        let changed = self
            .topic
            .write()
            .change(Topic::new(text, author, Local::now()));
        if changed {
            info!(author = %author, "Topic changed by peer");
        }
        changed
    }

    /// Topics replaced so far, oldest first.
    pub fn topic_history(&self) -> Vec<Topic> {
        self.topic.read().history().cloned().collect()
    }
}

impl SessionDirectory for LocalSession {
    fn lookup_user(&self, nick: &str) -> Option<UserRef> {
        self.users
            .values_cloned()
            .into_iter()
            .find(|user| user.nick() == nick)
    }

    fn current_user(&self) -> UserRef {
        self.me.clone()
    }

    fn users(&self) -> Vec<UserRef> {
        self.users.values_cloned()
    }

    fn topic(&self) -> Option<Topic> {
        self.topic.read().current().cloned()
    }
}

impl SessionFacade for LocalSession {
    fn go_away(&self, message: &str) -> CommandResult {
        if self.me.is_away() {
            return Err(CommandError::new("You are already away"));
        }
        if message.chars().count() > self.limits.max_away_length {
            return Err(CommandError::new(format!(
                "The away message can not be longer than {} characters",
                self.limits.max_away_length
            )));
        }

        self.me.set_away(Some(message.to_string()));
        info!(message = %message, "Went away");
        self.emit(NetworkEvent::Away {
            message: message.to_string(),
        });
        Ok(())
    }

    fn come_back(&self) -> CommandResult {
        if !self.me.is_away() {
            return Err(CommandError::new("You are not away"));
        }

        self.me.set_away(None);
        info!("Came back");
        self.emit(NetworkEvent::Back);
        Ok(())
    }

    fn change_topic(&self, text: &str) -> CommandResult {
        if text.chars().count() > self.limits.max_topic_length {
            return Err(CommandError::new(format!(
                "The topic can not be longer than {} characters",
                self.limits.max_topic_length
            )));
        }

        let topic = Topic::new(text, self.me.nick(), Local::now());
        if self.topic.write().change(topic) {
            info!(topic = %text, "Topic changed");
            self.emit(NetworkEvent::Topic {
                text: text.to_string(),
            });
        }
        Ok(())
    }

    fn notify_transfer_abort(&self, user: &UserRef, id: TransferId, file_name: &str) {
        self.emit(NetworkEvent::TransferAborted {
            to: user.code(),
            id,
            file_name: file_name.to_string(),
        });
    }

    fn change_nick(&self, nick: &str) -> CommandResult {
        if !is_valid_nick(nick) {
            return Err(CommandError::new(format!("'{nick}' is not a valid nick name")));
        }
        if let Some(other) = self.lookup_user(nick)
            && !other.is_same(&self.me)
        {
            return Err(CommandError::new(format!(
                "The nick name '{nick}' is in use by someone else"
            )));
        }

        let old = self.me.nick();
        self.me.set_nick(nick);
        info!(old = %old, new = %nick, "Nick changed");
        self.emit(NetworkEvent::NickChanged {
            nick: nick.to_string(),
        });
        Ok(())
    }

    fn send_private_message(&self, user: &UserRef, text: &str) -> CommandResult {
        if !self.users.contains_key(&user.code()) {
            return Err(CommandError::new(format!("{} is not online", user.nick())));
        }

        self.emit(NetworkEvent::PrivateMessage {
            to: user.code(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn send_file(&self, user: &UserRef, file: &Path) -> CommandResult {
        let size = std::fs::metadata(file)
            .map_err(|e| CommandError::new(format!("Could not read '{}': {e}", file.display())))?
            .len();

        let id = self.next_transfer_id.fetch_add(1, Ordering::Relaxed);
        let transfer = Arc::new(OutboundTransfer::new(id, user.clone(), file, size));
        let file_name = transfer.file_name();
        self.transfers.add_outbound(transfer);

        self.emit(NetworkEvent::FileOffered {
            to: user.code(),
            id,
            file_name,
            size,
        });
        Ok(())
    }

    fn send_chat_message(&self, text: &str) -> CommandResult {
        if text.trim().is_empty() {
            return Err(CommandError::new("Nothing to send"));
        }

        self.emit(NetworkEvent::Chat {
            text: text.to_string(),
        });
        Ok(())
    }
}
