//! Transfer registry.
//!
//! Index of live transfers keyed by (remote user, transfer id). Records are
//! shared with the transport, which creates them and decides when they end;
//! the registry only forgets a record when told to.

use super::record::{FileTransfer, InboundTransfer, OutboundTransfer, Transfer, TransferId};
use crate::state::{DashMapExt, User, UserCode};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry key. Ids are only unique per remote user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransferKey {
    pub user: UserCode,
    pub id: TransferId,
}

impl TransferKey {
    pub fn new(user: &User, id: TransferId) -> Self {
        Self {
            user: user.code(),
            id,
        }
    }

    fn of<T: FileTransfer + ?Sized>(transfer: &T) -> Self {
        Self::new(transfer.user(), transfer.id())
    }
}

#[derive(Debug, Default)]
pub struct TransferRegistry {
    inbound: DashMap<TransferKey, Arc<InboundTransfer>>,
    outbound: DashMap<TransferKey, Arc<OutboundTransfer>>,
}

impl TransferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_inbound(&self, transfer: Arc<InboundTransfer>) {
        let key = TransferKey::of(&*transfer);
        if self.inbound.insert(key, transfer).is_some() {
            warn!(user = key.user, id = key.id, "Replaced existing inbound transfer");
        }
        debug!(user = key.user, id = key.id, "Inbound transfer registered");
    }

    pub fn add_outbound(&self, transfer: Arc<OutboundTransfer>) {
        let key = TransferKey::of(&*transfer);
        if self.outbound.insert(key, transfer).is_some() {
            warn!(user = key.user, id = key.id, "Replaced existing outbound transfer");
        }
        debug!(user = key.user, id = key.id, "Outbound transfer registered");
    }

    /// A file offered to us by `user`.
    pub fn get_inbound(&self, user: &User, id: TransferId) -> Option<Arc<InboundTransfer>> {
        self.inbound.get_cloned(&TransferKey::new(user, id))
    }

    /// A file we offered to `user`.
    pub fn get_outbound(&self, user: &User, id: TransferId) -> Option<Arc<OutboundTransfer>> {
        self.outbound.get_cloned(&TransferKey::new(user, id))
    }

    /// A transfer in either direction. When both share the id, a live
    /// outbound record wins; a finished one yields to the inbound record.
    pub fn get(&self, user: &User, id: TransferId) -> Option<Transfer> {
        match self.get_outbound(user, id) {
            Some(live) if !live.state().is_terminal() => Some(Transfer::Outbound(live)),
            finished => self
                .get_inbound(user, id)
                .map(Transfer::Inbound)
                .or_else(|| finished.map(Transfer::Outbound)),
        }
    }

    /// Forget `transfer`. A different record registered under the same key is
    /// left alone. Returns whether anything was removed.
    pub fn remove(&self, transfer: &Transfer) -> bool {
        let removed = match transfer {
            Transfer::Inbound(t) => {
                let key = TransferKey::of(&**t);
                self.inbound
                    .remove_if(&key, |_, existing| Arc::ptr_eq(existing, t))
                    .is_some()
            }
            Transfer::Outbound(t) => {
                let key = TransferKey::of(&**t);
                self.outbound
                    .remove_if(&key, |_, existing| Arc::ptr_eq(existing, t))
                    .is_some()
            }
        };
        if removed {
            debug!(id = transfer.id(), direction = ?transfer.direction(), "Transfer removed");
        }
        removed
    }

    /// Snapshot of every transfer, outbound first, each group ordered by user then id.
    pub fn all(&self) -> Vec<Transfer> {
        let mut outbound = self.outbound.values_cloned();
        outbound.sort_by_key(|t| TransferKey::of(&**t).sort_key());
        let mut inbound = self.inbound.values_cloned();
        inbound.sort_by_key(|t| TransferKey::of(&**t).sort_key());

        outbound
            .into_iter()
            .map(Transfer::Outbound)
            .chain(inbound.into_iter().map(Transfer::Inbound))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inbound.len() + self.outbound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransferKey {
    fn sort_key(self) -> (UserCode, TransferId) {
        (self.user, self.id)
    }
}
