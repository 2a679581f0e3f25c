//! Transfer records.
//!
//! Inbound and outbound transfers share identity, file and cancel semantics
//! ([`FileTransfer`]) but differ in which transitions a caller may request, so
//! each variant hands out its own guard type. A guard holds the record's mutex
//! for a whole check-then-transition, which serializes a local command against
//! the transport acting on the same record.

use super::state::{TransferAction, TransferState};
use crate::error::TransferError;
use crate::state::UserRef;
use parking_lot::{Mutex, MutexGuard};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Transfer identifier, unique only per remote user.
pub type TransferId = i32;

/// Which way the bytes flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Inbound,
    Outbound,
}

#[derive(Debug)]
struct Slot {
    file: PathBuf,
    state: TransferState,
    transferred: u64,
}

/// State shared by both transfer variants.
#[derive(Debug)]
pub struct TransferCore {
    id: TransferId,
    user: UserRef,
    size: u64,
    slot: Mutex<Slot>,
    events: watch::Sender<TransferState>,
}

impl TransferCore {
    fn new(id: TransferId, user: UserRef, file: PathBuf, size: u64) -> Self {
        let (events, _) = watch::channel(TransferState::Offered);
        Self {
            id,
            user,
            size,
            slot: Mutex::new(Slot {
                file,
                state: TransferState::Offered,
                transferred: 0,
            }),
            events,
        }
    }

    fn lock(&self) -> TransferGuard<'_> {
        TransferGuard {
            core: self,
            slot: self.slot.lock(),
        }
    }
}

/// Exclusive access to one record.
struct TransferGuard<'a> {
    core: &'a TransferCore,
    slot: MutexGuard<'a, Slot>,
}

impl TransferGuard<'_> {
    fn apply(&mut self, action: TransferAction) -> Result<(), TransferError> {
        let from = self.slot.state;
        let to = from.apply(action)?;
        self.slot.state = to;
        if to == TransferState::Completed {
            self.slot.transferred = self.core.size;
        }
        self.core.events.send_replace(to);

        debug!(
            id = self.core.id,
            nick = %self.core.user.nick(),
            %from,
            %to,
            "Transfer state changed"
        );
        Ok(())
    }
}

/// Capabilities common to every transfer.
pub trait FileTransfer {
    fn core(&self) -> &TransferCore;

    fn direction(&self) -> Direction;

    fn id(&self) -> TransferId {
        self.core().id
    }

    /// The remote user.
    fn user(&self) -> &UserRef {
        &self.core().user
    }

    fn size(&self) -> u64 {
        self.core().size
    }

    fn state(&self) -> TransferState {
        self.core().slot.lock().state
    }

    fn file(&self) -> PathBuf {
        self.core().slot.lock().file.clone()
    }

    /// The last path component of the target file.
    fn file_name(&self) -> String {
        file_name_of(&self.core().slot.lock().file)
    }

    fn transferred(&self) -> u64 {
        self.core().slot.lock().transferred
    }

    /// Progress in whole percent. An empty file counts as done once completed.
    fn percent_done(&self) -> u8 {
        let slot = self.core().slot.lock();
        let size = self.core().size;
        if size == 0 {
            return if slot.state == TransferState::Completed { 100 } else { 0 };
        }
        (slot.transferred.saturating_mul(100) / size).min(100) as u8
    }

    /// Record bytes moved so far. Called by the transport.
    fn record_progress(&self, transferred: u64) {
        let mut slot = self.core().slot.lock();
        slot.transferred = transferred.min(self.core().size);
    }

    /// Watch every state change of this record.
    fn subscribe(&self) -> watch::Receiver<TransferState> {
        self.core().events.subscribe()
    }

    fn cancel(&self) -> Result<(), TransferError> {
        self.core().lock().apply(TransferAction::Cancel)
    }

    /// Mark the transfer finished. Called by the transport.
    fn complete(&self) -> Result<(), TransferError> {
        self.core().lock().apply(TransferAction::Complete)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ============================================================================
// Inbound
// ============================================================================

/// A file offered to us by a remote user.
#[derive(Debug)]
pub struct InboundTransfer {
    core: TransferCore,
}

impl InboundTransfer {
    /// `file` is where the download will be written if accepted.
    pub fn new(id: TransferId, user: UserRef, file: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            core: TransferCore::new(id, user, file.into(), size),
        }
    }

    pub fn lock(&self) -> InboundGuard<'_> {
        InboundGuard(self.core.lock())
    }
}

impl FileTransfer for InboundTransfer {
    fn core(&self) -> &TransferCore {
        &self.core
    }

    fn direction(&self) -> Direction {
        Direction::Inbound
    }
}

/// Exclusive access to an inbound record.
pub struct InboundGuard<'a>(TransferGuard<'a>);

impl InboundGuard<'_> {
    pub fn state(&self) -> TransferState {
        self.0.slot.state
    }

    pub fn is_accepted(&self) -> bool {
        self.0.slot.state == TransferState::Accepted
    }

    pub fn file(&self) -> &Path {
        &self.0.slot.file
    }

    pub fn file_name(&self) -> String {
        file_name_of(&self.0.slot.file)
    }

    /// Point the download at a different path. Only meaningful before accepting.
    pub fn set_file(&mut self, file: PathBuf) {
        self.0.slot.file = file;
    }

    pub fn accept(&mut self) -> Result<(), TransferError> {
        self.0.apply(TransferAction::Accept)
    }

    pub fn reject(&mut self) -> Result<(), TransferError> {
        self.0.apply(TransferAction::Reject)
    }

    pub fn cancel(&mut self) -> Result<(), TransferError> {
        self.0.apply(TransferAction::Cancel)
    }
}

// ============================================================================
// Outbound
// ============================================================================

/// A file we offered to a remote user.
#[derive(Debug)]
pub struct OutboundTransfer {
    core: TransferCore,
}

impl OutboundTransfer {
    pub fn new(id: TransferId, user: UserRef, file: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            core: TransferCore::new(id, user, file.into(), size),
        }
    }

    pub fn lock(&self) -> OutboundGuard<'_> {
        OutboundGuard(self.core.lock())
    }

    /// No peer has accepted yet and no bytes have been sent.
    pub fn is_waiting(&self) -> bool {
        self.state() == TransferState::Offered
    }
}

impl FileTransfer for OutboundTransfer {
    fn core(&self) -> &TransferCore {
        &self.core
    }

    fn direction(&self) -> Direction {
        Direction::Outbound
    }
}

/// Exclusive access to an outbound record.
pub struct OutboundGuard<'a>(TransferGuard<'a>);

impl OutboundGuard<'_> {
    pub fn state(&self) -> TransferState {
        self.0.slot.state
    }

    pub fn is_waiting(&self) -> bool {
        self.0.slot.state == TransferState::Offered
    }

    pub fn file(&self) -> &Path {
        &self.0.slot.file
    }

    pub fn file_name(&self) -> String {
        file_name_of(&self.0.slot.file)
    }

    /// The peer accepted the offer.
    pub fn accept(&mut self) -> Result<(), TransferError> {
        self.0.apply(TransferAction::Accept)
    }

    /// The peer declined the offer.
    pub fn reject(&mut self) -> Result<(), TransferError> {
        self.0.apply(TransferAction::Reject)
    }

    pub fn cancel(&mut self) -> Result<(), TransferError> {
        self.0.apply(TransferAction::Cancel)
    }
}

// ============================================================================
// Either variant
// ============================================================================

/// A transfer of either direction, as returned by registry lookups.
#[derive(Debug, Clone)]
pub enum Transfer {
    Inbound(Arc<InboundTransfer>),
    Outbound(Arc<OutboundTransfer>),
}

impl Transfer {
    pub fn as_file_transfer(&self) -> &dyn FileTransfer {
        match self {
            Self::Inbound(t) => &**t,
            Self::Outbound(t) => &**t,
        }
    }

    pub fn direction(&self) -> Direction {
        self.as_file_transfer().direction()
    }

    pub fn id(&self) -> TransferId {
        self.as_file_transfer().id()
    }

    pub fn user(&self) -> &UserRef {
        self.as_file_transfer().user()
    }

    pub fn state(&self) -> TransferState {
        self.as_file_transfer().state()
    }

    pub fn file_name(&self) -> String {
        self.as_file_transfer().file_name()
    }

    pub fn percent_done(&self) -> u8 {
        self.as_file_transfer().percent_done()
    }

    /// Whether both handles point at the same record.
    pub fn is_same(&self, other: &Transfer) -> bool {
        match (self, other) {
            (Self::Inbound(a), Self::Inbound(b)) => Arc::ptr_eq(a, b),
            (Self::Outbound(a), Self::Outbound(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Arc<InboundTransfer>> for Transfer {
    fn from(t: Arc<InboundTransfer>) -> Self {
        Self::Inbound(t)
    }
}

impl From<Arc<OutboundTransfer>> for Transfer {
    fn from(t: Arc<OutboundTransfer>) -> Self {
        Self::Outbound(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::User;

    fn someone() -> UserRef {
        Arc::new(User::new("SomeOne", 12345678))
    }

    #[test]
    fn test_inbound_accept_then_cancel() {
        let transfer = InboundTransfer::new(1, someone(), "/tmp/doc.pdf", 100);
        assert_eq!(transfer.file_name(), "doc.pdf");

        {
            let mut guard = transfer.lock();
            assert!(!guard.is_accepted());
            guard.accept().unwrap();
            assert!(guard.is_accepted());
        }

        transfer.cancel().unwrap();
        assert_eq!(transfer.state(), TransferState::Cancelled);
    }

    #[test]
    fn test_inbound_reject_after_accept_fails() {
        let transfer = InboundTransfer::new(1, someone(), "doc.pdf", 100);
        let mut guard = transfer.lock();
        guard.accept().unwrap();
        assert!(guard.reject().is_err());
        assert_eq!(guard.state(), TransferState::Accepted);
    }

    #[test]
    fn test_set_file_renames_target() {
        let transfer = InboundTransfer::new(1, someone(), "/tmp/doc.pdf", 100);
        transfer.lock().set_file(PathBuf::from("/tmp/doc_1.pdf"));
        assert_eq!(transfer.file(), PathBuf::from("/tmp/doc_1.pdf"));
        assert_eq!(transfer.file_name(), "doc_1.pdf");
    }

    #[test]
    fn test_outbound_waiting_until_accepted() {
        let transfer = OutboundTransfer::new(7, someone(), "doc.pdf", 10);
        assert!(transfer.is_waiting());
        transfer.lock().accept().unwrap();
        assert!(!transfer.is_waiting());
        transfer.complete().unwrap();
        assert_eq!(transfer.state(), TransferState::Completed);
        assert_eq!(transfer.percent_done(), 100);
    }

    #[test]
    fn test_progress_is_clamped() {
        let transfer = OutboundTransfer::new(7, someone(), "doc.pdf", 200);
        transfer.record_progress(50);
        assert_eq!(transfer.percent_done(), 25);
        transfer.record_progress(500);
        assert_eq!(transfer.transferred(), 200);
        assert_eq!(transfer.percent_done(), 100);
    }

    #[test]
    fn test_subscribers_see_transitions() {
        let transfer = InboundTransfer::new(1, someone(), "doc.pdf", 1);
        let rx = transfer.subscribe();
        assert_eq!(*rx.borrow(), TransferState::Offered);

        transfer.lock().reject().unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow(), TransferState::Rejected);
    }

    #[test]
    fn test_transfer_enum_identity() {
        let inbound = Arc::new(InboundTransfer::new(1, someone(), "a", 1));
        let a = Transfer::from(inbound.clone());
        let b = Transfer::from(inbound);
        let c = Transfer::from(Arc::new(OutboundTransfer::new(1, someone(), "a", 1)));

        assert!(a.is_same(&b));
        assert!(!a.is_same(&c));
        assert_eq!(a.direction(), Direction::Inbound);
        assert_eq!(c.direction(), Direction::Outbound);
    }

    #[test]
    fn test_concurrent_cancel_wins_once() {
        let transfer = Arc::new(InboundTransfer::new(1, someone(), "doc.pdf", 1));
        transfer.lock().accept().unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let transfer = Arc::clone(&transfer);
                std::thread::spawn(move || transfer.cancel().is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
    }
}
