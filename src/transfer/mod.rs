//! File transfer records, their registry and download naming.

mod naming;
mod record;
mod registry;
mod state;

pub use naming::unique_file_name;
pub use record::{
    Direction, FileTransfer, InboundGuard, InboundTransfer, OutboundGuard, OutboundTransfer,
    Transfer, TransferCore, TransferId,
};
pub use registry::{TransferKey, TransferRegistry};
pub use state::{TransferAction, TransferState};
