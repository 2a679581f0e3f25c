//! Network module.
//!
//! Contains the event queue handed to the transport and the local session
//! that feeds it.

mod events;
mod session;

pub use events::NetworkEvent;
pub use session::{LocalSession, LocalSessionParams};
