//! Networking: wire session, WebSocket transport and HTTP side-channel

pub mod client;
pub mod error;
pub mod lobby;
pub mod runner;
pub mod transport;

pub use client::{ClientIdentity, ConnectionState, RoomPhase, Session, SessionState};
pub use error::{NetworkError, NetworkResult};
pub use runner::{run_game, Intent};
pub use transport::{ChannelTransport, Transport, TransportEvent};
