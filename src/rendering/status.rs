//! One-line session status for the terminal front end

use crate::networking::client::{ConnectionState, RoomPhase, Session, SessionState};
use crate::networking::transport::Transport;

pub fn render_status<T: Transport>(session: &Session<T>) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(
        match session.connection_state() {
            ConnectionState::Connecting => "Connecting",
            ConnectionState::Open => "Connected",
            ConnectionState::Closed => "Disconnected",
        }
        .to_string(),
    );

    if let Some(role) = session.role() {
        parts.push(format!("Playing as: {role:?}"));
    }

    match session.state() {
        SessionState::Lobby {
            room: RoomPhase::WaitingForPeer(count),
            ..
        } => parts.push(format!("Waiting for players: {count}/2")),
        SessionState::Started { .. } => {
            parts.push("Game Started!".to_string());
            if let Some(turn) = session.turn() {
                parts.push(format!("Turn: {turn:?}"));
            }
        }
        _ => {}
    }

    if let Some(notice) = session.notice() {
        parts.push(format!("Server: {notice}"));
    }

    parts.join(" | ")
}
