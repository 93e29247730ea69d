//! Event loop tying the session to a live socket and to user intents
//!
//! Everything runs on one task: each transport event or intent is applied
//! to the session to completion before the next one is looked at.

use tokio::sync::mpsc;
use tracing::{info, warn};
use url::Url;

use super::client::{ClientIdentity, ConnectionState, Session};
use super::error::NetworkResult;
use super::transport::{connect, ChannelTransport, TransportEvent};

/// Local intents forwarded by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Visual row/column as drawn for the player
    Click { row: u8, col: u8 },
    Resign,
    Reconnect,
    Quit,
}

/// Play one game until the user quits or the intent channel closes
///
/// `on_change` is called after every applied event so the caller can redraw.
pub async fn run_game<F>(
    url: Url,
    identity: ClientIdentity,
    mut intents: mpsc::UnboundedReceiver<Intent>,
    mut on_change: F,
) -> NetworkResult<()>
where
    F: FnMut(&Session<ChannelTransport>),
{
    let (transport, events) = connect(&url).await?;
    let mut events = Some(events);
    let mut session = Session::new(identity, transport);
    session.on_open();
    on_change(&session);

    loop {
        tokio::select! {
            event = next_event(&mut events) => match event {
                Some(TransportEvent::Frame(frame)) => session.handle_frame(&frame),
                Some(TransportEvent::Closed) | None => {
                    events = None;
                    session.on_close();
                }
            },
            intent = intents.recv() => match intent {
                Some(Intent::Click { row, col }) => {
                    session.click(row, col);
                }
                Some(Intent::Resign) => session.resign(),
                Some(Intent::Reconnect) => {
                    if session.connection_state() != ConnectionState::Closed {
                        info!("[NETWORK] Already connected");
                        continue;
                    }
                    match connect(&url).await {
                        Ok((transport, fresh)) => {
                            events = Some(fresh);
                            session.reconnect(transport);
                            session.on_open();
                        }
                        Err(e) => warn!("[NETWORK] Reconnect failed: {}", e),
                    }
                }
                Some(Intent::Quit) | None => {
                    session.shutdown();
                    on_change(&session);
                    break;
                }
            },
        }
        on_change(&session);
    }

    Ok(())
}

/// Next transport event, or never once the transport is gone
async fn next_event(
    events: &mut Option<mpsc::UnboundedReceiver<TransportEvent>>,
) -> Option<TransportEvent> {
    match events {
        Some(events) => events.recv().await,
        None => std::future::pending().await,
    }
}
