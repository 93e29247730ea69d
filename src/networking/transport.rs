//! WebSocket transport
//!
//! One JSON message per text frame. Outbound messages go through an
//! unbounded channel drained by a writer task, so sending never blocks the
//! session; inbound frames are forwarded as [`TransportEvent`]s.

use futures::{SinkExt, StreamExt};
use shared::protocol::ClientMessage;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;
use websocket::{ClientBuilder, Message};

use super::error::{NetworkError, NetworkResult};

/// Outbound half of a connection, owned exclusively by the session
pub trait Transport {
    /// Fire-and-forget send; no acknowledgement is awaited.
    fn send(&mut self, message: &ClientMessage) -> NetworkResult<()>;

    /// Release the connection. Calling it twice is harmless.
    fn close(&mut self);
}

/// Inbound side of a connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Frame(String),
    Closed,
}

/// [`Transport`] backed by the writer/reader tasks spawned in [`connect`]
#[derive(Debug)]
pub struct ChannelTransport {
    outbound: Option<mpsc::UnboundedSender<String>>,
    reader: Option<JoinHandle<()>>,
}

impl ChannelTransport {
    pub fn new(outbound: mpsc::UnboundedSender<String>, reader: Option<JoinHandle<()>>) -> Self {
        Self {
            outbound: Some(outbound),
            reader,
        }
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, message: &ClientMessage) -> NetworkResult<()> {
        let outbound = self.outbound.as_ref().ok_or(NetworkError::TransportClosed)?;
        let json = serde_json::to_string(message)?;
        outbound
            .send(json)
            .map_err(|_| NetworkError::TransportClosed)
    }

    fn close(&mut self) {
        // Dropping the sender lets the writer flush and send a close frame.
        self.outbound.take();
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}

impl Drop for ChannelTransport {
    fn drop(&mut self) {
        self.close();
    }
}

/// Open a WebSocket to `url` and spawn its writer and reader tasks
pub async fn connect(
    url: &Url,
) -> NetworkResult<(ChannelTransport, mpsc::UnboundedReceiver<TransportEvent>)> {
    info!("[NETWORK] Connecting to {}", url);

    let builder = ClientBuilder::new()
        .uri(url.as_str())
        .map_err(|e| NetworkError::InvalidUrl {
            message: e.to_string(),
        })?;
    let (stream, _response) = builder.connect().await?;
    let (mut sink, mut source) = stream.split();

    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
    let (in_tx, in_rx) = mpsc::unbounded_channel::<TransportEvent>();

    tokio::spawn(async move {
        while let Some(json) = out_rx.recv().await {
            debug!("[NETWORK] -> {}", json);
            if let Err(e) = sink.send(Message::text(json)).await {
                warn!("[NETWORK] Failed to send frame: {}", e);
                break;
            }
        }
        let _ = sink.close().await;
    });

    let reader = tokio::spawn(async move {
        while let Some(frame) = source.next().await {
            match frame {
                Ok(message) if message.is_close() => break,
                Ok(message) => {
                    let Some(text) = message.as_text() else {
                        continue;
                    };
                    if in_tx.send(TransportEvent::Frame(text.to_owned())).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!("[NETWORK] WebSocket error: {}", e);
                    break;
                }
            }
        }
        let _ = in_tx.send(TransportEvent::Closed);
    });

    info!("[NETWORK] Connected to {}", url);
    Ok((ChannelTransport::new(out_tx, Some(reader)), in_rx))
}
