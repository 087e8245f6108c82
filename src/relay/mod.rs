//! touch-relay/src/relay/mod.rs
//!
//! The outbound side of the bridge: a single WebSocket connection to the
//! remote gateway plus a fire-and-forget emit handle. The connection task
//! owns the stream; emit handles only push events into a bounded channel.

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::select;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use crate::Result;

/// How many outbound events may sit in the channel before the newest one
/// gets dropped. Large enough to absorb a burst arriving while the writer
/// task has not run yet.
pub const EVENT_CAPACITY: usize = 64;

/// A named event with an opaque JSON payload, on its way to the gateway.
#[derive(Debug, Clone)]
pub struct RelayEvent {
    pub name: String,
    pub payload: Value,
}

/// Fire-and-forget emit. No acknowledgment, no delivery guarantee, and no
/// error surfaced to the caller; implementations log what they drop.
///
/// The bridge takes this as a trait object so tests can substitute a
/// recording double.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &str, payload: Value);
}

/// Handle to the relay connection. Cheap to clone; all clones feed the same
/// connection task.
#[derive(Clone)]
pub struct RelayClient {
    tx: mpsc::Sender<RelayEvent>,
}

impl RelayClient {
    /// Eagerly connect to the gateway and spawn the connection task.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_capacity(url, EVENT_CAPACITY).await
    }

    /// Same as [`RelayClient::connect`] with a caller-chosen channel
    /// capacity.
    pub async fn connect_with_capacity(url: &str, capacity: usize) -> Result<Self> {
        let (ws_stream, _response) = connect_async(url).await?;
        info!("Connected to relay gateway at {url}");

        let (tx, rx) = mpsc::channel::<RelayEvent>(capacity);
        tokio::spawn(run_connection(ws_stream, rx));

        Ok(Self { tx })
    }
}

impl EventSink for RelayClient {
    fn emit(&self, event: &str, payload: Value) {
        let evt = RelayEvent {
            name: event.to_string(),
            payload,
        };
        match self.tx.try_send(evt) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(evt)) => {
                warn!("relay channel full, dropping '{}' event", evt.name);
            }
            Err(mpsc::error::TrySendError::Closed(evt)) => {
                debug!("relay task gone, dropping '{}' event", evt.name);
            }
        }
    }
}

/// Each event goes out as one text frame holding the `["name", payload]`
/// event envelope the gateway consumes.
fn encode_frame(evt: &RelayEvent) -> String {
    Value::Array(vec![Value::String(evt.name.clone()), evt.payload.clone()])
        .to_string()
}

/// Owns the WebSocket stream. Drains the event channel into text frames and
/// watches the read half for the Close frame. Once the link is down the
/// task keeps draining the channel so emit handles never see an error;
/// there is no reconnection.
async fn run_connection(
    ws_stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    mut rx: mpsc::Receiver<RelayEvent>,
) {
    let (mut write, mut read) = ws_stream.split();

    loop {
        select! {
            evt = rx.recv() => {
                match evt {
                    Some(evt) => {
                        let frame = encode_frame(&evt);
                        if let Err(e) = write.send(Message::text(frame)).await {
                            info!("Disconnected from relay gateway: {e}");
                            break;
                        }
                    }
                    // every emit handle dropped
                    None => return,
                }
            }
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Disconnected from relay gateway");
                        break;
                    }
                    Some(Ok(other)) => {
                        debug!("ignoring inbound relay frame: {other:?}");
                    }
                    Some(Err(e)) => {
                        info!("Disconnected from relay gateway: {e}");
                        break;
                    }
                }
            }
        }
    }

    // Dead link: accept and drop whatever still comes in.
    while let Some(evt) = rx.recv().await {
        debug!("relay link down, dropping '{}' event", evt.name);
    }
}
