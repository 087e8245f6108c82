//! touch-relay/src/bridge.rs
//!
//! The glue between the two sides: per-message, stateless. Argument index 1
//! of the OSC message carries a JSON string; it gets parsed and forwarded
//! verbatim as the payload of a `"touch"` event.

use std::sync::Arc;

use rosc::{OscMessage, OscType};
use tracing::{debug, warn};

use crate::osc::OscHandler;
use crate::relay::EventSink;

/// Event name every forwarded payload is emitted under.
pub const TOUCH_EVENT: &str = "touch";

/// Forwards each OSC message's embedded JSON payload to the injected sink.
/// Messages that don't carry valid JSON at argument index 1 are dropped
/// with a warn line; nothing is emitted for them.
pub struct TouchBridge {
    sink: Arc<dyn EventSink>,
}

impl TouchBridge {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }
}

impl OscHandler for TouchBridge {
    fn on_message(&self, msg: OscMessage) {
        // On the wire the payload is the message's second element, right
        // after the address pattern. rosc keeps the address out of the
        // argument list, so that element is the first typed argument. The
        // address itself is never branched on.
        let Some(OscType::String(raw)) = msg.args.first() else {
            warn!(
                "dropping OSC message at '{}': no string payload argument",
                msg.addr
            );
            return;
        };

        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(payload) => {
                debug!("forwarding {} bytes of payload as '{TOUCH_EVENT}'", raw.len());
                self.sink.emit(TOUCH_EVENT, payload);
            }
            Err(e) => {
                warn!("dropping OSC message at '{}': invalid JSON: {e}", msg.addr);
            }
        }
    }
}
