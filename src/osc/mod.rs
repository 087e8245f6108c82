//! touch-relay/src/osc/mod.rs
//!
//! The inbound side of the bridge. Binds a UDP socket, decodes each datagram
//! as an OSC packet, and hands every decoded message to an [`OscHandler`]
//! exactly once, in arrival order.

use std::net::SocketAddr;

use rosc::{OscMessage, OscPacket};
use tokio::net::UdpSocket;
use tracing::{info, warn};

use crate::{BridgeError, Result};

/// Receives decoded OSC messages from the listener loop.
///
/// Invoked synchronously with respect to decoding: the listener does not
/// read the next datagram until the handler returns, so implementations
/// must not block.
pub trait OscHandler: Send + Sync {
    fn on_message(&self, msg: OscMessage);
}

/// UDP/OSC listener. Owns the socket for its whole lifetime; the process
/// exiting is the only teardown.
pub struct OscListener {
    socket: UdpSocket,
}

impl OscListener {
    /// Bind the listener socket. Fails if the port is taken.
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self { socket })
    }

    /// The address the socket actually bound to (useful when binding port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// The main receive loop. Runs until the socket errors out.
    ///
    /// Malformed datagrams are logged and dropped; the loop keeps going.
    pub async fn run<H: OscHandler>(&self, handler: &H) -> Result<()> {
        info!("OSC listener ready on udp {}", self.local_addr()?);

        let mut buf = vec![0u8; rosc::decoder::MTU];
        loop {
            let (size, _peer) = self.socket.recv_from(&mut buf).await?;
            if let Err(e) = dispatch_datagram(&buf[..size], handler) {
                warn!("dropping OSC datagram: {e}");
            }
        }
    }
}

/// Decode one datagram and dispatch each contained message. Bundles are
/// flattened one level; nested bundles are ignored.
fn dispatch_datagram<H: OscHandler>(data: &[u8], handler: &H) -> Result<()> {
    match rosc::decoder::decode_udp(data) {
        Ok((_remainder, packet)) => {
            match packet {
                OscPacket::Message(msg) => handler.on_message(msg),
                OscPacket::Bundle(bundle) => {
                    for p in bundle.content {
                        if let OscPacket::Message(m) = p {
                            handler.on_message(m);
                        }
                    }
                }
            }
            Ok(())
        }
        Err(e) => Err(BridgeError::OscDecode(format!("{e:?}"))),
    }
}
