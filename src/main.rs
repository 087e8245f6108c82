use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use touch_relay::bridge::TouchBridge;
use touch_relay::osc::OscListener;
use touch_relay::relay::RelayClient;
use touch_relay::Result;

/// Everything is fixed: one inbound port, one outbound endpoint, one event.
const OSC_BIND_ADDR: &str = "0.0.0.0:3333";
const RELAY_URL: &str = "wss://gatekeeper.davidjonas.art";

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("touch_relay=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    info!("touch-relay starting. osc={OSC_BIND_ADDR} relay={RELAY_URL}");

    tokio::select! {
        res = run() => {
            if let Err(e) = res {
                error!("Bridge error: {e}");
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C detected; exiting.");
        }
    }
    Ok(())
}

async fn run() -> Result<()> {
    // Outbound first, so messages arriving right after bind have somewhere
    // to go. No retry: a gateway that is down at startup is a startup error.
    let relay = RelayClient::connect(RELAY_URL).await?;
    let bridge = TouchBridge::new(Arc::new(relay));

    let addr: SocketAddr = OSC_BIND_ADDR.parse()?;
    let listener = OscListener::bind(addr).await?;
    listener.run(&bridge).await
}
