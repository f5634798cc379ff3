//! TUIO network-protocol sink (`/tuio`).

use std::sync::Arc;

use tracing::{debug, error};

use touch_core::event::TouchEvent;
use touch_core::protocol::tuio::cursor_bundle;
use touch_core::protocol::FrameCounter;

use crate::application::forwarder::{ForwardError, Forwarder};
use crate::domain::route::Route;
use crate::infrastructure::osc_transmitter::OscTransmitter;

/// Default transmit host when the route supplies none.
pub const DEFAULT_HOST: &str = "localhost";

/// Default transmit port when the route supplies none.
pub const DEFAULT_PORT: &str = "3333";

/// Sends one TUIO 2D-cursor bundle per event over UDP.
///
/// Construction never fails: a transmitter that cannot be opened is
/// reported and the sink stays inert, with `forward` a no-op until the
/// client reconnects.  The frame counter is the process-wide instance
/// shared by every TUIO sink, so `fseq` values are strictly increasing
/// across all of them.
pub struct TuioForwarder {
    transmitter: Option<OscTransmitter>,
    frames: Arc<FrameCounter>,
}

impl TuioForwarder {
    /// Builds the sink from its route arguments (`host`, `port`).
    pub fn from_route(route: &Route, frames: Arc<FrameCounter>) -> TuioForwarder {
        let host = route.arg("host").unwrap_or(DEFAULT_HOST);
        let port = route.arg("port").unwrap_or(DEFAULT_PORT);

        let transmitter = match OscTransmitter::connect(host, port) {
            Ok(transmitter) => {
                debug!("TUIO transmitter connected to {}", transmitter.target());
                Some(transmitter)
            }
            Err(e) => {
                error!("TUIO connection error for {host}:{port}: {e}");
                None
            }
        };

        TuioForwarder {
            transmitter,
            frames,
        }
    }

    /// Whether the transmitter opened successfully.
    pub fn is_connected(&self) -> bool {
        self.transmitter.is_some()
    }
}

impl Forwarder for TuioForwarder {
    fn kind(&self) -> &'static str {
        "tuio"
    }

    fn forward(&mut self, event: &TouchEvent) -> Result<(), ForwardError> {
        let Some(transmitter) = &self.transmitter else {
            // Bad startup condition; stay inert rather than fault.
            return Ok(());
        };

        // The frame number is drawn immediately before the send so it is
        // strictly increasing across every sink in the process.
        let frame = self.frames.next();
        let bundle = cursor_bundle(event, frame);
        transmitter.send(&bundle)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
