//! UDP transmitter for OSC bundles.
//!
//! Each TUIO sink exclusively owns one transmitter.  The socket is bound to
//! an ephemeral local port and connected to the target endpoint at
//! construction; sends are fire-and-forget datagrams.  Dropping the
//! transmitter closes the socket.

use std::io;
use std::net::UdpSocket;

use touch_core::protocol::osc::OscBundle;

/// A connected UDP socket that sends encoded OSC bundles.
pub struct OscTransmitter {
    socket: UdpSocket,
    target: String,
}

impl OscTransmitter {
    /// Binds an ephemeral local port and connects it to `host:port`.
    ///
    /// The host may be a name (`localhost`) or an address; resolution
    /// happens here, once, so sends never block on DNS.
    ///
    /// # Errors
    ///
    /// Returns an error when the port is not a number, the host does not
    /// resolve, or the socket cannot be bound.
    pub fn connect(host: &str, port: &str) -> io::Result<OscTransmitter> {
        let port: u16 = port.parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid port '{port}': {e}"),
            )
        })?;

        let socket = UdpSocket::bind(("0.0.0.0", 0))?;
        socket.connect((host, port))?;

        Ok(OscTransmitter {
            socket,
            target: format!("{host}:{port}"),
        })
    }

    /// Sends one bundle as a single datagram.
    ///
    /// # Errors
    ///
    /// Propagates the socket error; the caller logs it and carries on.
    pub fn send(&self, bundle: &OscBundle) -> io::Result<()> {
        self.socket.send(&bundle.encode())?;
        Ok(())
    }

    /// The endpoint this transmitter was connected to, for log lines.
    pub fn target(&self) -> &str {
        &self.target
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
