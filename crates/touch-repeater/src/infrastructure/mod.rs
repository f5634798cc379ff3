//! Infrastructure layer: the WebSocket transport, the UDP transmitter, and
//! the platform device adapters (each a trait with an always-compiled mock
//! and a Windows-native implementation).

pub mod hid_device;
pub mod osc_transmitter;
pub mod pointer_device;
pub mod screen_info;
pub mod touch_inject;
pub mod ws_server;

pub use ws_server::{run_server, serve, ServerState};
