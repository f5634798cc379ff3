//! touch-repeater library crate.
//!
//! Bridges normalized touch events, delivered as short text messages over
//! persistent WebSocket connections, to one of several output sinks.  Each
//! connection selects its sink at connect time via its request path:
//!
//! ```text
//! Client (text frames over WebSocket)
//!         ↕
//! [touch-repeater]
//!   ├── domain/          RepeaterConfig, route/argument parsing
//!   ├── application/     Forwarder contract, sinks, dispatcher, registry
//!   └── infrastructure/
//!         ├── ws_server/       accept loop + session lifecycle
//!         ├── osc_transmitter/ UDP datagrams for the TUIO sink
//!         ├── screen_info/     display enumeration (trait + mock + win32)
//!         ├── pointer_device/  cursor injection (trait + mock + win32)
//!         ├── hid_device/      report device + lease pool (trait + mock + win32)
//!         └── touch_inject/    native touch injection (trait + mock + win32)
//!         ↕
//! Console / OS cursor / TUIO over UDP / HID driver / OS touch input
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O, no async, no frameworks.
//! - `application` depends on `domain`, `touch-core`, and the
//!   infrastructure *traits* only; sinks receive their devices, they never
//!   construct platform handles themselves.
//! - `infrastructure` depends on everything plus `tokio`, `tungstenite`,
//!   and (on Windows) the Win32 APIs.

pub mod application;
pub mod domain;
pub mod infrastructure;
