//! The forwarder contract.
//!
//! A forwarder is the per-connection object that translates valid touch
//! events into a specific output protocol or OS action.  One forwarder is
//! constructed per connection at open time by the matching route factory;
//! it lives exactly as long as its connection and is dropped (releasing any
//! owned or leased resources) when the registry entry is removed.
//!
//! # Contract
//!
//! - `forward` is only ever called with valid events, in the arrival order
//!   of one connection's messages.  Distinct connections' forwarders run in
//!   parallel.
//! - A forwarder that failed to fully initialize (e.g. a TUIO sink whose
//!   transmitter could not be opened) must treat `forward` as a no-op
//!   rather than fault.
//! - A runtime failure is returned, logged by the caller, and does *not*
//!   terminate the connection; there is no retry.
//! - Resource release happens in `Drop`.  Implementations must not fault
//!   when dropped without ever having acquired their resources.

use thiserror::Error;
use touch_core::event::TouchEvent;

/// Error type for runtime forwarding failures.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The pointer device rejected an injected action.
    #[error("pointer device error: {0}")]
    Pointer(String),

    /// The touchscreen report device rejected a write.
    #[error("report device error: {0}")]
    Device(String),

    /// The OS touch-injection call failed.
    #[error("touch injection error: {0}")]
    Injection(String),

    /// A network or console write failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Error type for forwarder construction failures.
///
/// Any of these is fatal to the opening connection: the connection is closed
/// before a registry entry exists, so nothing leaks.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The `screen` argument is not a non-negative integer.
    #[error("cannot accept non-numeric screen index '{0}'")]
    InvalidScreenIndex(String),

    /// The `screen` argument does not name a connected display.
    #[error("screen index {index} out of range ({available} display(s) detected)")]
    ScreenIndexOutOfRange { index: usize, available: usize },

    /// The display list could not be queried.
    #[error("failed to query displays: {0}")]
    ScreenQuery(String),

    /// The touchscreen report device could not be found or opened.
    #[error("touch device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The host OS lacks the touch-injection capability.
    #[error("touch injection unsupported: {0}")]
    InjectionUnsupported(String),

    /// The sink has no implementation on this platform.
    #[error("{0} forwarding is not supported on this platform")]
    PlatformUnsupported(&'static str),
}

/// A sink able to forward a touch event to another format or service.
pub trait Forwarder: Send {
    /// Short sink name used in log lines (e.g. `"tuio"`).
    fn kind(&self) -> &'static str;

    /// Forwards one valid touch event.
    ///
    /// # Errors
    ///
    /// Returns [`ForwardError`] when the sink's output action fails; the
    /// connection stays open either way.
    fn forward(&mut self, event: &TouchEvent) -> Result<(), ForwardError>;
}
