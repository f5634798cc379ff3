//! Wire encoders shared by the forwarders.
//!
//! - [`osc`] / [`tuio`]: the OSC bundle encoder and the TUIO 2D-cursor
//!   bundle built on top of it.
//! - [`hid_report`]: the fixed-layout binary report for the legacy HID
//!   touchscreen driver.
//! - [`frame`]: the process-wide frame-sequence counter shared by every
//!   TUIO sink.

pub mod frame;
pub mod hid_report;
pub mod osc;
pub mod tuio;

pub use frame::FrameCounter;
