//! touch-core: shared domain types and wire encoders for TouchBridge.
//!
//! This crate is pure logic (no I/O, no async, no OS calls), so every
//! encoder and the parser can be tested byte-for-byte on any platform.
//!
//! ```text
//! event.rs      touch message grammar and parser (valid/invalid tagging)
//! display.rs    monitor snapshots, normalized → pixel mapping
//! protocol/
//!   osc.rs        OSC 1.0 message/bundle encoder
//!   tuio.rs       TUIO 2D-cursor bundle builder
//!   hid_report.rs 29-byte HID touchscreen report encoder
//!   frame.rs      shared frame-sequence counter
//! ```
//!
//! The server crate (`touch-repeater`) composes these with its transport,
//! dispatch, and platform-device layers.

pub mod display;
pub mod event;
pub mod protocol;

pub use display::{DisplayInfo, Rect};
pub use event::{TouchEvent, TouchKind};
pub use protocol::FrameCounter;
