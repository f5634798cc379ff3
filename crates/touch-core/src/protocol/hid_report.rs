//! Fixed-layout binary touch report for the legacy HID touchscreen driver.
//!
//! Wire format (report id `1`, payload `2×14 + 1 = 29` bytes; all fields
//! little-endian):
//!
//! ```text
//! contact block (14 bytes):
//!   [status:u16][x:u16][y:u16][pressure:u16][width:u16][height:u16][id:u16]
//! report:
//!   [block 0][block 1][contact count:u8]
//! ```
//!
//! `x`/`y` are the normalized `[0, 1]` coordinates scaled to `[0, 32767]`
//! and truncated; the driver expects its own fixed coordinate range, not
//! screen pixels.
//!
//! Per event kind:
//!
//! | Kind | Block 0            | Block 1                        | Count |
//! |------|--------------------|--------------------------------|-------|
//! | Down | status 2, contact  | zero-filled                    | 1     |
//! | Move | status 3, contact  | zero-filled                    | 1     |
//! | Up   | status 2, contact  | status 0, same contact data    | 2     |
//!
//! The two-slot Up layout (a duplicate "ending" slot carrying the same
//! coordinates and id) is required by the target driver and must not be
//! normalized to the single-slot shape.

use thiserror::Error;

use crate::event::{TouchEvent, TouchKind};

/// Bytes per contact block.
pub const CONTACT_BLOCK_SIZE: usize = 14;

/// Payload size: two contact blocks plus the trailing count byte.
pub const REPORT_SIZE: usize = 2 * CONTACT_BLOCK_SIZE + 1;

/// The multi-touch report id.
pub const REPORT_ID: u8 = 1;

/// Largest encodable coordinate (`i16::MAX`); scales the `[0, 1]` range.
const COORDINATE_MAX: f64 = 32767.0;

const PRESSURE: u16 = 1;
const WIDTH: u16 = 1;
const HEIGHT: u16 = 1;

// Contact status values understood by the driver.
const STATUS_NEW: u16 = 2;
const STATUS_UPDATED: u16 = 3;
const STATUS_ENDED: u16 = 0;

/// Error type for report encoding.
#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    /// Only up/down/move events have a report encoding.
    #[error("cannot encode a '{0}' event as a touch report")]
    UnsupportedKind(TouchKind),
}

/// One encoded touch report, ready for the device write API.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchReport {
    /// Report id, always [`REPORT_ID`].
    pub report_id: u8,
    /// The 29-byte payload.
    pub data: [u8; REPORT_SIZE],
}

impl TouchReport {
    /// Returns the buffer handed to the device write call: the report id
    /// followed by the payload.
    pub fn as_device_buffer(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1 + REPORT_SIZE);
        buf.push(self.report_id);
        buf.extend_from_slice(&self.data);
        buf
    }
}

/// Encodes one event as a touch report.
///
/// # Errors
///
/// Returns [`ReportError::UnsupportedKind`] for events whose kind has no
/// report encoding; valid events never carry such a kind.
pub fn encode(event: &TouchEvent) -> Result<TouchReport, ReportError> {
    let x = (event.x * COORDINATE_MAX) as u16;
    let y = (event.y * COORDINATE_MAX) as u16;
    let id = event.id as u16;

    let mut data = [0u8; REPORT_SIZE];
    match event.kind {
        TouchKind::Down => {
            write_contact(&mut data[..CONTACT_BLOCK_SIZE], STATUS_NEW, x, y, id);
            // Block 1 stays zero-filled.
            data[REPORT_SIZE - 1] = 1;
        }
        TouchKind::Move => {
            write_contact(&mut data[..CONTACT_BLOCK_SIZE], STATUS_UPDATED, x, y, id);
            data[REPORT_SIZE - 1] = 1;
        }
        TouchKind::Up => {
            // The lift is reported as a new-contact slot plus an ended slot
            // populated with the same data.
            write_contact(&mut data[..CONTACT_BLOCK_SIZE], STATUS_NEW, x, y, id);
            write_contact(
                &mut data[CONTACT_BLOCK_SIZE..2 * CONTACT_BLOCK_SIZE],
                STATUS_ENDED,
                x,
                y,
                id,
            );
            data[REPORT_SIZE - 1] = 2;
        }
        TouchKind::Unknown => return Err(ReportError::UnsupportedKind(event.kind)),
    }

    Ok(TouchReport {
        report_id: REPORT_ID,
        data,
    })
}

/// Writes one 14-byte contact block into `block`.
fn write_contact(block: &mut [u8], status: u16, x: u16, y: u16, id: u16) {
    let fields = [status, x, y, PRESSURE, WIDTH, HEIGHT, id];
    for (slot, value) in block.chunks_exact_mut(2).zip(fields) {
        slot.copy_from_slice(&value.to_le_bytes());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
