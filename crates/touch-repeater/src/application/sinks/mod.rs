//! The five forwarder implementations.
//!
//! | Route      | Sink                | Output                              |
//! |------------|---------------------|-------------------------------------|
//! | `/console` | [`ConsoleForwarder`]| raw event text, one line per event  |
//! | `/mouse`   | [`PointerForwarder`]| OS cursor move / press / release    |
//! | `/tuio`    | [`TuioForwarder`]   | TUIO 2D-cursor bundles over UDP     |
//! | `/win7`    | [`HidForwarder`]    | binary reports to the HID driver    |
//! | `/win8`    | [`InjectForwarder`] | native OS touch injection           |

pub mod console;
pub mod hid;
pub mod inject;
pub mod pointer;
pub mod tuio;

pub use console::ConsoleForwarder;
pub use hid::HidForwarder;
pub use inject::InjectForwarder;
pub use pointer::PointerForwarder;
pub use tuio::TuioForwarder;

use touch_core::display::DisplayInfo;

use crate::application::forwarder::SinkError;
use crate::domain::route::Route;

/// Resolves and validates the `screen` argument against a display snapshot.
///
/// Absent `screen` defaults to 0.  Parsing as `usize` rejects negative
/// indices along with everything non-numeric.
///
/// # Errors
///
/// Returns [`SinkError::InvalidScreenIndex`] for a non-numeric value and
/// [`SinkError::ScreenIndexOutOfRange`] for an index past the display list
/// (including any index on a host with no displays).
pub(crate) fn resolve_screen_index(
    route: &Route,
    displays: &[DisplayInfo],
) -> Result<usize, SinkError> {
    let raw = route.arg("screen").unwrap_or("0");
    let index: usize = raw
        .parse()
        .map_err(|_| SinkError::InvalidScreenIndex(raw.to_string()))?;
    if index >= displays.len() {
        return Err(SinkError::ScreenIndexOutOfRange {
            index,
            available: displays.len(),
        });
    }
    Ok(index)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
