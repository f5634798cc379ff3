//! Legacy HID touchscreen sink (`/win7`).

use std::sync::Arc;

use touch_core::event::{TouchEvent, TouchKind};
use touch_core::protocol::hid_report;

use crate::application::forwarder::{ForwardError, Forwarder, SinkError};
use crate::application::sinks::resolve_screen_index;
use crate::domain::route::Route;
use crate::infrastructure::hid_device::{DevicePool, SharedReportDevice};
use crate::infrastructure::screen_info::ScreenEnumerator;

/// Writes fixed-layout binary reports to the shared touchscreen driver.
///
/// The device handle is leased from the process-wide [`DevicePool`]: the
/// first `/win7` connection opens it, later ones share it, and the last
/// lease to drop closes it.  The `screen` argument is validated like the
/// other screen-bound sinks even though this sink's wire format uses the
/// driver's own 0..32767 coordinate range rather than pixel space.
pub struct HidForwarder {
    device: Arc<SharedReportDevice>,
}

impl HidForwarder {
    /// Builds the sink, leasing the device and validating arguments.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::DeviceUnavailable`] when the driver cannot be
    /// found or opened, and the usual screen errors for a bad `screen`
    /// argument.  A lease acquired before a failed validation is simply
    /// dropped; nothing leaks.
    pub fn from_route(
        route: &Route,
        screens: &dyn ScreenEnumerator,
        pool: &DevicePool,
    ) -> Result<HidForwarder, SinkError> {
        let device = pool
            .acquire()
            .map_err(|e| SinkError::DeviceUnavailable(e.to_string()))?;

        let displays = screens
            .query_displays()
            .map_err(|e| SinkError::ScreenQuery(e.to_string()))?;
        let _ = resolve_screen_index(route, &displays)?;

        Ok(HidForwarder { device })
    }
}

impl Forwarder for HidForwarder {
    fn kind(&self) -> &'static str {
        "win7"
    }

    fn forward(&mut self, event: &TouchEvent) -> Result<(), ForwardError> {
        if event.kind == TouchKind::Unknown {
            return Ok(());
        }
        let report =
            hid_report::encode(event).map_err(|e| ForwardError::Device(e.to_string()))?;
        self.device
            .write(&report)
            .map_err(|e| ForwardError::Device(e.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
