//! Pointer-simulation sink (`/mouse`).

use touch_core::display::Rect;
use touch_core::event::{TouchEvent, TouchKind};

use crate::application::forwarder::{ForwardError, Forwarder, SinkError};
use crate::application::sinks::resolve_screen_index;
use crate::domain::route::Route;
use crate::infrastructure::pointer_device::PointerDevice;
use crate::infrastructure::screen_info::ScreenEnumerator;

/// Drives the OS cursor from touch events.
///
/// Move issues an absolute cursor move; Down moves then presses the primary
/// button; Up moves then releases it.  `z` and the contact id are unused
/// (a pointer has no contact identity).
pub struct PointerForwarder {
    work_area: Rect,
    device: Box<dyn PointerDevice>,
}

impl PointerForwarder {
    /// Builds the sink from its route arguments.
    ///
    /// The display snapshot is taken here, once; a monitor change after
    /// connect does not affect this session.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the display list cannot be queried or the
    /// `screen` argument is invalid or out of range.
    pub fn from_route(
        route: &Route,
        screens: &dyn ScreenEnumerator,
        device: Box<dyn PointerDevice>,
    ) -> Result<PointerForwarder, SinkError> {
        let displays = screens
            .query_displays()
            .map_err(|e| SinkError::ScreenQuery(e.to_string()))?;
        let index = resolve_screen_index(route, &displays)?;
        Ok(PointerForwarder {
            work_area: displays[index].work_area,
            device,
        })
    }
}

impl Forwarder for PointerForwarder {
    fn kind(&self) -> &'static str {
        "mouse"
    }

    fn forward(&mut self, event: &TouchEvent) -> Result<(), ForwardError> {
        let (x, y) = self.work_area.to_pixels(event.x, event.y);
        let result = match event.kind {
            TouchKind::Move => self.device.move_to(x, y),
            TouchKind::Down => self
                .device
                .move_to(x, y)
                .and_then(|()| self.device.press(x, y)),
            TouchKind::Up => self
                .device
                .move_to(x, y)
                .and_then(|()| self.device.release(x, y)),
            TouchKind::Unknown => return Ok(()),
        };
        result.map_err(|e| ForwardError::Pointer(e.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::infrastructure::pointer_device::{MockPointerDevice, PointerAction, PointerError};
    use crate::infrastructure::screen_info::MockScreenEnumerator;

    /// Builds a sink over the dual-display mock plus a shared recording
    /// device the test keeps a handle to.
    fn make_forwarder(path: &str) -> (PointerForwarder, Arc<MockPointerDevice>) {
        let device = Arc::new(MockPointerDevice::new());

        struct SharedDevice(Arc<MockPointerDevice>);
        impl PointerDevice for SharedDevice {
            fn move_to(&self, x: i32, y: i32) -> Result<(), PointerError> {
                self.0.move_to(x, y)
            }
            fn press(&self, x: i32, y: i32) -> Result<(), PointerError> {
                self.0.press(x, y)
            }
            fn release(&self, x: i32, y: i32) -> Result<(), PointerError> {
                self.0.release(x, y)
            }
        }

        let forwarder = PointerForwarder::from_route(
            &Route::parse(path),
            &MockScreenEnumerator::dual_1080p(),
            Box::new(SharedDevice(Arc::clone(&device))),
        )
        .expect("construct");
        (forwarder, device)
    }

    #[test]
    fn test_move_issues_one_pixel_mapped_cursor_move() {
        // Arrange: primary work area is 1920×1040.
        let (mut forwarder, device) = make_forwarder("/mouse");

        // Act
        forwarder
            .forward(&TouchEvent::parse("#m|1|0.5|0.5|0.0"))
            .expect("forward");

        // Assert
        let actions = device.actions.lock().expect("lock");
        assert_eq!(*actions, vec![PointerAction::Move(960, 520)]);
    }

    #[test]
    fn test_down_moves_then_presses() {
        let (mut forwarder, device) = make_forwarder("/mouse");

        forwarder
            .forward(&TouchEvent::parse("#d|1|0|0|0"))
            .expect("forward");

        let actions = device.actions.lock().expect("lock");
        assert_eq!(
            *actions,
            vec![PointerAction::Move(0, 0), PointerAction::Press(0, 0)]
        );
    }

    #[test]
    fn test_up_moves_then_releases() {
        let (mut forwarder, device) = make_forwarder("/mouse");

        forwarder
            .forward(&TouchEvent::parse("#u|1|1|1|0"))
            .expect("forward");

        let actions = device.actions.lock().expect("lock");
        assert_eq!(
            *actions,
            vec![
                PointerAction::Move(1920, 1040),
                PointerAction::Release(1920, 1040)
            ]
        );
    }

    #[test]
    fn test_screen_argument_selects_the_second_display() {
        // The second mock display's work area starts at x = 1920.
        let (mut forwarder, device) = make_forwarder("/mouse?screen=1");

        forwarder
            .forward(&TouchEvent::parse("#m|1|0|0|0"))
            .expect("forward");

        let actions = device.actions.lock().expect("lock");
        assert_eq!(*actions, vec![PointerAction::Move(1920, 0)]);
    }

    #[test]
    fn test_out_of_range_screen_fails_construction() {
        let result = PointerForwarder::from_route(
            &Route::parse("/mouse?screen=99"),
            &MockScreenEnumerator::dual_1080p(),
            Box::new(MockPointerDevice::new()),
        );
        assert!(matches!(
            result,
            Err(SinkError::ScreenIndexOutOfRange { index: 99, .. })
        ));
    }

    #[test]
    fn test_device_failure_surfaces_as_forward_error() {
        let forwarder = PointerForwarder::from_route(
            &Route::parse("/mouse"),
            &MockScreenEnumerator::single_1080p(),
            Box::new(MockPointerDevice {
                should_fail: true,
                ..Default::default()
            }),
        );
        let mut forwarder = forwarder.expect("construct");
        let result = forwarder.forward(&TouchEvent::parse("#m|1|0|0|0"));
        assert!(matches!(result, Err(ForwardError::Pointer(_))));
    }
}
