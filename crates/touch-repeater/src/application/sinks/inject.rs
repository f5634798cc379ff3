//! OS touch-injection sink (`/win8`).

use touch_core::display::Rect;
use touch_core::event::{TouchEvent, TouchKind};

use crate::application::forwarder::{ForwardError, Forwarder, SinkError};
use crate::application::sinks::resolve_screen_index;
use crate::domain::route::Route;
use crate::infrastructure::screen_info::ScreenEnumerator;
use crate::infrastructure::touch_inject::{ContactPhase, InjectedContact, TouchInjector};

/// Injects native single-contact touch input.
///
/// The injector handed in here has already passed the host capability
/// check; a host that cannot inject touch rejects the connection before
/// this sink exists.  Coordinates are pixel-mapped into the selected
/// display's work area.
pub struct InjectForwarder {
    work_area: Rect,
    injector: Box<dyn TouchInjector>,
}

impl InjectForwarder {
    /// Builds the sink from its route arguments.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the display list cannot be queried or the
    /// `screen` argument is invalid or out of range.
    pub fn from_route(
        route: &Route,
        screens: &dyn ScreenEnumerator,
        injector: Box<dyn TouchInjector>,
    ) -> Result<InjectForwarder, SinkError> {
        let displays = screens
            .query_displays()
            .map_err(|e| SinkError::ScreenQuery(e.to_string()))?;
        let index = resolve_screen_index(route, &displays)?;
        Ok(InjectForwarder {
            work_area: displays[index].work_area,
            injector,
        })
    }
}

impl Forwarder for InjectForwarder {
    fn kind(&self) -> &'static str {
        "win8"
    }

    fn forward(&mut self, event: &TouchEvent) -> Result<(), ForwardError> {
        let phase = match event.kind {
            TouchKind::Down => ContactPhase::Down,
            TouchKind::Move => ContactPhase::Move,
            TouchKind::Up => ContactPhase::Up,
            TouchKind::Unknown => return Ok(()),
        };
        let (x, y) = self.work_area.to_pixels(event.x, event.y);
        self.injector
            .inject(&InjectedContact {
                x,
                y,
                contact_id: event.id as u32,
                phase,
            })
            .map_err(|e| ForwardError::Injection(e.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
