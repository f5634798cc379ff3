//! TUIO 2D-cursor bundle builder.
//!
//! Per forwarded event the bridge emits one OSC bundle with, in this exact
//! order:
//!
//! 1. `/tuio/2Dcur ("fseq", frame)`: the shared frame-sequence number.
//! 2. `/tuio/2Dcur ("set", id, x, y, dx, dy, motion, height, width)`: the
//!    cursor state, with *normalized* coordinates (not pixel-mapped).
//! 3. `/tuio/2Dcur ("alive", id)`: the set of live session ids.
//!
//! The `set` message always carries `dx = dy = motion = 0` and
//! `height = width = 1`; the bridge forwards instantaneous positions and
//! does not compute velocities.  Lift events are announced the same way;
//! receivers detect the end of a contact when its id leaves the `alive`
//! set on a subsequent frame.

use crate::event::TouchEvent;
use crate::protocol::osc::{OscArg, OscBundle, OscMessage};

/// The 2D-cursor profile address used by every message in a bundle.
pub const CURSOR_PROFILE: &str = "/tuio/2Dcur";

/// Builds the cursor bundle for one event under the given frame number.
///
/// The caller draws `frame` from the shared
/// [`FrameCounter`](crate::protocol::frame::FrameCounter) immediately before
/// each send, so frame numbers are strictly increasing across every sink in
/// the process.
pub fn cursor_bundle(event: &TouchEvent, frame: i32) -> OscBundle {
    let mut bundle = OscBundle::new();

    bundle.push(
        OscMessage::new(CURSOR_PROFILE)
            .arg(OscArg::Str("fseq".to_string()))
            .arg(OscArg::Int(frame)),
    );

    bundle.push(
        OscMessage::new(CURSOR_PROFILE)
            .arg(OscArg::Str("set".to_string()))
            .arg(OscArg::Int(event.id))
            .arg(OscArg::Float(event.x as f32))
            .arg(OscArg::Float(event.y as f32))
            .arg(OscArg::Float(0.0)) // dx
            .arg(OscArg::Float(0.0)) // dy
            .arg(OscArg::Float(0.0)) // motion acceleration
            .arg(OscArg::Float(1.0)) // height
            .arg(OscArg::Float(1.0)), // width
    );

    bundle.push(
        OscMessage::new(CURSOR_PROFILE)
            .arg(OscArg::Str("alive".to_string()))
            .arg(OscArg::Int(event.id)),
    );

    bundle
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TouchEvent;
    use crate::protocol::osc::OscArg;

    fn sample_event() -> TouchEvent {
        TouchEvent::parse("#m|7|0.5|0.25|0.0")
    }

    #[test]
    fn test_bundle_contains_fseq_set_alive_in_order() {
        // Act
        let bundle = cursor_bundle(&sample_event(), 42);

        // Assert
        let messages = bundle.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].args()[0], OscArg::Str("fseq".to_string()));
        assert_eq!(messages[1].args()[0], OscArg::Str("set".to_string()));
        assert_eq!(messages[2].args()[0], OscArg::Str("alive".to_string()));
    }

    #[test]
    fn test_every_message_uses_the_cursor_profile_address() {
        let bundle = cursor_bundle(&sample_event(), 1);
        for message in bundle.messages() {
            assert_eq!(message.address(), CURSOR_PROFILE);
        }
    }

    #[test]
    fn test_fseq_carries_the_given_frame_number() {
        let bundle = cursor_bundle(&sample_event(), 42);
        assert_eq!(bundle.messages()[0].args()[1], OscArg::Int(42));
    }

    #[test]
    fn test_set_carries_session_id_and_normalized_coordinates() {
        // Act
        let bundle = cursor_bundle(&sample_event(), 1);

        // Assert: set s x y dx dy m h w
        let args = bundle.messages()[1].args();
        assert_eq!(args.len(), 9);
        assert_eq!(args[1], OscArg::Int(7));
        assert_eq!(args[2], OscArg::Float(0.5));
        assert_eq!(args[3], OscArg::Float(0.25));
        assert_eq!(args[4], OscArg::Float(0.0));
        assert_eq!(args[5], OscArg::Float(0.0));
        assert_eq!(args[6], OscArg::Float(0.0));
        assert_eq!(args[7], OscArg::Float(1.0));
        assert_eq!(args[8], OscArg::Float(1.0));
    }

    #[test]
    fn test_alive_lists_the_session_id() {
        let bundle = cursor_bundle(&sample_event(), 1);
        let args = bundle.messages()[2].args();
        assert_eq!(args.len(), 2);
        assert_eq!(args[1], OscArg::Int(7));
    }

    #[test]
    fn test_coordinates_are_not_pixel_mapped() {
        // An overscanned normalized position is forwarded untouched.
        let event = TouchEvent::parse("#m|1|1.5|-0.5|0.0");
        let bundle = cursor_bundle(&event, 1);
        let args = bundle.messages()[1].args();
        assert_eq!(args[2], OscArg::Float(1.5));
        assert_eq!(args[3], OscArg::Float(-0.5));
    }
}
