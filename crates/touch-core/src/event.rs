//! Touch event grammar and parser.
//!
//! Wire format (one message per event, client → server):
//!
//! ```text
//! #type|id|x|y|z
//! #type|id|x|y|z|userdata
//! ```
//!
//! `type` is one of `u` (up), `d` (down), or `m` (move); `id` is an integer
//! contact identifier that stays stable across the down → move* → up
//! lifecycle of one physical contact; `x`, `y`, `z` are floating-point
//! numbers, with `x` and `y` conventionally normalized to `[0, 1]` relative
//! to a logical surface and `z` forwarded unmodified.
//!
//! # Validity instead of errors
//!
//! Parsing never fails and never panics.  Every input string produces a
//! [`TouchEvent`]; inputs that do not match the grammar exactly yield an
//! event with `valid == false`.  Silent dropping of malformed messages is the
//! intended behavior of the bridge, so the parser deliberately uses a tagged
//! flag rather than a `Result`; a caller that would have to discard the
//! error anyway has nothing to gain from one.
//!
//! Contract: an event with `valid == false` guarantees only `raw`; every
//! other field holds a default and must not be forwarded.

use std::fmt;

/// The kind of touch that an event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    /// A contact was lifted from the surface.
    Up,
    /// A new contact was placed on the surface.
    Down,
    /// An existing contact moved.
    Move,
    /// The type field did not match any recognized kind.
    Unknown,
}

impl fmt::Display for TouchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TouchKind::Up => "up",
            TouchKind::Down => "down",
            TouchKind::Move => "move",
            TouchKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// One parsed touch message, immutable once constructed.
///
/// Check [`TouchEvent::is_valid`] before reading any field other than
/// [`TouchEvent::raw`].
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    /// The kind of touch.
    pub kind: TouchKind,
    /// Contact identifier, stable across one contact's lifecycle.
    pub id: i32,
    /// Normalized X position.
    pub x: f64,
    /// Normalized Y position.
    pub y: f64,
    /// Auxiliary axis, forwarded unmodified.
    pub z: f64,
    /// Opaque payload from the optional sixth field.
    pub user_data: Option<String>,
    /// The exact original wire text, set regardless of validity.
    pub raw: String,
    /// `true` iff the source matched the grammar exactly, including a
    /// recognized kind.
    pub valid: bool,
}

// Grammar constants.
const MARKER: char = '#';
const SEPARATOR: char = '|';
const FIELDS: usize = 5;
const FIELDS_WITH_USER_DATA: usize = FIELDS + 1;

impl TouchEvent {
    /// Parses one wire message.
    ///
    /// Returns an invalid event (see the module docs for the contract) when
    /// the marker is missing, the field count is not 5 or 6, any numeric
    /// field fails to parse, or the type field is unrecognized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use touch_core::event::{TouchEvent, TouchKind};
    ///
    /// let event = TouchEvent::parse("#d|7|0.5|0.25|0.0");
    /// assert!(event.valid);
    /// assert_eq!(event.kind, TouchKind::Down);
    /// assert_eq!(event.id, 7);
    ///
    /// assert!(!TouchEvent::parse("d|7|0.5|0.25|0.0").valid);
    /// ```
    pub fn parse(data: &str) -> TouchEvent {
        let mut event = TouchEvent {
            kind: TouchKind::Unknown,
            id: 0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            user_data: None,
            raw: data.to_string(),
            valid: false,
        };

        // Marker check first; no further parsing is attempted without it.
        let body = match data.strip_prefix(MARKER) {
            Some(body) => body,
            None => return event,
        };

        let fields: Vec<&str> = body.split(SEPARATOR).collect();
        if fields.len() != FIELDS && fields.len() != FIELDS_WITH_USER_DATA {
            return event;
        }

        event.kind = match fields[0] {
            "u" => TouchKind::Up,
            "d" => TouchKind::Down,
            "m" => TouchKind::Move,
            _ => TouchKind::Unknown,
        };

        event.id = match fields[1].parse::<i32>() {
            Ok(id) => id,
            Err(_) => return event,
        };
        event.x = match fields[2].parse::<f64>() {
            Ok(x) => x,
            Err(_) => return event,
        };
        event.y = match fields[3].parse::<f64>() {
            Ok(y) => y,
            Err(_) => return event,
        };
        event.z = match fields[4].parse::<f64>() {
            Ok(z) => z,
            Err(_) => return event,
        };

        if fields.len() == FIELDS_WITH_USER_DATA {
            event.user_data = Some(fields[5].to_string());
        }

        if event.kind == TouchKind::Unknown {
            return event;
        }

        event.valid = true;
        event
    }

    /// Returns `true` iff the source matched the grammar exactly.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl fmt::Display for TouchEvent {
    /// The canonical string form of an event is its original wire text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_down_event_with_all_fields() {
        // Act
        let event = TouchEvent::parse("#d|7|0.5|0.25|0.0");

        // Assert
        assert!(event.valid);
        assert_eq!(event.kind, TouchKind::Down);
        assert_eq!(event.id, 7);
        assert_eq!(event.x, 0.5);
        assert_eq!(event.y, 0.25);
        assert_eq!(event.z, 0.0);
        assert_eq!(event.user_data, None);
    }

    #[test]
    fn test_parse_up_and_move_kinds() {
        assert_eq!(TouchEvent::parse("#u|1|0|0|0").kind, TouchKind::Up);
        assert_eq!(TouchEvent::parse("#m|1|0|0|0").kind, TouchKind::Move);
    }

    #[test]
    fn test_parse_with_user_data_field() {
        // Act
        let event = TouchEvent::parse("#m|3|0.1|0.2|0.3|pen");

        // Assert
        assert!(event.valid);
        assert_eq!(event.user_data.as_deref(), Some("pen"));
    }

    #[test]
    fn test_parse_empty_user_data_is_present_but_empty() {
        let event = TouchEvent::parse("#m|3|0.1|0.2|0.3|");
        assert!(event.valid);
        assert_eq!(event.user_data.as_deref(), Some(""));
    }

    #[test]
    fn test_missing_marker_is_invalid() {
        // Any string not starting with '#' must be invalid.
        assert!(!TouchEvent::parse("d|7|0.5|0.25|0.0").valid);
        assert!(!TouchEvent::parse("").valid);
        assert!(!TouchEvent::parse("hello").valid);
    }

    #[test]
    fn test_unrecognized_type_is_invalid() {
        let event = TouchEvent::parse("#x|1|0|0|0");
        assert!(!event.valid);
        assert_eq!(event.kind, TouchKind::Unknown);
    }

    #[test]
    fn test_wrong_field_count_is_invalid() {
        // 4 fields
        assert!(!TouchEvent::parse("#d|7|0.5|0.25").valid);
        // 7 fields
        assert!(!TouchEvent::parse("#d|7|0.5|0.25|0.0|extra|more").valid);
        // Marker alone
        assert!(!TouchEvent::parse("#").valid);
    }

    #[test]
    fn test_non_numeric_id_is_invalid() {
        assert!(!TouchEvent::parse("#d|seven|0.5|0.25|0.0").valid);
    }

    #[test]
    fn test_non_numeric_coordinate_is_invalid() {
        assert!(!TouchEvent::parse("#d|7|left|0.25|0.0").valid);
        assert!(!TouchEvent::parse("#d|7|0.5|top|0.0").valid);
        assert!(!TouchEvent::parse("#d|7|0.5|0.25|deep").valid);
    }

    #[test]
    fn test_raw_is_preserved_regardless_of_validity() {
        // Arrange
        let good = "#d|7|0.5|0.25|0.0";
        let bad = "not a touch message";

        // Act / Assert
        assert_eq!(TouchEvent::parse(good).raw, good);
        assert_eq!(TouchEvent::parse(bad).raw, bad);
    }

    #[test]
    fn test_display_form_is_the_raw_source() {
        let event = TouchEvent::parse("#u|2|0.9|0.8|0.0");
        assert_eq!(event.to_string(), "#u|2|0.9|0.8|0.0");
    }

    #[test]
    fn test_negative_id_and_out_of_range_coordinates_parse() {
        // The parser validates syntax, not semantics; extrapolated
        // coordinates and negative ids are passed through.
        let event = TouchEvent::parse("#m|-4|1.5|-0.25|2.0");
        assert!(event.valid);
        assert_eq!(event.id, -4);
        assert_eq!(event.x, 1.5);
        assert_eq!(event.y, -0.25);
    }
}
