//! OSC 1.0 message and bundle encoder.
//!
//! Wire format (all multi-byte values are big-endian):
//!
//! ```text
//! string:  UTF-8 bytes + NUL, zero-padded to a multiple of 4
//! message: [address:string][","+typetags:string][arguments...]
//! bundle:  ["#bundle" NUL][timetag:8][size:i32][element]...
//! ```
//!
//! Only the argument types the TUIO cursor profile needs are implemented:
//! `i` (int32), `f` (float32), and `s` (string).  The time tag is always the
//! *immediate* value `1`, which tells receivers to process the bundle on
//! arrival.
//!
//! The encoder cannot fail: sizes are bounded by the datagram the caller
//! builds, and every argument type has a fixed-width encoding.

/// One OSC argument.
#[derive(Debug, Clone, PartialEq)]
pub enum OscArg {
    Int(i32),
    Float(f32),
    Str(String),
}

impl OscArg {
    /// The type tag character for this argument.
    fn type_tag(&self) -> char {
        match self {
            OscArg::Int(_) => 'i',
            OscArg::Float(_) => 'f',
            OscArg::Str(_) => 's',
        }
    }

    /// Appends this argument's encoding to `buf`.
    fn encode_into(&self, buf: &mut Vec<u8>) {
        match self {
            OscArg::Int(value) => buf.extend_from_slice(&value.to_be_bytes()),
            OscArg::Float(value) => buf.extend_from_slice(&value.to_be_bytes()),
            OscArg::Str(value) => write_padded_str(buf, value),
        }
    }
}

/// One OSC message: an address pattern plus an ordered argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct OscMessage {
    address: String,
    args: Vec<OscArg>,
}

impl OscMessage {
    /// Creates an empty message for the given address pattern.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument, builder style.
    pub fn arg(mut self, arg: OscArg) -> Self {
        self.args.push(arg);
        self
    }

    /// Appends one argument in place.
    pub fn push(&mut self, arg: OscArg) {
        self.args.push(arg);
    }

    /// The address pattern.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The argument list, in append order.
    pub fn args(&self) -> &[OscArg] {
        &self.args
    }

    /// Encodes the message into its wire form.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(32);

        write_padded_str(&mut buf, &self.address);

        // Type tag string: ',' followed by one tag character per argument.
        let mut tags = String::with_capacity(self.args.len() + 1);
        tags.push(',');
        for arg in &self.args {
            tags.push(arg.type_tag());
        }
        write_padded_str(&mut buf, &tags);

        for arg in &self.args {
            arg.encode_into(&mut buf);
        }
        buf
    }
}

/// An ordered group of OSC messages sent as one datagram under a shared
/// time tag.
#[derive(Debug, Clone, Default)]
pub struct OscBundle {
    messages: Vec<OscMessage>,
}

/// The immediate time tag: process on arrival.
const TIMETAG_IMMEDIATE: u64 = 1;

/// The bundle identifier string, including its terminating NUL.
const BUNDLE_HEADER: &[u8; 8] = b"#bundle\0";

impl OscBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message; bundle order is send order.
    pub fn push(&mut self, message: OscMessage) {
        self.messages.push(message);
    }

    /// The messages in append order.
    pub fn messages(&self) -> &[OscMessage] {
        &self.messages
    }

    /// Encodes the bundle into one datagram payload.
    ///
    /// Each element is preceded by its byte size as a big-endian `i32`;
    /// element encodings are always multiples of 4, so the cast is exact.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(BUNDLE_HEADER);
        buf.extend_from_slice(&TIMETAG_IMMEDIATE.to_be_bytes());
        for message in &self.messages {
            let bytes = message.encode();
            buf.extend_from_slice(&(bytes.len() as i32).to_be_bytes());
            buf.extend_from_slice(&bytes);
        }
        buf
    }
}

/// Writes `value` as an OSC string: UTF-8 bytes, a terminating NUL, and
/// zero padding up to the next multiple of 4 (always at least one NUL).
fn write_padded_str(buf: &mut Vec<u8>, value: &str) {
    buf.extend_from_slice(value.as_bytes());
    let padding = 4 - (value.len() % 4);
    buf.extend(std::iter::repeat(0u8).take(padding));
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_string_always_terminates_and_aligns() {
        // Arrange: lengths 0..=4 cover every padding case.
        for value in ["", "a", "ab", "abc", "abcd"] {
            let mut buf = Vec::new();

            // Act
            write_padded_str(&mut buf, value);

            // Assert
            assert_eq!(buf.len() % 4, 0, "'{value}' must pad to a multiple of 4");
            assert!(buf.len() > value.len(), "'{value}' must gain at least one NUL");
            assert_eq!(&buf[..value.len()], value.as_bytes());
            assert!(buf[value.len()..].iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_address_of_eleven_chars_encodes_to_twelve_bytes() {
        let mut buf = Vec::new();
        write_padded_str(&mut buf, "/tuio/2Dcur");
        assert_eq!(buf.len(), 12);
    }

    #[test]
    fn test_message_encoding_layout() {
        // Arrange
        let message = OscMessage::new("/ab")
            .arg(OscArg::Str("hi".to_string()))
            .arg(OscArg::Int(5));

        // Act
        let bytes = message.encode();

        // Assert: "/ab\0" + ",si\0" + "hi\0\0" + int32 5
        assert_eq!(&bytes[0..4], b"/ab\0");
        assert_eq!(&bytes[4..8], b",si\0");
        assert_eq!(&bytes[8..12], b"hi\0\0");
        assert_eq!(&bytes[12..16], &5i32.to_be_bytes());
        assert_eq!(bytes.len(), 16);
    }

    #[test]
    fn test_int_argument_is_big_endian() {
        let bytes = OscMessage::new("/i").arg(OscArg::Int(0x0102_0304)).encode();
        let tail = &bytes[bytes.len() - 4..];
        assert_eq!(tail, &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_float_argument_is_big_endian_ieee754() {
        let bytes = OscMessage::new("/f").arg(OscArg::Float(0.5)).encode();
        let tail = &bytes[bytes.len() - 4..];
        // 0.5f32 = 0x3F000000
        assert_eq!(tail, &[0x3F, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_empty_bundle_is_header_and_timetag_only() {
        // Act
        let bytes = OscBundle::new().encode();

        // Assert: 8-byte "#bundle\0" + 8-byte immediate time tag.
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[0..8], b"#bundle\0");
        assert_eq!(&bytes[8..16], &1u64.to_be_bytes());
    }

    #[test]
    fn test_bundle_elements_are_size_prefixed_in_order() {
        // Arrange
        let mut bundle = OscBundle::new();
        bundle.push(OscMessage::new("/one"));
        bundle.push(OscMessage::new("/two").arg(OscArg::Int(9)));

        // Act
        let bytes = bundle.encode();

        // Assert: first element starts at offset 16 with its size prefix.
        let first_size = i32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]) as usize;
        let first = &bytes[20..20 + first_size];
        assert_eq!(&first[0..8], b"/one\0\0\0\0");

        let second_offset = 20 + first_size;
        let second_size = i32::from_be_bytes([
            bytes[second_offset],
            bytes[second_offset + 1],
            bytes[second_offset + 2],
            bytes[second_offset + 3],
        ]) as usize;
        assert_eq!(second_offset + 4 + second_size, bytes.len());
    }

    #[test]
    fn test_message_encodings_are_multiples_of_four() {
        let message = OscMessage::new("/tuio/2Dcur")
            .arg(OscArg::Str("set".to_string()))
            .arg(OscArg::Int(1))
            .arg(OscArg::Float(0.25));
        assert_eq!(message.encode().len() % 4, 0);
    }
}
