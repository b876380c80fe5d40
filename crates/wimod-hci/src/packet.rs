//! HCI packet envelope and message identity.
//!
//! The transport layer (SLIP framing, CRC, serial port) delivers and accepts
//! packets of the form:
//!
//! ```text
//! +-----+----+-------------------+
//! | dst | id | payload[0..n]     |
//! +-----+----+-------------------+
//! ```
//!
//! Responses and indications carry a status byte as the first payload byte.

use std::fmt;

/// Identity of a message: destination endpoint plus message id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageCode {
    /// Destination endpoint (SAP id).
    pub dst: u8,
    /// Message id within the endpoint.
    pub id: u8,
}

impl MessageCode {
    /// Create a message code.
    pub const fn new(dst: u8, id: u8) -> Self {
        MessageCode { dst, id }
    }

    /// 16-bit lookup key: `(dst << 8) | id`.
    pub const fn code(&self) -> u16 {
        ((self.dst as u16) << 8) | self.id as u16
    }
}

impl From<u16> for MessageCode {
    fn from(code: u16) -> Self {
        MessageCode {
            dst: (code >> 8) as u8,
            id: code as u8,
        }
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dst=0x{:02X} id=0x{:02X}", self.dst, self.id)
    }
}

/// A packet as exchanged with the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HciPacket {
    /// Destination endpoint.
    pub dst: u8,
    /// Message id.
    pub id: u8,
    /// Message payload (without dst/id).
    pub payload: Vec<u8>,
}

impl HciPacket {
    /// Create a packet.
    pub fn new(dst: u8, id: u8, payload: Vec<u8>) -> Self {
        HciPacket { dst, id, payload }
    }

    /// Identity of the packet.
    pub fn message_code(&self) -> MessageCode {
        MessageCode::new(self.dst, self.id)
    }
}
