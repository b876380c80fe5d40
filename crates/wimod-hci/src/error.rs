//! Codec error types.

use thiserror::Error;

use crate::packet::MessageCode;
use crate::status::{DevMgmtStatus, LoRaWanStatus};

/// Errors that can occur when encoding or decoding HCI messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HciError {
    /// Response packet does not belong to the expected response type.
    #[error("wrong dst or id: expected {expected}, got {actual}")]
    IdentityMismatch {
        /// Identity of the expected response.
        expected: MessageCode,
        /// Identity found in the packet.
        actual: MessageCode,
    },

    /// Device management status gate rejected the packet.
    #[error("device management status: {0}")]
    DeviceStatus(DevMgmtStatus),

    /// Message-level LoRaWAN status indicates a failure.
    #[error("LoRaWAN status: {0}")]
    LoRaWanStatus(LoRaWanStatus),

    /// Channel blocked by duty cycle regulation.
    #[error("LORAWAN_STATUS_CHANNEL_BLOCKED: remaining time {remaining_time} ms")]
    ChannelBlocked {
        /// Time until the channel becomes available, in milliseconds.
        remaining_time: u32,
    },

    /// TX indication reported an error status.
    #[error("indication {code} reported error status 0x{status:02X}")]
    IndicationError {
        /// Identity of the indication.
        code: MessageCode,
        /// Raw status byte received.
        status: u8,
    },

    /// Packet is not an indication.
    #[error("packet is not an event: {0}")]
    NotAnIndication(MessageCode),

    /// Indication code has no decoder registered.
    #[error("no decoder registered for indication {0}")]
    UnregisteredIndication(MessageCode),

    /// Payload is shorter than the message layout requires.
    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort {
        /// Minimum length required.
        expected: usize,
        /// Actual length available.
        actual: usize,
    },

    /// Payload does not fit into a single message.
    #[error("payload too large: maximum {max} bytes, got {actual}")]
    PayloadTooLarge {
        /// Maximum allowed length.
        max: usize,
        /// Actual length.
        actual: usize,
    },

    /// Invalid hex string for an EUI or key.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// Result type alias for codec operations.
pub type HciResult<T> = Result<T, HciError>;
