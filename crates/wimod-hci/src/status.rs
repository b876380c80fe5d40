//! Status taxonomy.
//!
//! Two independent tiers of status codes exist on the interface:
//!
//! - the device management tier gates every response and indication packet
//!   as a whole ([`check_devmgmt_status`]);
//! - the LoRaWAN tier is checked inside the individual message decoders
//!   ([`check_lorawan_status`]). Some messages extend it with their own codes.

use std::fmt;

use crate::constants::*;
use crate::error::{HciError, HciResult};

/// Failure reported by the device management status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevMgmtStatus {
    /// Operation failed.
    Error,
    /// Command not supported.
    CmdNotSupported,
    /// Wrong parameter.
    WrongParameter,
    /// Unknown status value.
    Unknown(u8),
}

impl fmt::Display for DevMgmtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevMgmtStatus::Error => write!(f, "DEVMGMT_STATUS_ERROR"),
            DevMgmtStatus::CmdNotSupported => write!(f, "DEVMGMT_STATUS_CMD_NOT_SUPPORTED"),
            DevMgmtStatus::WrongParameter => write!(f, "DEVMGMT_STATUS_WRONG_PARAMETER"),
            DevMgmtStatus::Unknown(code) => write!(f, "unknown status (0x{:02X})", code),
        }
    }
}

impl From<u8> for DevMgmtStatus {
    fn from(code: u8) -> Self {
        match code {
            DEVMGMT_STATUS_ERROR => DevMgmtStatus::Error,
            DEVMGMT_STATUS_CMD_NOT_SUPPORTED => DevMgmtStatus::CmdNotSupported,
            DEVMGMT_STATUS_WRONG_PARAMETER => DevMgmtStatus::WrongParameter,
            _ => DevMgmtStatus::Unknown(code),
        }
    }
}

impl From<DevMgmtStatus> for u8 {
    fn from(status: DevMgmtStatus) -> Self {
        match status {
            DevMgmtStatus::Error => DEVMGMT_STATUS_ERROR,
            DevMgmtStatus::CmdNotSupported => DEVMGMT_STATUS_CMD_NOT_SUPPORTED,
            DevMgmtStatus::WrongParameter => DEVMGMT_STATUS_WRONG_PARAMETER,
            DevMgmtStatus::Unknown(code) => code,
        }
    }
}

/// Failure reported by a LoRaWAN message status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoRaWanStatus {
    /// Operation failed.
    Error,
    /// Command not supported.
    CmdNotSupported,
    /// Wrong parameter.
    WrongParameter,
    /// Any other status value. Message-specific codes such as
    /// `LORAWAN_STATUS_CHANNEL_BLOCKED` land here unless the decoder
    /// handles them itself.
    Unknown(u8),
}

impl fmt::Display for LoRaWanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoRaWanStatus::Error => write!(f, "LORAWAN_STATUS_ERROR"),
            LoRaWanStatus::CmdNotSupported => write!(f, "LORAWAN_STATUS_CMD_NOT_SUPPORTED"),
            LoRaWanStatus::WrongParameter => write!(f, "LORAWAN_STATUS_WRONG_PARAMETER"),
            LoRaWanStatus::Unknown(code) => match lorawan_status_name(*code) {
                Some(name) => write!(f, "unknown status (0x{:02X}, {})", code, name),
                None => write!(f, "unknown status (0x{:02X})", code),
            },
        }
    }
}

impl From<u8> for LoRaWanStatus {
    fn from(code: u8) -> Self {
        match code {
            LORAWAN_STATUS_ERROR => LoRaWanStatus::Error,
            LORAWAN_STATUS_CMD_NOT_SUPPORTED => LoRaWanStatus::CmdNotSupported,
            LORAWAN_STATUS_WRONG_PARAMETER => LoRaWanStatus::WrongParameter,
            _ => LoRaWanStatus::Unknown(code),
        }
    }
}

impl From<LoRaWanStatus> for u8 {
    fn from(status: LoRaWanStatus) -> Self {
        match status {
            LoRaWanStatus::Error => LORAWAN_STATUS_ERROR,
            LoRaWanStatus::CmdNotSupported => LORAWAN_STATUS_CMD_NOT_SUPPORTED,
            LoRaWanStatus::WrongParameter => LORAWAN_STATUS_WRONG_PARAMETER,
            LoRaWanStatus::Unknown(code) => code,
        }
    }
}

/// Map a device management status byte to an outcome.
pub fn check_devmgmt_status(status: u8) -> HciResult<()> {
    if status == DEVMGMT_STATUS_OK {
        Ok(())
    } else {
        Err(HciError::DeviceStatus(DevMgmtStatus::from(status)))
    }
}

/// Map a LoRaWAN status byte to an outcome.
pub fn check_lorawan_status(status: u8) -> HciResult<()> {
    if status == LORAWAN_STATUS_OK {
        Ok(())
    } else {
        Err(HciError::LoRaWanStatus(LoRaWanStatus::from(status)))
    }
}

/// Name of a LoRaWAN status value, for diagnostics.
pub fn lorawan_status_name(status: u8) -> Option<&'static str> {
    let name = match status {
        LORAWAN_STATUS_OK => "LORAWAN_STATUS_OK",
        LORAWAN_STATUS_ERROR => "LORAWAN_STATUS_ERROR",
        LORAWAN_STATUS_CMD_NOT_SUPPORTED => "LORAWAN_STATUS_CMD_NOT_SUPPORTED",
        LORAWAN_STATUS_WRONG_PARAMETER => "LORAWAN_STATUS_WRONG_PARAMETER",
        LORAWAN_STATUS_WRONG_DEVICE_MODE => "LORAWAN_STATUS_WRONG_DEVICE_MODE",
        LORAWAN_STATUS_NOT_ACTIVATED => "LORAWAN_STATUS_NOT_ACTIVATED",
        LORAWAN_STATUS_BUSY => "LORAWAN_STATUS_BUSY",
        LORAWAN_STATUS_QUEUE_FULL => "LORAWAN_STATUS_QUEUE_FULL",
        LORAWAN_STATUS_LENGTH_ERROR => "LORAWAN_STATUS_LENGTH_ERROR",
        LORAWAN_STATUS_NO_FACTORY_SETTINGS => "LORAWAN_STATUS_NO_FACTORY_SETTINGS",
        LORAWAN_STATUS_CHANNEL_BLOCKED => "LORAWAN_STATUS_CHANNEL_BLOCKED",
        LORAWAN_STATUS_CHANNEL_NOT_AVAILABLE => "LORAWAN_STATUS_CHANNEL_NOT_AVAILABLE",
        _ => return None,
    };
    Some(name)
}
