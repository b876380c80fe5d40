//! Responses from the LoRaWAN endpoint.
//!
//! Decoders receive the payload after the device management status byte;
//! their first byte is the LoRaWAN status of the message.

use std::fmt;

use crate::constants::*;
use crate::error::{HciError, HciResult};
use crate::message::{impl_hci_message, Response};
use crate::status::check_lorawan_status;
use crate::types::*;

macro_rules! status_only_response {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
            pub struct $name {
                /// LoRaWAN status.
                pub status: u8,
            }

            impl Response for $name {
                fn decode(payload: &[u8]) -> HciResult<Self> {
                    let status = PayloadReader::new(payload).u8()?;
                    check_lorawan_status(status)?;
                    Ok($name { status })
                }

                fn status(&self) -> u8 {
                    self.status
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!(stringify!($name), "[]"))
                }
            }
        )*
    };
}

status_only_response!(
    /// Reply to [`crate::ActivateDeviceReq`].
    ActivateDeviceResp,
    /// Reply to [`crate::SetJoinParamReq`].
    SetJoinParamResp,
    /// Reply to [`crate::JoinNetworkReq`]; the join outcome follows as indications.
    JoinNetworkResp,
    /// Reply to [`crate::SetRStackConfigReq`].
    SetRStackConfigResp,
    /// Reply to [`crate::DeactivateDeviceReq`].
    DeactivateDeviceResp,
    /// Reply to [`crate::FactoryResetReq`].
    FactoryResetResp,
    /// Reply to [`crate::SetDeviceEuiReq`].
    SetDeviceEuiResp,
);

/// Reply to [`crate::SendUDataReq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SendUDataResp {
    /// LoRaWAN status.
    pub status: u8,
}

/// Reply to [`crate::SendCDataReq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SendCDataResp {
    /// LoRaWAN status.
    pub status: u8,
}

/// Reply to [`crate::GetRStackConfigReq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GetRStackConfigResp {
    /// LoRaWAN status.
    pub status: u8,
    /// Current radio stack configuration.
    pub config: RStackConfig,
}

/// Reply to [`crate::ReactivateDeviceReq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReactivateDeviceResp {
    /// LoRaWAN status.
    pub status: u8,
    /// Device address.
    pub address: u32,
}

/// Reply to [`crate::GetDeviceEuiReq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GetDeviceEuiResp {
    /// LoRaWAN status.
    pub status: u8,
    /// Device EUI.
    pub eui: Eui,
}

/// Reply to [`crate::GetNwkStatusReq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GetNwkStatusResp {
    /// LoRaWAN status.
    pub status: u8,
    /// Network status. Address, data rate, power level and payload size are
    /// only filled in while the device is active.
    pub network: NetworkStatus,
}

impl_hci_message! {
    ActivateDeviceResp => (LORAWAN_SAP_ID, LORAWAN_MSG_ACTIVATE_DEVICE_RSP),
    SetJoinParamResp => (LORAWAN_SAP_ID, LORAWAN_MSG_SET_JOIN_PARAM_RSP),
    JoinNetworkResp => (LORAWAN_SAP_ID, LORAWAN_MSG_JOIN_NETWORK_RSP),
    SendUDataResp => (LORAWAN_SAP_ID, LORAWAN_MSG_SEND_UDATA_RSP),
    SendCDataResp => (LORAWAN_SAP_ID, LORAWAN_MSG_SEND_CDATA_RSP),
    SetRStackConfigResp => (LORAWAN_SAP_ID, LORAWAN_MSG_SET_RSTACK_CONFIG_RSP),
    GetRStackConfigResp => (LORAWAN_SAP_ID, LORAWAN_MSG_GET_RSTACK_CONFIG_RSP),
    ReactivateDeviceResp => (LORAWAN_SAP_ID, LORAWAN_MSG_REACTIVATE_DEVICE_RSP),
    DeactivateDeviceResp => (LORAWAN_SAP_ID, LORAWAN_MSG_DEACTIVATE_DEVICE_RSP),
    FactoryResetResp => (LORAWAN_SAP_ID, LORAWAN_MSG_FACTORY_RESET_RSP),
    SetDeviceEuiResp => (LORAWAN_SAP_ID, LORAWAN_MSG_SET_DEVICE_EUI_RSP),
    GetDeviceEuiResp => (LORAWAN_SAP_ID, LORAWAN_MSG_GET_DEVICE_EUI_RSP),
    GetNwkStatusResp => (LORAWAN_SAP_ID, LORAWAN_MSG_GET_NWK_STATUS_RSP),
}

// ============================================================================
// Decoding
// ============================================================================

/// Uplink replies: `CHANNEL_BLOCKED` carries the remaining blocking time and
/// is reported on its own, every other failure goes through the generic
/// status check.
fn decode_uplink_status(payload: &[u8]) -> HciResult<u8> {
    let mut reader = PayloadReader::new(payload);
    let status = reader.u8()?;
    match status {
        LORAWAN_STATUS_OK => Ok(status),
        LORAWAN_STATUS_CHANNEL_BLOCKED => {
            let remaining_time = reader.u32_le()?;
            Err(HciError::ChannelBlocked { remaining_time })
        }
        _ => {
            check_lorawan_status(status)?;
            Ok(status)
        }
    }
}

impl Response for SendUDataResp {
    fn decode(payload: &[u8]) -> HciResult<Self> {
        let status = decode_uplink_status(payload)?;
        Ok(SendUDataResp { status })
    }

    fn status(&self) -> u8 {
        self.status
    }
}

impl Response for SendCDataResp {
    fn decode(payload: &[u8]) -> HciResult<Self> {
        let status = decode_uplink_status(payload)?;
        Ok(SendCDataResp { status })
    }

    fn status(&self) -> u8 {
        self.status
    }
}

impl Response for GetRStackConfigResp {
    /// Format: status(1) + data_rate(1) + power(1) + options(1) +
    /// power_saving(1) + max_retrans(1) + band(1) + mac_capacity(1)
    fn decode(payload: &[u8]) -> HciResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let status = reader.u8()?;
        check_lorawan_status(status)?;
        let config = RStackConfig::decode(&mut reader)?;
        Ok(GetRStackConfigResp { status, config })
    }

    fn status(&self) -> u8 {
        self.status
    }
}

impl Response for ReactivateDeviceResp {
    /// Format: status(1) + address(4)
    fn decode(payload: &[u8]) -> HciResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let status = reader.u8()?;
        check_lorawan_status(status)?;
        let address = reader.u32_le()?;
        Ok(ReactivateDeviceResp { status, address })
    }

    fn status(&self) -> u8 {
        self.status
    }
}

impl Response for GetDeviceEuiResp {
    /// Format: status(1) + eui(8)
    fn decode(payload: &[u8]) -> HciResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let status = reader.u8()?;
        check_lorawan_status(status)?;
        let eui = reader.eui()?;
        Ok(GetDeviceEuiResp { status, eui })
    }

    fn status(&self) -> u8 {
        self.status
    }
}

impl Response for GetNwkStatusResp {
    /// Format: status(1) + network_status(1)
    /// [+ address(4) + data_rate(1) + power(1) + max_payload(1) while active]
    fn decode(payload: &[u8]) -> HciResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let status = reader.u8()?;
        check_lorawan_status(status)?;

        let mut network = NetworkStatus {
            network_status: reader.u8()?,
            ..Default::default()
        };
        if network.is_active() {
            network.address = reader.u32_le()?;
            network.data_rate_idx = reader.u8()?;
            network.power_level = reader.u8()?;
            network.max_payload_size = reader.u8()?;
        }
        Ok(GetNwkStatusResp { status, network })
    }

    fn status(&self) -> u8 {
        self.status
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for SendUDataResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SendUDataResp[Status: 0x{:02X}]", self.status)
    }
}

impl fmt::Display for SendCDataResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SendCDataResp[Status: 0x{:02X}]", self.status)
    }
}

impl fmt::Display for GetRStackConfigResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.config;
        write!(
            f,
            "GetRStackConfigResp[DefaultDataRateIdx: {}, TXPowerLevel: {}, AdaptiveDataRate: {}, \
             DutyCycleControl: {}, ClassC: {}, MACEvents: {}, ExtendedHCI: {}, \
             AutomaticPowerSaving: {}, MaxRetransmissions: {}, BandIdx: {}, HeaderMACCmdCapacity: {}]",
            c.default_data_rate_idx,
            c.tx_power_level,
            c.adaptive_data_rate,
            c.duty_cycle_control,
            c.class_c,
            c.mac_events,
            c.extended_hci,
            c.automatic_power_saving,
            c.max_retransmissions,
            c.band_idx,
            c.header_mac_cmd_capacity
        )
    }
}

impl fmt::Display for ReactivateDeviceResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReactivateDeviceResp[Address: 0x{:08X}]", self.address)
    }
}

impl fmt::Display for GetDeviceEuiResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GetDeviceEUIResp[EUI: {}]", self.eui)
    }
}

impl fmt::Display for GetNwkStatusResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = &self.network;
        write!(
            f,
            "GetNwkStatusResp[NetworkStatus: 0x{:02X}, Address: 0x{:08X}, DataRateIdx: {}, PowerLevel: {}, MaxPayloadSize: {}]",
            n.network_status, n.address, n.data_rate_idx, n.power_level, n.max_payload_size
        )
    }
}
