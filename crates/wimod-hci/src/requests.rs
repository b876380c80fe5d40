//! Requests that can be sent to the LoRaWAN endpoint.

use std::fmt;

use bytes::BufMut;

use crate::constants::*;
use crate::error::{HciError, HciResult};
use crate::message::{impl_hci_message, Request};
use crate::types::*;

/// Activate the device via ABP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivateDeviceReq {
    /// Device address.
    pub address: u32,
    /// Application session key.
    pub app_s_key: Key,
    /// Network session key.
    pub nwk_s_key: Key,
}

impl ActivateDeviceReq {
    /// Create an activation request.
    pub fn new(address: u32, app_s_key: Key, nwk_s_key: Key) -> Self {
        ActivateDeviceReq {
            address,
            app_s_key,
            nwk_s_key,
        }
    }
}

/// Set the OTAA join parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetJoinParamReq {
    /// Application EUI.
    pub app_eui: Eui,
    /// Application key.
    pub app_key: Key,
}

impl SetJoinParamReq {
    /// Create a join parameter request.
    pub fn new(app_eui: Eui, app_key: Key) -> Self {
        SetJoinParamReq { app_eui, app_key }
    }
}

/// Start an OTAA join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoinNetworkReq;

/// Send unconfirmed uplink data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendUDataReq {
    /// LoRaWAN port.
    pub port: u8,
    /// Application payload.
    pub payload: Vec<u8>,
}

impl SendUDataReq {
    /// Create an unconfirmed uplink request.
    pub fn new(port: u8, payload: Vec<u8>) -> Self {
        SendUDataReq { port, payload }
    }
}

/// Send confirmed uplink data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCDataReq {
    /// LoRaWAN port.
    pub port: u8,
    /// Application payload.
    pub payload: Vec<u8>,
}

impl SendCDataReq {
    /// Create a confirmed uplink request.
    pub fn new(port: u8, payload: Vec<u8>) -> Self {
        SendCDataReq { port, payload }
    }
}

/// Set the radio stack configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetRStackConfigReq {
    /// Configuration to apply.
    pub config: RStackConfig,
}

impl SetRStackConfigReq {
    /// Create a configuration request.
    pub fn new(config: RStackConfig) -> Self {
        SetRStackConfigReq { config }
    }
}

/// Get the radio stack configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GetRStackConfigReq;

/// Reactivate a previously activated device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReactivateDeviceReq;

/// Deactivate the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeactivateDeviceReq;

/// Restore the LoRaWAN factory settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FactoryResetReq;

/// Set the device EUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetDeviceEuiReq {
    /// New device EUI.
    pub eui: Eui,
}

impl SetDeviceEuiReq {
    /// Create a device EUI request.
    pub fn new(eui: Eui) -> Self {
        SetDeviceEuiReq { eui }
    }
}

/// Get the device EUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GetDeviceEuiReq;

/// Get the network status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GetNwkStatusReq;

impl_hci_message! {
    ActivateDeviceReq => (LORAWAN_SAP_ID, LORAWAN_MSG_ACTIVATE_DEVICE_REQ),
    SetJoinParamReq => (LORAWAN_SAP_ID, LORAWAN_MSG_SET_JOIN_PARAM_REQ),
    JoinNetworkReq => (LORAWAN_SAP_ID, LORAWAN_MSG_JOIN_NETWORK_REQ),
    SendUDataReq => (LORAWAN_SAP_ID, LORAWAN_MSG_SEND_UDATA_REQ),
    SendCDataReq => (LORAWAN_SAP_ID, LORAWAN_MSG_SEND_CDATA_REQ),
    SetRStackConfigReq => (LORAWAN_SAP_ID, LORAWAN_MSG_SET_RSTACK_CONFIG_REQ),
    GetRStackConfigReq => (LORAWAN_SAP_ID, LORAWAN_MSG_GET_RSTACK_CONFIG_REQ),
    ReactivateDeviceReq => (LORAWAN_SAP_ID, LORAWAN_MSG_REACTIVATE_DEVICE_REQ),
    DeactivateDeviceReq => (LORAWAN_SAP_ID, LORAWAN_MSG_DEACTIVATE_DEVICE_REQ),
    FactoryResetReq => (LORAWAN_SAP_ID, LORAWAN_MSG_FACTORY_RESET_REQ),
    SetDeviceEuiReq => (LORAWAN_SAP_ID, LORAWAN_MSG_SET_DEVICE_EUI_REQ),
    GetDeviceEuiReq => (LORAWAN_SAP_ID, LORAWAN_MSG_GET_DEVICE_EUI_REQ),
    GetNwkStatusReq => (LORAWAN_SAP_ID, LORAWAN_MSG_GET_NWK_STATUS_REQ),
}

// ============================================================================
// Encoding
// ============================================================================

impl Request for ActivateDeviceReq {
    /// Format: address(4) + nwk_s_key(16) + app_s_key(16)
    fn encode(&self) -> HciResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(4 + 2 * KEY_SIZE);
        buf.put_u32_le(self.address);
        encode_key(&mut buf, &self.nwk_s_key);
        encode_key(&mut buf, &self.app_s_key);
        Ok(buf)
    }
}

impl Request for SetJoinParamReq {
    /// Format: app_eui(8) + app_key(16)
    fn encode(&self) -> HciResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(EUI_SIZE + KEY_SIZE);
        encode_eui(&mut buf, &self.app_eui);
        encode_key(&mut buf, &self.app_key);
        Ok(buf)
    }
}

fn encode_uplink(port: u8, payload: &[u8]) -> HciResult<Vec<u8>> {
    if payload.len() > MAX_APP_PAYLOAD_SIZE {
        return Err(HciError::PayloadTooLarge {
            max: MAX_APP_PAYLOAD_SIZE,
            actual: payload.len(),
        });
    }
    let mut buf = Vec::with_capacity(1 + payload.len());
    buf.put_u8(port);
    buf.put_slice(payload);
    Ok(buf)
}

impl Request for SendUDataReq {
    /// Format: port(1) + payload
    fn encode(&self) -> HciResult<Vec<u8>> {
        encode_uplink(self.port, &self.payload)
    }
}

impl Request for SendCDataReq {
    /// Format: port(1) + payload
    fn encode(&self) -> HciResult<Vec<u8>> {
        encode_uplink(self.port, &self.payload)
    }
}

impl Request for SetRStackConfigReq {
    fn encode(&self) -> HciResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(RSTACK_CONFIG_SIZE);
        self.config.encode(&mut buf);
        Ok(buf)
    }
}

impl Request for SetDeviceEuiReq {
    fn encode(&self) -> HciResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(EUI_SIZE);
        encode_eui(&mut buf, &self.eui);
        Ok(buf)
    }
}

macro_rules! empty_request {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Request for $ty {
                fn encode(&self) -> HciResult<Vec<u8>> {
                    Ok(Vec::new())
                }
            }
        )*
    };
}

empty_request!(
    JoinNetworkReq,
    GetRStackConfigReq,
    ReactivateDeviceReq,
    DeactivateDeviceReq,
    FactoryResetReq,
    GetDeviceEuiReq,
    GetNwkStatusReq,
);

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for ActivateDeviceReq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActivateDeviceReq[Address: {:08X}]", self.address)
    }
}

impl fmt::Display for SetJoinParamReq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SetJoinParamReq[AppEUI: {}]", self.app_eui)
    }
}

impl fmt::Display for SendUDataReq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SendUDataReq[Port: {}, Payload: 0x{}]",
            self.port,
            hex::encode_upper(&self.payload)
        )
    }
}

impl fmt::Display for SendCDataReq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SendCDataReq[Port: {}, Payload: 0x{}]",
            self.port,
            hex::encode_upper(&self.payload)
        )
    }
}
