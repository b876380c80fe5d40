//! Protocol constants
//!
//! Endpoint identifiers, message identifiers, status values and bit positions
//! used by the WiMOD LoRaWAN host controller interface.

use crate::packet::MessageCode;

// ============================================================================
// Endpoint (SAP) Identifiers
// ============================================================================

/// Device management endpoint.
pub const DEVMGMT_SAP_ID: u8 = 0x01;
/// LoRaWAN endpoint.
pub const LORAWAN_SAP_ID: u8 = 0x10;

// ============================================================================
// Device Management Status Codes
// ============================================================================

/// Operation successful.
pub const DEVMGMT_STATUS_OK: u8 = 0x00;
/// Operation failed.
pub const DEVMGMT_STATUS_ERROR: u8 = 0x01;
/// Command is not supported.
pub const DEVMGMT_STATUS_CMD_NOT_SUPPORTED: u8 = 0x02;
/// HCI message contains a wrong parameter.
pub const DEVMGMT_STATUS_WRONG_PARAMETER: u8 = 0x03;

// ============================================================================
// LoRaWAN Status Codes
// ============================================================================

/// Operation successful.
pub const LORAWAN_STATUS_OK: u8 = 0x00;
/// Operation failed.
pub const LORAWAN_STATUS_ERROR: u8 = 0x01;
/// Command is not supported.
pub const LORAWAN_STATUS_CMD_NOT_SUPPORTED: u8 = 0x02;
/// HCI message contains a wrong parameter.
pub const LORAWAN_STATUS_WRONG_PARAMETER: u8 = 0x03;
/// Stack is running in a wrong mode.
pub const LORAWAN_STATUS_WRONG_DEVICE_MODE: u8 = 0x04;
/// Device is not activated.
pub const LORAWAN_STATUS_NOT_ACTIVATED: u8 = 0x05;
/// Device is busy, command rejected.
pub const LORAWAN_STATUS_BUSY: u8 = 0x06;
/// Message queue is full, command rejected.
pub const LORAWAN_STATUS_QUEUE_FULL: u8 = 0x07;
/// HCI message length is invalid or radio payload size is too large.
pub const LORAWAN_STATUS_LENGTH_ERROR: u8 = 0x08;
/// Factory settings EEPROM block missing.
pub const LORAWAN_STATUS_NO_FACTORY_SETTINGS: u8 = 0x09;
/// Channel blocked by duty cycle, followed by the remaining time in ms.
pub const LORAWAN_STATUS_CHANNEL_BLOCKED: u8 = 0x0A;
/// No channel available (e.g. no channel defined for the configured data rate).
pub const LORAWAN_STATUS_CHANNEL_NOT_AVAILABLE: u8 = 0x0B;

// ============================================================================
// LoRaWAN Message Identifiers
// ============================================================================

/// Activate device via ABP.
pub const LORAWAN_MSG_ACTIVATE_DEVICE_REQ: u8 = 0x01;
/// Response to an ABP activation.
pub const LORAWAN_MSG_ACTIVATE_DEVICE_RSP: u8 = 0x02;
/// Set OTAA join parameters.
pub const LORAWAN_MSG_SET_JOIN_PARAM_REQ: u8 = 0x05;
/// Response to setting the join parameters.
pub const LORAWAN_MSG_SET_JOIN_PARAM_RSP: u8 = 0x06;
/// Start an OTAA join.
pub const LORAWAN_MSG_JOIN_NETWORK_REQ: u8 = 0x09;
/// Join request accepted by the stack.
pub const LORAWAN_MSG_JOIN_NETWORK_RSP: u8 = 0x0A;
/// Join request radio packet transmitted.
pub const LORAWAN_MSG_JOIN_NETWORK_TX_IND: u8 = 0x0B;
/// Network join completed.
pub const LORAWAN_MSG_JOIN_NETWORK_IND: u8 = 0x0C;
/// Send unconfirmed uplink data.
pub const LORAWAN_MSG_SEND_UDATA_REQ: u8 = 0x0D;
/// Unconfirmed uplink accepted by the stack.
pub const LORAWAN_MSG_SEND_UDATA_RSP: u8 = 0x0E;
/// Unconfirmed uplink radio packet transmitted.
pub const LORAWAN_MSG_SEND_UDATA_TX_IND: u8 = 0x0F;
/// Unconfirmed downlink data received.
pub const LORAWAN_MSG_RECV_UDATA_IND: u8 = 0x10;
/// Send confirmed uplink data.
pub const LORAWAN_MSG_SEND_CDATA_REQ: u8 = 0x11;
/// Confirmed uplink accepted by the stack.
pub const LORAWAN_MSG_SEND_CDATA_RSP: u8 = 0x12;
/// Confirmed uplink radio packet transmitted.
pub const LORAWAN_MSG_SEND_CDATA_TX_IND: u8 = 0x13;
/// Confirmed downlink data received.
pub const LORAWAN_MSG_RECV_CDATA_IND: u8 = 0x14;
/// Acknowledgement for a confirmed uplink received.
pub const LORAWAN_MSG_RECV_ACK_IND: u8 = 0x15;
/// Receive window closed without downlink data.
pub const LORAWAN_MSG_RECV_NO_DATA_IND: u8 = 0x16;
/// Set the radio stack configuration.
pub const LORAWAN_MSG_SET_RSTACK_CONFIG_REQ: u8 = 0x19;
/// Response to setting the radio stack configuration.
pub const LORAWAN_MSG_SET_RSTACK_CONFIG_RSP: u8 = 0x1A;
/// Get the radio stack configuration.
pub const LORAWAN_MSG_GET_RSTACK_CONFIG_REQ: u8 = 0x1B;
/// Radio stack configuration.
pub const LORAWAN_MSG_GET_RSTACK_CONFIG_RSP: u8 = 0x1C;
/// Reactivate a previously activated device.
pub const LORAWAN_MSG_REACTIVATE_DEVICE_REQ: u8 = 0x1D;
/// Response to a reactivation, carries the device address.
pub const LORAWAN_MSG_REACTIVATE_DEVICE_RSP: u8 = 0x1E;
/// Deactivate the device.
pub const LORAWAN_MSG_DEACTIVATE_DEVICE_REQ: u8 = 0x21;
/// Response to a deactivation.
pub const LORAWAN_MSG_DEACTIVATE_DEVICE_RSP: u8 = 0x22;
/// Restore the LoRaWAN factory settings.
pub const LORAWAN_MSG_FACTORY_RESET_REQ: u8 = 0x23;
/// Response to a factory reset.
pub const LORAWAN_MSG_FACTORY_RESET_RSP: u8 = 0x24;
/// Set the device EUI.
pub const LORAWAN_MSG_SET_DEVICE_EUI_REQ: u8 = 0x25;
/// Response to setting the device EUI.
pub const LORAWAN_MSG_SET_DEVICE_EUI_RSP: u8 = 0x26;
/// Get the device EUI.
pub const LORAWAN_MSG_GET_DEVICE_EUI_REQ: u8 = 0x27;
/// Device EUI.
pub const LORAWAN_MSG_GET_DEVICE_EUI_RSP: u8 = 0x28;
/// Get the network status.
pub const LORAWAN_MSG_GET_NWK_STATUS_REQ: u8 = 0x29;
/// Network status.
pub const LORAWAN_MSG_GET_NWK_STATUS_RSP: u8 = 0x2A;

// ============================================================================
// Indication Status Values
// ============================================================================

/// Join request sent.
pub const LORAWAN_MSG_JOIN_NETWORK_TX_IND_STATUS_OK: u8 = 0x00;
/// Join request sent, TX channel info attached.
pub const LORAWAN_MSG_JOIN_NETWORK_TX_IND_STATUS_OK_ATTACHMENT: u8 = 0x01;
/// Any other status value, normalized.
pub const LORAWAN_MSG_JOIN_NETWORK_TX_IND_STATUS_ERROR: u8 = 0x02;

/// Device activated.
pub const LORAWAN_MSG_JOIN_NETWORK_IND_STATUS_OK: u8 = 0x00;
/// Device activated, RX channel info attached.
pub const LORAWAN_MSG_JOIN_NETWORK_IND_STATUS_OK_ATTACHMENT: u8 = 0x01;
/// Any other status value, normalized.
pub const LORAWAN_MSG_JOIN_NETWORK_IND_STATUS_ERROR: u8 = 0x02;

/// Uplink sent.
pub const LORAWAN_MSG_SEND_UDATA_TX_IND_STATUS_OK: u8 = 0x00;
/// Uplink sent, TX channel info attached.
pub const LORAWAN_MSG_SEND_UDATA_TX_IND_STATUS_OK_ATTACHMENT: u8 = 0x01;
/// Any other status value, normalized.
pub const LORAWAN_MSG_SEND_UDATA_TX_IND_STATUS_ERROR: u8 = 0x02;

/// Confirmed uplink sent.
pub const LORAWAN_MSG_SEND_CDATA_TX_IND_STATUS_OK: u8 = 0x00;
/// Confirmed uplink sent, TX channel info attached.
pub const LORAWAN_MSG_SEND_CDATA_TX_IND_STATUS_OK_ATTACHMENT: u8 = 0x01;
/// Any other status value, normalized.
pub const LORAWAN_MSG_SEND_CDATA_TX_IND_STATUS_ERROR: u8 = 0x02;

// ============================================================================
// Receive Indication Format Bits
// ============================================================================

/// RX channel info (or error code) attached.
pub const RECV_FORMAT_ATTACHMENT: u8 = 0x01;
/// ACK for the last confirmed uplink received.
pub const RECV_FORMAT_ACK: u8 = 0x02;
/// Network server has more data pending.
pub const RECV_FORMAT_FRAME_PENDING: u8 = 0x04;

// ============================================================================
// Network Status
// ============================================================================

/// Device is not activated.
pub const LORAWAN_NETWORK_STATUS_INACTIVE: u8 = 0x00;
/// Device activated via ABP.
pub const LORAWAN_NETWORK_STATUS_ACTIVE_ABP: u8 = 0x01;
/// Device activated via OTAA.
pub const LORAWAN_NETWORK_STATUS_ACTIVE_OTAA: u8 = 0x02;
/// OTAA join in progress.
pub const LORAWAN_NETWORK_STATUS_JOINING_OTAA: u8 = 0x03;

// ============================================================================
// Radio Stack Configuration Bits
// ============================================================================

/// Adaptive data rate enabled.
pub const RSTACK_OPTION_ADR: u8 = 1 << 0;
/// Duty cycle control enabled.
pub const RSTACK_OPTION_DUTY_CYCLE_CONTROL: u8 = 1 << 1;
/// Class C device.
pub const RSTACK_OPTION_CLASS_C: u8 = 1 << 2;
/// Forward MAC events to the host.
pub const RSTACK_OPTION_MAC_EVENTS: u8 = 1 << 6;
/// Extended HCI output (attachments on indications).
pub const RSTACK_OPTION_EXTENDED_HCI: u8 = 1 << 7;
/// Automatic power saving enabled.
pub const RSTACK_POWER_SAVING_AUTOMATIC: u8 = 1 << 0;

// ============================================================================
// Sizes
// ============================================================================

/// Size of an EUI in bytes.
pub const EUI_SIZE: usize = 8;
/// Size of an AES-128 key in bytes.
pub const KEY_SIZE: usize = 16;
/// Size of the encoded radio stack configuration.
pub const RSTACK_CONFIG_SIZE: usize = 7;
/// Size of the TX channel info attached to TX indications.
pub const TX_INFO_SIZE: usize = 8;
/// Size of the RX channel info attached to receive indications.
pub const RX_INFO_SIZE: usize = 5;
/// Largest application payload accepted in a single uplink request.
pub const MAX_APP_PAYLOAD_SIZE: usize = 250;

// ============================================================================
// Indication Codes
// ============================================================================

/// Every indication the catalog defines. The dispatch table must contain
/// exactly these codes.
pub const INDICATION_CODES: [MessageCode; 8] = [
    MessageCode::new(LORAWAN_SAP_ID, LORAWAN_MSG_JOIN_NETWORK_TX_IND),
    MessageCode::new(LORAWAN_SAP_ID, LORAWAN_MSG_JOIN_NETWORK_IND),
    MessageCode::new(LORAWAN_SAP_ID, LORAWAN_MSG_SEND_UDATA_TX_IND),
    MessageCode::new(LORAWAN_SAP_ID, LORAWAN_MSG_RECV_UDATA_IND),
    MessageCode::new(LORAWAN_SAP_ID, LORAWAN_MSG_SEND_CDATA_TX_IND),
    MessageCode::new(LORAWAN_SAP_ID, LORAWAN_MSG_RECV_CDATA_IND),
    MessageCode::new(LORAWAN_SAP_ID, LORAWAN_MSG_RECV_ACK_IND),
    MessageCode::new(LORAWAN_SAP_ID, LORAWAN_MSG_RECV_NO_DATA_IND),
];

/// Whether `(dst, id)` names an unsolicited indication rather than a
/// request or response.
pub fn is_indication(dst: u8, id: u8) -> bool {
    let code = MessageCode::new(dst, id);
    INDICATION_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_indication() {
        assert!(is_indication(LORAWAN_SAP_ID, LORAWAN_MSG_JOIN_NETWORK_IND));
        assert!(is_indication(LORAWAN_SAP_ID, LORAWAN_MSG_RECV_NO_DATA_IND));
        assert!(!is_indication(LORAWAN_SAP_ID, LORAWAN_MSG_JOIN_NETWORK_RSP));
        assert!(!is_indication(DEVMGMT_SAP_ID, LORAWAN_MSG_JOIN_NETWORK_IND));
    }

    #[test]
    fn test_indication_codes_unique() {
        for (i, a) in INDICATION_CODES.iter().enumerate() {
            for b in &INDICATION_CODES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
