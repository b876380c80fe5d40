//! Unsolicited indications from the LoRaWAN endpoint.
//!
//! TX and join indications normalize their status byte: only `OK` and
//! `OK_ATTACHMENT` are kept, every other value collapses into a synthetic
//! `ERROR`. Trailing fields are only present with `OK_ATTACHMENT`.
//!
//! The collapsed error is not handled uniformly. `SendUDataTxInd` and
//! `SendCDataTxInd` fail with [`HciError::IndicationError`], while
//! `JoinNetworkTxInd` and `JoinNetworkInd` decode successfully with the
//! `ERROR` status and empty fields. Callers must check the status of the
//! join indications themselves.

use std::fmt;

use crate::constants::*;
use crate::error::{HciError, HciResult};
use crate::message::{impl_hci_message, HciMessage, Indication};
use crate::packet::MessageCode;
use crate::types::*;

/// Join request radio packet transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoinNetworkTxInd {
    /// Normalized status.
    pub status: u8,
    /// TX channel info, zero unless status is `OK_ATTACHMENT`.
    pub tx_info: TxInfo,
}

/// Network join completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoinNetworkInd {
    /// Normalized status.
    pub status: u8,
    /// Assigned device address.
    pub address: u32,
    /// Channel index of the join accept.
    pub channel_idx: u8,
    /// Data rate index of the join accept.
    pub data_rate_idx: u8,
    /// RSSI of the join accept.
    pub rssi: u8,
    /// SNR of the join accept.
    pub snr: u8,
    /// Receive window of the join accept.
    pub rx_slot: u8,
}

/// Unconfirmed uplink radio packet transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SendUDataTxInd {
    /// Normalized status.
    pub status: u8,
    /// TX channel info, zero unless status is `OK_ATTACHMENT`.
    pub tx_info: TxInfo,
}

/// Confirmed uplink radio packet transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SendCDataTxInd {
    /// Normalized status.
    pub status: u8,
    /// TX channel info, zero unless status is `OK_ATTACHMENT`.
    pub tx_info: TxInfo,
}

/// Downlink data received (unconfirmed).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecvUDataInd {
    /// Format byte (`RECV_FORMAT_*` bits).
    pub format: u8,
    /// LoRaWAN port.
    pub port: u8,
    /// Application payload.
    pub payload: Vec<u8>,
    /// RX channel info, when attached.
    pub rx_info: Option<RxInfo>,
}

/// Downlink data received (confirmed).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecvCDataInd {
    /// Format byte (`RECV_FORMAT_*` bits).
    pub format: u8,
    /// LoRaWAN port.
    pub port: u8,
    /// Application payload.
    pub payload: Vec<u8>,
    /// RX channel info, when attached.
    pub rx_info: Option<RxInfo>,
}

/// Acknowledgement for a confirmed uplink received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecvAckInd {
    /// Format byte.
    pub format: u8,
    /// RX channel info, when attached.
    pub rx_info: Option<RxInfo>,
}

/// Receive windows closed without downlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecvNoDataInd {
    /// Format byte.
    pub format: u8,
    /// Error code, when attached.
    pub error_code: Option<u8>,
}

impl_hci_message! {
    JoinNetworkTxInd => (LORAWAN_SAP_ID, LORAWAN_MSG_JOIN_NETWORK_TX_IND),
    JoinNetworkInd => (LORAWAN_SAP_ID, LORAWAN_MSG_JOIN_NETWORK_IND),
    SendUDataTxInd => (LORAWAN_SAP_ID, LORAWAN_MSG_SEND_UDATA_TX_IND),
    SendCDataTxInd => (LORAWAN_SAP_ID, LORAWAN_MSG_SEND_CDATA_TX_IND),
    RecvUDataInd => (LORAWAN_SAP_ID, LORAWAN_MSG_RECV_UDATA_IND),
    RecvCDataInd => (LORAWAN_SAP_ID, LORAWAN_MSG_RECV_CDATA_IND),
    RecvAckInd => (LORAWAN_SAP_ID, LORAWAN_MSG_RECV_ACK_IND),
    RecvNoDataInd => (LORAWAN_SAP_ID, LORAWAN_MSG_RECV_NO_DATA_IND),
}

/// Any decoded indication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyIndication {
    /// Join request transmitted.
    JoinNetworkTx(JoinNetworkTxInd),
    /// Join completed.
    JoinNetwork(JoinNetworkInd),
    /// Unconfirmed uplink transmitted.
    SendUDataTx(SendUDataTxInd),
    /// Confirmed uplink transmitted.
    SendCDataTx(SendCDataTxInd),
    /// Unconfirmed downlink received.
    RecvUData(RecvUDataInd),
    /// Confirmed downlink received.
    RecvCData(RecvCDataInd),
    /// Uplink acknowledged.
    RecvAck(RecvAckInd),
    /// No downlink received.
    RecvNoData(RecvNoDataInd),
}

impl AnyIndication {
    /// Identity of the wrapped indication.
    pub fn code(&self) -> MessageCode {
        match self {
            AnyIndication::JoinNetworkTx(ind) => ind.code(),
            AnyIndication::JoinNetwork(ind) => ind.code(),
            AnyIndication::SendUDataTx(ind) => ind.code(),
            AnyIndication::SendCDataTx(ind) => ind.code(),
            AnyIndication::RecvUData(ind) => ind.code(),
            AnyIndication::RecvCData(ind) => ind.code(),
            AnyIndication::RecvAck(ind) => ind.code(),
            AnyIndication::RecvNoData(ind) => ind.code(),
        }
    }

    /// Status (or format) byte of the wrapped indication.
    pub fn status(&self) -> u8 {
        match self {
            AnyIndication::JoinNetworkTx(ind) => ind.status(),
            AnyIndication::JoinNetwork(ind) => ind.status(),
            AnyIndication::SendUDataTx(ind) => ind.status(),
            AnyIndication::SendCDataTx(ind) => ind.status(),
            AnyIndication::RecvUData(ind) => ind.status(),
            AnyIndication::RecvCData(ind) => ind.status(),
            AnyIndication::RecvAck(ind) => ind.status(),
            AnyIndication::RecvNoData(ind) => ind.status(),
        }
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Keep `OK` and `OK_ATTACHMENT`, collapse everything else into `error`.
fn normalize_status(raw: u8, ok: u8, ok_attachment: u8, error: u8) -> u8 {
    if raw == ok || raw == ok_attachment {
        raw
    } else {
        error
    }
}

/// Shared layout of the TX indications.
/// Format: status(1) [+ channel(1) + data_rate(1) + num_tx(1) + power(1) + airtime(4)]
fn decode_tx_indication(payload: &[u8], ok: u8, ok_attachment: u8, error: u8) -> HciResult<(u8, TxInfo)> {
    let mut reader = PayloadReader::new(payload);
    let status = normalize_status(reader.u8()?, ok, ok_attachment, error);
    let tx_info = if status == ok_attachment {
        TxInfo::decode(&mut reader)?
    } else {
        TxInfo::default()
    };
    Ok((status, tx_info))
}

impl Indication for JoinNetworkTxInd {
    fn decode(payload: &[u8]) -> HciResult<Self> {
        let (status, tx_info) = decode_tx_indication(
            payload,
            LORAWAN_MSG_JOIN_NETWORK_TX_IND_STATUS_OK,
            LORAWAN_MSG_JOIN_NETWORK_TX_IND_STATUS_OK_ATTACHMENT,
            LORAWAN_MSG_JOIN_NETWORK_TX_IND_STATUS_ERROR,
        )?;
        Ok(JoinNetworkTxInd { status, tx_info })
    }

    fn status(&self) -> u8 {
        self.status
    }
}

impl Indication for SendUDataTxInd {
    fn decode(payload: &[u8]) -> HciResult<Self> {
        let raw = PayloadReader::new(payload).u8()?;
        let (status, tx_info) = decode_tx_indication(
            payload,
            LORAWAN_MSG_SEND_UDATA_TX_IND_STATUS_OK,
            LORAWAN_MSG_SEND_UDATA_TX_IND_STATUS_OK_ATTACHMENT,
            LORAWAN_MSG_SEND_UDATA_TX_IND_STATUS_ERROR,
        )?;
        if status == LORAWAN_MSG_SEND_UDATA_TX_IND_STATUS_ERROR {
            return Err(HciError::IndicationError {
                code: Self::CODE,
                status: raw,
            });
        }
        Ok(SendUDataTxInd { status, tx_info })
    }

    fn status(&self) -> u8 {
        self.status
    }
}

impl Indication for SendCDataTxInd {
    fn decode(payload: &[u8]) -> HciResult<Self> {
        let raw = PayloadReader::new(payload).u8()?;
        let (status, tx_info) = decode_tx_indication(
            payload,
            LORAWAN_MSG_SEND_CDATA_TX_IND_STATUS_OK,
            LORAWAN_MSG_SEND_CDATA_TX_IND_STATUS_OK_ATTACHMENT,
            LORAWAN_MSG_SEND_CDATA_TX_IND_STATUS_ERROR,
        )?;
        if status == LORAWAN_MSG_SEND_CDATA_TX_IND_STATUS_ERROR {
            return Err(HciError::IndicationError {
                code: Self::CODE,
                status: raw,
            });
        }
        Ok(SendCDataTxInd { status, tx_info })
    }

    fn status(&self) -> u8 {
        self.status
    }
}

impl Indication for JoinNetworkInd {
    /// Format: status(1) [+ address(4) + channel(1) + data_rate(1) + rssi(1) + snr(1) + rx_slot(1)]
    fn decode(payload: &[u8]) -> HciResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let status = normalize_status(
            reader.u8()?,
            LORAWAN_MSG_JOIN_NETWORK_IND_STATUS_OK,
            LORAWAN_MSG_JOIN_NETWORK_IND_STATUS_OK_ATTACHMENT,
            LORAWAN_MSG_JOIN_NETWORK_IND_STATUS_ERROR,
        );
        let mut ind = JoinNetworkInd {
            status,
            ..Default::default()
        };
        if status == LORAWAN_MSG_JOIN_NETWORK_IND_STATUS_OK_ATTACHMENT {
            ind.address = reader.u32_le()?;
            ind.channel_idx = reader.u8()?;
            ind.data_rate_idx = reader.u8()?;
            ind.rssi = reader.u8()?;
            ind.snr = reader.u8()?;
            ind.rx_slot = reader.u8()?;
        }
        Ok(ind)
    }

    fn status(&self) -> u8 {
        self.status
    }
}

/// Shared layout of the data receive indications.
/// Format: format(1) + port(1) + payload [+ rx_info(5) when attached]
fn decode_recv_data(payload: &[u8]) -> HciResult<(u8, u8, Vec<u8>, Option<RxInfo>)> {
    let mut reader = PayloadReader::new(payload);
    let format = reader.u8()?;
    let port = reader.u8()?;
    if format & RECV_FORMAT_ATTACHMENT == 0 {
        return Ok((format, port, reader.rest().to_vec(), None));
    }
    let data_len = reader
        .remaining()
        .checked_sub(RX_INFO_SIZE)
        .ok_or(HciError::BufferTooShort {
            expected: payload.len() - reader.remaining() + RX_INFO_SIZE,
            actual: payload.len(),
        })?;
    let data = reader.bytes(data_len)?.to_vec();
    let rx_info = RxInfo::decode(&mut reader)?;
    Ok((format, port, data, Some(rx_info)))
}

impl RecvUDataInd {
    /// Whether the server acknowledged the last confirmed uplink.
    pub fn ack_received(&self) -> bool {
        self.format & RECV_FORMAT_ACK != 0
    }

    /// Whether the server has more downlink data pending.
    pub fn frame_pending(&self) -> bool {
        self.format & RECV_FORMAT_FRAME_PENDING != 0
    }
}

impl RecvCDataInd {
    /// Whether the server acknowledged the last confirmed uplink.
    pub fn ack_received(&self) -> bool {
        self.format & RECV_FORMAT_ACK != 0
    }

    /// Whether the server has more downlink data pending.
    pub fn frame_pending(&self) -> bool {
        self.format & RECV_FORMAT_FRAME_PENDING != 0
    }
}

impl Indication for RecvUDataInd {
    fn decode(payload: &[u8]) -> HciResult<Self> {
        let (format, port, payload, rx_info) = decode_recv_data(payload)?;
        Ok(RecvUDataInd {
            format,
            port,
            payload,
            rx_info,
        })
    }

    fn status(&self) -> u8 {
        self.format
    }
}

impl Indication for RecvCDataInd {
    fn decode(payload: &[u8]) -> HciResult<Self> {
        let (format, port, payload, rx_info) = decode_recv_data(payload)?;
        Ok(RecvCDataInd {
            format,
            port,
            payload,
            rx_info,
        })
    }

    fn status(&self) -> u8 {
        self.format
    }
}

impl Indication for RecvAckInd {
    /// Format: format(1) [+ rx_info(5)]
    fn decode(payload: &[u8]) -> HciResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let format = reader.u8()?;
        let rx_info = if format & RECV_FORMAT_ATTACHMENT != 0 {
            Some(RxInfo::decode(&mut reader)?)
        } else {
            None
        };
        Ok(RecvAckInd { format, rx_info })
    }

    fn status(&self) -> u8 {
        self.format
    }
}

impl Indication for RecvNoDataInd {
    /// Format: format(1) [+ error_code(1)]
    fn decode(payload: &[u8]) -> HciResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let format = reader.u8()?;
        let error_code = if format & RECV_FORMAT_ATTACHMENT != 0 {
            Some(reader.u8()?)
        } else {
            None
        };
        Ok(RecvNoDataInd { format, error_code })
    }

    fn status(&self) -> u8 {
        self.format
    }
}

// ============================================================================
// Display
// ============================================================================

fn fmt_tx_indication(f: &mut fmt::Formatter<'_>, name: &str, status: u8, tx: &TxInfo) -> fmt::Result {
    write!(
        f,
        "{}[Status: 0x{:02X}, ChannelIdx: {}, DataRateIdx: {}, NumTxPackets: {}, TRXPowerLevel: {}, RFMessageAirtime: {}]",
        name,
        status,
        tx.channel_idx,
        tx.data_rate_idx,
        tx.num_tx_packets,
        tx.trx_power_level,
        tx.rf_message_airtime
    )
}

impl fmt::Display for JoinNetworkTxInd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tx_indication(f, "JoinNetworkTxInd", self.status, &self.tx_info)
    }
}

impl fmt::Display for SendUDataTxInd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tx_indication(f, "SendUDataTxInd", self.status, &self.tx_info)
    }
}

impl fmt::Display for SendCDataTxInd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_tx_indication(f, "SendCDataTxInd", self.status, &self.tx_info)
    }
}

impl fmt::Display for JoinNetworkInd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "JoinNetworkInd[Status: 0x{:02X}, Address: 0x{:08X}, ChannelIdx: {}, DataRateIdx: {}, RSSI: {}, SNR: {}, RxSlot: {}]",
            self.status,
            self.address,
            self.channel_idx,
            self.data_rate_idx,
            self.rssi,
            self.snr,
            self.rx_slot
        )
    }
}

impl fmt::Display for RecvUDataInd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RecvUDataInd[Port: {}, Payload: 0x{}]",
            self.port,
            hex::encode_upper(&self.payload)
        )
    }
}

impl fmt::Display for RecvCDataInd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RecvCDataInd[Port: {}, Payload: 0x{}]",
            self.port,
            hex::encode_upper(&self.payload)
        )
    }
}

impl fmt::Display for AnyIndication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyIndication::JoinNetworkTx(ind) => fmt::Display::fmt(ind, f),
            AnyIndication::JoinNetwork(ind) => fmt::Display::fmt(ind, f),
            AnyIndication::SendUDataTx(ind) => fmt::Display::fmt(ind, f),
            AnyIndication::SendCDataTx(ind) => fmt::Display::fmt(ind, f),
            AnyIndication::RecvUData(ind) => fmt::Display::fmt(ind, f),
            AnyIndication::RecvCData(ind) => fmt::Display::fmt(ind, f),
            AnyIndication::RecvAck(ind) => write!(f, "RecvAckInd[Format: 0x{:02X}]", ind.format),
            AnyIndication::RecvNoData(ind) => {
                write!(f, "RecvNoDataInd[Format: 0x{:02X}]", ind.format)
            }
        }
    }
}
