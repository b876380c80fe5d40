//! Common types and primitive field codecs.

use std::fmt;
use std::str::FromStr;

use bytes::{Buf, BufMut};

use crate::constants::*;
use crate::error::{HciError, HciResult};

/// An 8-byte extended unique identifier (device EUI, application EUI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Eui(pub [u8; EUI_SIZE]);

impl Eui {
    /// Create a new EUI from bytes.
    pub fn new(bytes: [u8; EUI_SIZE]) -> Self {
        Eui(bytes)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; EUI_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for Eui {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Eui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Eui {
    type Err = HciError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex::<EUI_SIZE>(s).map(Eui)
    }
}

/// A 16-byte AES-128 key (application key, session keys).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Key(pub [u8; KEY_SIZE]);

impl Key {
    /// Create a new key from bytes.
    pub fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Key(bytes)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Keys are secrets; only the length shows up in debug output.
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key([{} bytes])", KEY_SIZE)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Key {
    type Err = HciError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex::<KEY_SIZE>(s).map(Key)
    }
}

fn parse_hex<const N: usize>(s: &str) -> HciResult<[u8; N]> {
    let bytes = hex::decode(s.trim()).map_err(|e| HciError::InvalidHex(e.to_string()))?;
    if bytes.len() != N {
        return Err(HciError::InvalidHex(format!(
            "expected {} bytes, got {}",
            N,
            bytes.len()
        )));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

#[cfg(feature = "serde")]
mod hex_serde {
    use super::{Eui, Key};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    macro_rules! hex_string_serde {
        ($ty:ty) => {
            impl Serialize for $ty {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    serializer.serialize_str(&hex::encode(self.0))
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    let s = String::deserialize(deserializer)?;
                    s.parse().map_err(serde::de::Error::custom)
                }
            }
        };
    }

    hex_string_serde!(Eui);
    hex_string_serde!(Key);
}

// ============================================================================
// Primitive Codecs
// ============================================================================

/// Append an EUI (8 bytes, transmitted order).
pub fn encode_eui<B: BufMut>(buf: &mut B, eui: &Eui) {
    buf.put_slice(&eui.0);
}

/// Read an EUI from the start of `data`.
pub fn decode_eui(data: &[u8]) -> HciResult<Eui> {
    PayloadReader::new(data).eui()
}

/// Append a key (16 bytes, transmitted order).
pub fn encode_key<B: BufMut>(buf: &mut B, key: &Key) {
    buf.put_slice(&key.0);
}

/// Read a key from the start of `data`.
pub fn decode_key(data: &[u8]) -> HciResult<Key> {
    PayloadReader::new(data).key()
}

/// Bounds-checked cursor over a message payload.
///
/// Every read fails with [`HciError::BufferTooShort`] instead of panicking
/// when the payload ends early.
#[derive(Debug, Clone)]
pub struct PayloadReader<'a> {
    buf: &'a [u8],
    len: usize,
}

impl<'a> PayloadReader<'a> {
    /// Create a reader over `data`.
    pub fn new(data: &'a [u8]) -> Self {
        PayloadReader {
            buf: data,
            len: data.len(),
        }
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn ensure(&self, n: usize) -> HciResult<()> {
        if self.buf.remaining() < n {
            return Err(HciError::BufferTooShort {
                expected: self.len - self.buf.remaining() + n,
                actual: self.len,
            });
        }
        Ok(())
    }

    /// Read one byte.
    pub fn u8(&mut self) -> HciResult<u8> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    /// Read one signed byte.
    pub fn i8(&mut self) -> HciResult<i8> {
        self.ensure(1)?;
        Ok(self.buf.get_i8())
    }

    /// Read a little-endian `u32`.
    pub fn u32_le(&mut self) -> HciResult<u32> {
        self.ensure(4)?;
        Ok(self.buf.get_u32_le())
    }

    /// Read a fixed-size byte array.
    pub fn array<const N: usize>(&mut self) -> HciResult<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        self.buf.copy_to_slice(&mut out);
        Ok(out)
    }

    /// Read an EUI.
    pub fn eui(&mut self) -> HciResult<Eui> {
        self.array::<EUI_SIZE>().map(Eui)
    }

    /// Read a key.
    pub fn key(&mut self) -> HciResult<Key> {
        self.array::<KEY_SIZE>().map(Key)
    }

    /// Read exactly `n` bytes.
    pub fn bytes(&mut self, n: usize) -> HciResult<&'a [u8]> {
        self.ensure(n)?;
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    /// Consume and return everything left.
    pub fn rest(&mut self) -> &'a [u8] {
        let rest = self.buf;
        self.buf = &[];
        rest
    }
}

// ============================================================================
// Records
// ============================================================================

/// Radio stack configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RStackConfig {
    /// Default data rate index.
    pub default_data_rate_idx: u8,
    /// Default TX power level (dBm).
    pub tx_power_level: u8,
    /// Adaptive data rate.
    pub adaptive_data_rate: bool,
    /// Duty cycle control.
    pub duty_cycle_control: bool,
    /// Class C device.
    pub class_c: bool,
    /// Forward MAC events.
    pub mac_events: bool,
    /// Extended HCI output.
    pub extended_hci: bool,
    /// Automatic power saving.
    pub automatic_power_saving: bool,
    /// Maximum number of retransmissions for confirmed uplinks.
    pub max_retransmissions: u8,
    /// Band index.
    pub band_idx: u8,
    /// Header MAC command capacity.
    pub header_mac_cmd_capacity: u8,
}

impl RStackConfig {
    /// Pack the boolean options into the configuration byte.
    pub fn options(&self) -> u8 {
        let mut options = 0;
        if self.adaptive_data_rate {
            options |= RSTACK_OPTION_ADR;
        }
        if self.duty_cycle_control {
            options |= RSTACK_OPTION_DUTY_CYCLE_CONTROL;
        }
        if self.class_c {
            options |= RSTACK_OPTION_CLASS_C;
        }
        if self.mac_events {
            options |= RSTACK_OPTION_MAC_EVENTS;
        }
        if self.extended_hci {
            options |= RSTACK_OPTION_EXTENDED_HCI;
        }
        options
    }

    /// Append the 7-byte wire layout.
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.default_data_rate_idx);
        buf.put_u8(self.tx_power_level);
        buf.put_u8(self.options());
        buf.put_u8(if self.automatic_power_saving {
            RSTACK_POWER_SAVING_AUTOMATIC
        } else {
            0
        });
        buf.put_u8(self.max_retransmissions);
        buf.put_u8(self.band_idx);
        buf.put_u8(self.header_mac_cmd_capacity);
    }

    /// Read the 7-byte wire layout.
    pub fn decode(reader: &mut PayloadReader<'_>) -> HciResult<Self> {
        let default_data_rate_idx = reader.u8()?;
        let tx_power_level = reader.u8()?;
        let options = reader.u8()?;
        let power_saving = reader.u8()?;
        let max_retransmissions = reader.u8()?;
        let band_idx = reader.u8()?;
        let header_mac_cmd_capacity = reader.u8()?;
        Ok(RStackConfig {
            default_data_rate_idx,
            tx_power_level,
            adaptive_data_rate: options & RSTACK_OPTION_ADR != 0,
            duty_cycle_control: options & RSTACK_OPTION_DUTY_CYCLE_CONTROL != 0,
            class_c: options & RSTACK_OPTION_CLASS_C != 0,
            mac_events: options & RSTACK_OPTION_MAC_EVENTS != 0,
            extended_hci: options & RSTACK_OPTION_EXTENDED_HCI != 0,
            automatic_power_saving: power_saving & RSTACK_POWER_SAVING_AUTOMATIC != 0,
            max_retransmissions,
            band_idx,
            header_mac_cmd_capacity,
        })
    }
}

/// Network status as reported by the radio stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkStatus {
    /// Activation state (`LORAWAN_NETWORK_STATUS_*`).
    pub network_status: u8,
    /// Device address (only set while active).
    pub address: u32,
    /// Current data rate index.
    pub data_rate_idx: u8,
    /// Current power level.
    pub power_level: u8,
    /// Maximum application payload size.
    pub max_payload_size: u8,
}

impl NetworkStatus {
    /// Whether the device is activated (ABP or OTAA).
    pub fn is_active(&self) -> bool {
        is_active_network_status(self.network_status)
    }
}

pub(crate) fn is_active_network_status(status: u8) -> bool {
    status == LORAWAN_NETWORK_STATUS_ACTIVE_ABP || status == LORAWAN_NETWORK_STATUS_ACTIVE_OTAA
}

/// TX channel info attached to TX indications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TxInfo {
    /// Channel index used.
    pub channel_idx: u8,
    /// Data rate index used.
    pub data_rate_idx: u8,
    /// Number of transmitted packets (retransmissions included).
    pub num_tx_packets: u8,
    /// TRX power level.
    pub trx_power_level: u8,
    /// Airtime of the radio message in ms.
    pub rf_message_airtime: u32,
}

impl TxInfo {
    pub(crate) fn decode(reader: &mut PayloadReader<'_>) -> HciResult<Self> {
        Ok(TxInfo {
            channel_idx: reader.u8()?,
            data_rate_idx: reader.u8()?,
            num_tx_packets: reader.u8()?,
            trx_power_level: reader.u8()?,
            rf_message_airtime: reader.u32_le()?,
        })
    }
}

/// RX channel info attached to receive indications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RxInfo {
    /// Channel index.
    pub channel_idx: u8,
    /// Data rate index.
    pub data_rate_idx: u8,
    /// RSSI in dBm.
    pub rssi: i8,
    /// SNR in dB.
    pub snr: i8,
    /// Receive window (1 or 2).
    pub rx_slot: u8,
}

impl RxInfo {
    pub(crate) fn decode(reader: &mut PayloadReader<'_>) -> HciResult<Self> {
        Ok(RxInfo {
            channel_idx: reader.u8()?,
            data_rate_idx: reader.u8()?,
            rssi: reader.i8()?,
            snr: reader.i8()?,
            rx_slot: reader.u8()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eui_roundtrip() {
        let eui = Eui::new([0x70, 0xB3, 0xD5, 0x8F, 0xF0, 0x03, 0x1D, 0xE5]);
        let mut buf = Vec::new();
        encode_eui(&mut buf, &eui);
        assert_eq!(buf.len(), EUI_SIZE);
        assert_eq!(buf, eui.as_bytes());
        assert_eq!(decode_eui(&buf).unwrap(), eui);
    }

    #[test]
    fn test_key_roundtrip() {
        let mut bytes = [0u8; KEY_SIZE];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(17);
        }
        let key = Key::new(bytes);
        let mut buf = Vec::new();
        encode_key(&mut buf, &key);
        assert_eq!(buf, bytes);
        assert_eq!(decode_key(&buf).unwrap(), key);
    }

    #[test]
    fn test_decode_short_buffer() {
        assert_eq!(
            decode_eui(&[1, 2, 3]),
            Err(HciError::BufferTooShort {
                expected: 8,
                actual: 3
            })
        );
        assert!(matches!(
            decode_key(&[0u8; 15]),
            Err(HciError::BufferTooShort { expected: 16, .. })
        ));
    }

    #[test]
    fn test_reader_reports_offset() {
        let mut reader = PayloadReader::new(&[0x01, 0x02, 0x03]);
        assert_eq!(reader.u8().unwrap(), 0x01);
        assert_eq!(
            reader.u32_le(),
            Err(HciError::BufferTooShort {
                expected: 5,
                actual: 3
            })
        );
        // Failed reads do not consume.
        assert_eq!(reader.remaining(), 2);
        assert_eq!(reader.rest(), &[0x02, 0x03]);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_hex_parsing() {
        let eui: Eui = "0102030405060708".parse().unwrap();
        assert_eq!(eui.0, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(eui.to_string(), "0102030405060708");

        let key: Key = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
        assert_eq!(key.0[15], 0x0f);
        assert!(!format!("{:?}", key).contains("0f"));

        assert!(matches!("0102".parse::<Eui>(), Err(HciError::InvalidHex(_))));
        assert!(matches!("zz".parse::<Key>(), Err(HciError::InvalidHex(_))));
    }

    #[test]
    fn test_rstack_config_flags() {
        let data = [0x05, 0x10, 0b1100_0101, 0x01, 0x07, 0x02, 0x0F];
        let config = RStackConfig::decode(&mut PayloadReader::new(&data)).unwrap();
        assert!(config.adaptive_data_rate);
        assert!(!config.duty_cycle_control);
        assert!(config.class_c);
        assert!(config.mac_events);
        assert!(config.extended_hci);
        assert!(config.automatic_power_saving);

        let mut buf = Vec::new();
        config.encode(&mut buf);
        assert_eq!(buf, data);
    }

    #[test]
    fn test_network_status_active() {
        let mut status = NetworkStatus::default();
        assert!(!status.is_active());
        status.network_status = LORAWAN_NETWORK_STATUS_ACTIVE_OTAA;
        assert!(status.is_active());
        status.network_status = LORAWAN_NETWORK_STATUS_JOINING_OTAA;
        assert!(!status.is_active());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serde() {
        let json = r#"{
            "default_data_rate_idx": 5,
            "tx_power_level": 14,
            "adaptive_data_rate": true,
            "duty_cycle_control": true,
            "class_c": false,
            "mac_events": false,
            "extended_hci": true,
            "automatic_power_saving": false,
            "max_retransmissions": 7,
            "band_idx": 1,
            "header_mac_cmd_capacity": 0
        }"#;
        let config: RStackConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.options(), 0b1000_0011);

        let key: Key = serde_json::from_str("\"000102030405060708090a0b0c0d0e0f\"").unwrap();
        assert_eq!(
            serde_json::to_string(&key).unwrap(),
            "\"000102030405060708090a0b0c0d0e0f\""
        );
    }
}
