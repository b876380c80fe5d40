//! Indication dispatch table.
//!
//! Maps the 16-bit code `(dst << 8) | id` of every indication to its decoder.
//! The table is built once on first use and is read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::constants::INDICATION_CODES;
use crate::error::{HciError, HciResult};
use crate::indications::*;
use crate::message::{HciMessage, Indication};
use crate::packet::{HciPacket, MessageCode};
use crate::status::check_devmgmt_status;
use crate::types::PayloadReader;

/// Decodes an indication payload (outer status byte removed).
pub type IndicationDecoder = fn(&[u8]) -> HciResult<AnyIndication>;

macro_rules! indication_decoder {
    ($name:ident, $ty:ty, $variant:ident) => {
        fn $name(payload: &[u8]) -> HciResult<AnyIndication> {
            <$ty>::decode(payload).map(AnyIndication::$variant)
        }
    };
}

indication_decoder!(decode_join_network_tx, JoinNetworkTxInd, JoinNetworkTx);
indication_decoder!(decode_join_network, JoinNetworkInd, JoinNetwork);
indication_decoder!(decode_send_udata_tx, SendUDataTxInd, SendUDataTx);
indication_decoder!(decode_send_cdata_tx, SendCDataTxInd, SendCDataTx);
indication_decoder!(decode_recv_udata, RecvUDataInd, RecvUData);
indication_decoder!(decode_recv_cdata, RecvCDataInd, RecvCData);
indication_decoder!(decode_recv_ack, RecvAckInd, RecvAck);
indication_decoder!(decode_recv_no_data, RecvNoDataInd, RecvNoData);

/// Registered decoders, one per indication.
const DECODERS: [(MessageCode, IndicationDecoder); 8] = [
    (JoinNetworkTxInd::CODE, decode_join_network_tx),
    (JoinNetworkInd::CODE, decode_join_network),
    (SendUDataTxInd::CODE, decode_send_udata_tx),
    (SendCDataTxInd::CODE, decode_send_cdata_tx),
    (RecvUDataInd::CODE, decode_recv_udata),
    (RecvCDataInd::CODE, decode_recv_cdata),
    (RecvAckInd::CODE, decode_recv_ack),
    (RecvNoDataInd::CODE, decode_recv_no_data),
];

static TABLE: OnceLock<HashMap<u16, IndicationDecoder>> = OnceLock::new();

fn table() -> &'static HashMap<u16, IndicationDecoder> {
    TABLE.get_or_init(|| {
        let table = build_table(&DECODERS);
        let check = check_table(&table, &DECODERS);
        if let Err(e) = &check {
            log::error!("indication dispatch table is inconsistent: {}", e);
        }
        debug_assert!(check.is_ok(), "indication dispatch table is inconsistent");
        table
    })
}

fn build_table(decoders: &[(MessageCode, IndicationDecoder)]) -> HashMap<u16, IndicationDecoder> {
    decoders
        .iter()
        .map(|(code, decoder)| (code.code(), *decoder))
        .collect()
}

/// Every indication code must be registered exactly once, and nothing else.
fn check_table(
    table: &HashMap<u16, IndicationDecoder>,
    decoders: &[(MessageCode, IndicationDecoder)],
) -> HciResult<()> {
    if decoders.len() != table.len() {
        // A duplicate registration collapsed into one map entry.
        let mut seen = Vec::with_capacity(decoders.len());
        for (code, _) in decoders {
            if seen.contains(code) {
                return Err(HciError::UnregisteredIndication(*code));
            }
            seen.push(*code);
        }
    }
    for code in INDICATION_CODES.iter() {
        if !table.contains_key(&code.code()) {
            return Err(HciError::UnregisteredIndication(*code));
        }
    }
    for key in table.keys() {
        let code = MessageCode::from(*key);
        if !INDICATION_CODES.contains(&code) {
            return Err(HciError::NotAnIndication(code));
        }
    }
    Ok(())
}

/// Verify the dispatch table covers every indication code exactly once.
pub fn check_dispatch_table() -> HciResult<()> {
    check_table(table(), &DECODERS)
}

/// Look up the decoder registered for `code`.
pub fn lookup(code: MessageCode) -> HciResult<IndicationDecoder> {
    table()
        .get(&code.code())
        .copied()
        .ok_or(HciError::UnregisteredIndication(code))
}

/// Classify an inbound packet as an indication and decode it.
pub fn classify_and_decode(packet: &HciPacket) -> HciResult<AnyIndication> {
    let code = packet.message_code();
    if !crate::constants::is_indication(packet.dst, packet.id) {
        log::debug!("rejecting non-indication packet {}", code);
        return Err(HciError::NotAnIndication(code));
    }

    let mut reader = PayloadReader::new(&packet.payload);
    check_devmgmt_status(reader.u8()?)?;

    let decoder = lookup(code)?;
    let indication = decoder(reader.rest())?;
    log::trace!("decoded indication {}", indication);
    Ok(indication)
}
