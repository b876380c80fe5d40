//! Packet-level entry points.
//!
//! Wraps typed messages into [`HciPacket`]s and back. The device management
//! status that leads every inbound payload is checked here; the LoRaWAN
//! status after it belongs to the message decoder.

use crate::dispatch::classify_and_decode;
use crate::error::{HciError, HciResult};
use crate::indications::AnyIndication;
use crate::message::{Request, Response};
use crate::packet::HciPacket;
use crate::status::check_devmgmt_status;
use crate::types::PayloadReader;

/// Encode a request into a packet carrying the request's identity.
pub fn encode_request<R: Request>(request: &R) -> HciResult<HciPacket> {
    let payload = request.encode()?;
    log::trace!("encoded request {} ({} bytes)", R::CODE, payload.len());
    Ok(HciPacket::new(R::CODE.dst, R::CODE.id, payload))
}

/// Decode a response packet as `R`.
///
/// Fails with [`HciError::IdentityMismatch`] if the packet is not an `R`,
/// and with [`HciError::DeviceStatus`] if the module rejected the request
/// at the device management tier.
pub fn decode_response<R: Response>(packet: &HciPacket) -> HciResult<R> {
    let actual = packet.message_code();
    if actual != R::CODE {
        return Err(HciError::IdentityMismatch {
            expected: R::CODE,
            actual,
        });
    }

    let mut reader = PayloadReader::new(&packet.payload);
    let status = reader.u8()?;
    if let Err(e) = check_devmgmt_status(status) {
        log::debug!("{} rejected: {}", actual, e);
        return Err(e);
    }

    let response = R::decode(reader.rest())?;
    log::trace!("decoded response {}", actual);
    Ok(response)
}

/// Decode an unsolicited packet through the indication dispatch table.
pub fn decode_indication(packet: &HciPacket) -> HciResult<AnyIndication> {
    classify_and_decode(packet)
}
