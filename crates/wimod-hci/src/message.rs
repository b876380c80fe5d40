//! Message role contracts.
//!
//! Every message has a fixed identity ([`HciMessage::CODE`]). Requests
//! encode their payload, responses and indications decode theirs.

use crate::error::HciResult;
use crate::packet::MessageCode;

/// A message with a fixed `(dst, id)` identity.
pub trait HciMessage {
    /// Identity of this message type.
    const CODE: MessageCode;

    /// Identity of this message.
    fn code(&self) -> MessageCode {
        Self::CODE
    }
}

/// A message sent from the host to the module.
pub trait Request: HciMessage {
    /// Encode the payload (identity is added by [`crate::encode_request`]).
    fn encode(&self) -> HciResult<Vec<u8>>;
}

/// A message received in reply to a request.
pub trait Response: HciMessage + Sized {
    /// Decode from the payload following the device management status byte.
    /// The first byte is the message's own LoRaWAN status.
    fn decode(payload: &[u8]) -> HciResult<Self>;

    /// LoRaWAN status byte as received.
    fn status(&self) -> u8;
}

/// An unsolicited message from the module.
pub trait Indication: HciMessage + Sized {
    /// Decode from the payload following the device management status byte.
    /// The first byte is the indication's own status/format byte.
    fn decode(payload: &[u8]) -> HciResult<Self>;

    /// Status (or format) byte, after normalization.
    fn status(&self) -> u8;
}

/// Implement [`HciMessage`] for a list of `Type => (dst, id)` pairs.
macro_rules! impl_hci_message {
    ($($ty:ty => ($dst:expr, $id:expr)),* $(,)?) => {
        $(
            impl $crate::message::HciMessage for $ty {
                const CODE: $crate::packet::MessageCode =
                    $crate::packet::MessageCode::new($dst, $id);
            }
        )*
    };
}

pub(crate) use impl_hci_message;
