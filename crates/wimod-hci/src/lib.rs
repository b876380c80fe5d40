//! WiMOD LoRaWAN Host Controller Interface
//!
//! This crate provides the message layer for talking to a WiMOD LoRaWAN radio
//! module over its HCI. Framing (SLIP, CRC) and the serial transport live
//! elsewhere; this crate works on `(dst, id, payload)` packets.
//!
//! # Protocol Overview
//!
//! Every message is addressed by a service access point (`dst`) and a message
//! id. Messages are either:
//!
//! - **Requests** (host → module): encode a payload, carry no status
//! - **Responses** (module → host): reply to exactly one request
//! - **Indications** (module → host): unsolicited, e.g. join and uplink results
//!
//! Inbound payloads start with a device management status byte, followed by
//! the message's own LoRaWAN status byte and its fields.
//!
//! # Example
//!
//! ```rust,ignore
//! use wimod_hci::{decode_indication, decode_response, encode_request};
//! use wimod_hci::{AnyIndication, JoinNetworkReq, JoinNetworkResp};
//!
//! let packet = encode_request(&JoinNetworkReq)?;
//! // ... send `packet`, receive `reply` ...
//! let resp: JoinNetworkResp = decode_response(&reply)?;
//!
//! match decode_indication(&unsolicited)? {
//!     AnyIndication::JoinNetwork(ind) => println!("joined as {:08X}", ind.address),
//!     other => println!("{}", other),
//! }
//! ```

mod constants;
mod dispatch;
mod error;
mod hci;
mod indications;
mod message;
mod packet;
mod requests;
mod responses;
mod status;
mod types;

pub use constants::*;
pub use dispatch::{check_dispatch_table, classify_and_decode, lookup, IndicationDecoder};
pub use error::*;
pub use hci::*;
pub use indications::*;
pub use message::{HciMessage, Indication, Request, Response};
pub use packet::*;
pub use requests::*;
pub use responses::*;
pub use status::*;
pub use types::*;
