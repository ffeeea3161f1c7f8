//! DHCP classless static route codec (options 121 / 249).
//!
//! # Wire Format
//! ```text
//! record := prefix_len (1 byte)
//!           network    (ceil(prefix_len / 8) bytes, leading octets only)
//!           gateway    (4 bytes)
//! stream := record*                       no delimiter, self-framing
//! blob   := ("0x" | "0X")? hex(stream)    lowercase on output
//! ```
//!
//! # Data Flow
//! ```text
//! "192.168.0.0/24" "192.168.0.1"
//!     → encoder.rs (parse CIDR + gateway → Route → wire bytes)
//!     → "0x18c0a800c0a80001"
//!
//! "0x18c0a800c0a80001..."
//!     → decoder.rs (hex → bytes → record loop)
//!     → [DecodedRecord, ...] or PartialDecode { decoded, error }
//! ```
//!
//! Both directions are pure functions; nothing here holds state between calls.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod route;

pub use decoder::{decode_stream, DecodedRecord, PartialDecode};
pub use encoder::{encode, encode_route};
pub use error::CodecError;
pub use route::{prefix_bytes, Route};

/// Hex prefix written on every blob we produce.
pub const HEX_PREFIX: &str = "0x";

/// Size of the gateway field in every record.
pub const GATEWAY_LEN: usize = 4;

/// Render wire bytes as a `0x`-prefixed lowercase hex blob.
pub fn to_blob(bytes: &[u8]) -> String {
    let mut blob = String::with_capacity(HEX_PREFIX.len() + bytes.len() * 2);
    blob.push_str(HEX_PREFIX);
    blob.push_str(&hex::encode(bytes));
    blob
}
