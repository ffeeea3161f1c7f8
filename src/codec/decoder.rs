//! Hex stream → record decoding.
//!
//! # Responsibilities
//! - Accept `0x`/`0X`-prefixed or bare hex, surrounding whitespace ignored
//! - Walk the self-framing record stream in a single forward pass
//! - Hand back every record decoded before a framing failure
//!
//! # Design Decisions
//! - The per-record `hex` echoes the input slice, never the zero-padded
//!   reconstruction, so it always matches the blob byte-for-byte
//! - Prefix lengths 33..=255 are not rejected; the ceiling formula makes
//!   them demand more bytes than any realistic stream carries

use std::net::Ipv4Addr;

use serde::Serialize;
use thiserror::Error;

use crate::codec::error::CodecError;
use crate::codec::route::{prefix_bytes, Route};
use crate::codec::{to_blob, GATEWAY_LEN};

/// One record recovered from a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedRecord {
    /// `network/prefix_len`, network zero-filled past the wire octets.
    pub target: String,
    /// Gateway in dotted-decimal.
    pub route: String,
    /// This record alone, re-encoded from its wire bytes.
    pub hex: String,
    #[serde(skip)]
    pub prefix_len: u8,
    #[serde(skip)]
    pub network: Ipv4Addr,
    #[serde(skip)]
    pub gateway: Ipv4Addr,
}

impl DecodedRecord {
    /// Typed view of this record; `None` when the prefix exceeds 32.
    pub fn to_route(&self) -> Option<Route> {
        Route::new(self.network, self.prefix_len, self.gateway).ok()
    }
}

/// A decode that stopped early.
///
/// `decoded` holds every record that was complete before `error` occurred.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error} (after {} decoded records)", .decoded.len())]
pub struct PartialDecode {
    pub decoded: Vec<DecodedRecord>,
    #[source]
    pub error: CodecError,
}

impl PartialDecode {
    fn new(decoded: Vec<DecodedRecord>, error: CodecError) -> Self {
        Self { decoded, error }
    }

    /// Split into the partial records and the failure.
    pub fn into_parts(self) -> (Vec<DecodedRecord>, CodecError) {
        (self.decoded, self.error)
    }
}

/// Strip whitespace and an optional `0x`/`0X` prefix.
fn strip_blob(blob: &str) -> &str {
    let blob = blob.trim();
    blob.strip_prefix("0x")
        .or_else(|| blob.strip_prefix("0X"))
        .unwrap_or(blob)
}

/// Decode a hex blob holding zero or more concatenated records.
///
/// ```
/// let records = hexnet::codec::decode_stream("0x18c0a800c0a80001").unwrap();
/// assert_eq!(records[0].target, "192.168.0.0/24");
/// assert_eq!(records[0].route, "192.168.0.1");
/// ```
pub fn decode_stream(blob: &str) -> Result<Vec<DecodedRecord>, PartialDecode> {
    let data = hex::decode(strip_blob(blob))
        .map_err(|e| PartialDecode::new(Vec::new(), CodecError::from(e)))?;

    let mut records = Vec::new();
    let mut i = 0;

    while i < data.len() {
        let start = i;
        let Some(&prefix_len) = data.get(i) else {
            return Err(PartialDecode::new(
                records,
                CodecError::TruncatedStream { offset: i },
            ));
        };
        i += 1;

        let network_len = prefix_bytes(prefix_len);
        let needed = network_len + GATEWAY_LEN;
        let available = data.len() - i;
        if available < needed {
            return Err(PartialDecode::new(
                records,
                CodecError::TruncatedRecord {
                    offset: start,
                    prefix_len,
                    needed,
                    available,
                },
            ));
        }

        let network_part = &data[i..i + network_len];
        i += network_len;
        let gateway_part = &data[i..i + GATEWAY_LEN];
        i += GATEWAY_LEN;

        let mut network = [0u8; 4];
        let copied = network_part.len().min(network.len());
        network[..copied].copy_from_slice(&network_part[..copied]);
        let network = Ipv4Addr::from(network);
        let gateway = Ipv4Addr::new(gateway_part[0], gateway_part[1], gateway_part[2], gateway_part[3]);

        records.push(DecodedRecord {
            target: format!("{network}/{prefix_len}"),
            route: gateway.to_string(),
            hex: to_blob(&data[start..i]),
            prefix_len,
            network,
            gateway,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;

    #[test]
    fn test_decode_single_record() {
        let records = decode_stream("0x18c0a800c0a80001").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].target, "192.168.0.0/24");
        assert_eq!(records[0].route, "192.168.0.1");
        assert_eq!(records[0].hex, "0x18c0a800c0a80001");
        assert_eq!(records[0].prefix_len, 24);
    }

    #[test]
    fn test_decode_prefix_variants_identical() {
        let a = decode_stream("0x18C0A800C0A80001").unwrap();
        let b = decode_stream("0X18c0a800c0a80001").unwrap();
        let c = decode_stream("18c0a800c0a80001").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        // output hex is always lowercase
        assert_eq!(a[0].hex, "0x18c0a800c0a80001");
    }

    #[test]
    fn test_decode_trims_whitespace() {
        let records = decode_stream("  0x000a000001\t").unwrap();
        assert_eq!(records[0].target, "0.0.0.0/0");
        assert_eq!(records[0].route, "10.0.0.1");
    }

    #[test]
    fn test_decode_empty_stream() {
        assert!(decode_stream("").unwrap().is_empty());
        assert!(decode_stream("0x").unwrap().is_empty());
    }

    #[test]
    fn test_decode_multiple_records_in_order() {
        let blob = "0x18c0a800c0a80001000a000001080a0a000001";
        let records = decode_stream(blob).unwrap();
        let targets: Vec<_> = records.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, ["192.168.0.0/24", "0.0.0.0/0", "10.0.0.0/8"]);
        let hexes: Vec<_> = records.iter().map(|r| r.hex.as_str()).collect();
        assert_eq!(hexes, ["0x18c0a800c0a80001", "0x000a000001", "0x080a0a000001"]);
    }

    #[test]
    fn test_decode_zero_fills_trailing_octets() {
        let records = decode_stream("0x0cac100a000001").unwrap();
        assert_eq!(records[0].target, "172.16.0.0/12");
        assert_eq!(records[0].network, Ipv4Addr::new(172, 16, 0, 0));
        // wire bytes echoed, not the padded address
        assert_eq!(records[0].hex, "0x0cac100a000001");
    }

    #[test]
    fn test_decode_invalid_hex() {
        let err = decode_stream("0xzz").unwrap_err();
        assert!(err.decoded.is_empty());
        assert_eq!(err.error.kind(), "invalid_hex");

        let err = decode_stream("0x18c").unwrap_err();
        assert_eq!(err.error, CodecError::InvalidHex(hex::FromHexError::OddLength));
    }

    #[test]
    fn test_decode_truncated_keeps_prior_records() {
        let err = decode_stream("0x18c0a800c0a80001080a0a0000").unwrap_err();
        assert_eq!(err.decoded.len(), 1);
        assert_eq!(err.decoded[0].target, "192.168.0.0/24");
        assert_eq!(
            err.error,
            CodecError::TruncatedRecord {
                offset: 8,
                prefix_len: 8,
                needed: 5,
                available: 4,
            }
        );
    }

    #[test]
    fn test_decode_lone_length_byte() {
        let err = decode_stream("0x18c0a800c0a8000118").unwrap_err();
        assert_eq!(err.decoded.len(), 1);
        assert_eq!(err.error.kind(), "truncated_record");
    }

    #[test]
    fn test_decode_oversized_prefix_is_tolerated() {
        // /40 asks for 5 network bytes; only the first four land in the address
        let records = decode_stream("0x280102030405c0a80001").unwrap();
        assert_eq!(records[0].target, "1.2.3.4/40");
        assert_eq!(records[0].hex, "0x280102030405c0a80001");
        assert!(records[0].to_route().is_none());

        let err = decode_stream("0xff0102030405").unwrap_err();
        assert_eq!(err.error.kind(), "truncated_record");
    }

    #[test]
    fn test_round_trip_through_encoder() {
        let blob = encode("10.20.30.40/20", "10.0.0.254").unwrap();
        let records = decode_stream(&blob).unwrap();
        assert_eq!(records[0].target, "10.20.30.0/20");
        assert_eq!(records[0].route, "10.0.0.254");
        assert_eq!(records[0].hex, blob);
    }
}
