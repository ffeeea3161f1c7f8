//! Route → record encoding.

use crate::codec::error::CodecError;
use crate::codec::route::{prefix_bytes, Route};
use crate::codec::to_blob;

/// Wire bytes for a single route record.
pub fn encode_route(route: &Route) -> Vec<u8> {
    let network = route.network().octets();
    let mut bytes = Vec::with_capacity(route.wire_len());
    bytes.push(route.prefix_len());
    bytes.extend_from_slice(&network[..prefix_bytes(route.prefix_len())]);
    bytes.extend_from_slice(&route.gateway().octets());
    bytes
}

/// Encode `target_cidr` via `route_ip` as a single-record hex blob.
///
/// ```
/// assert_eq!(
///     hexnet::codec::encode("192.168.0.0/24", "192.168.0.1").unwrap(),
///     "0x18c0a800c0a80001"
/// );
/// ```
pub fn encode(target_cidr: &str, route_ip: &str) -> Result<String, CodecError> {
    let route = Route::parse(target_cidr, route_ip)?;
    Ok(to_blob(&encode_route(&route)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_class_c() {
        assert_eq!(
            encode("192.168.0.0/24", "192.168.0.1").unwrap(),
            "0x18c0a800c0a80001"
        );
    }

    #[test]
    fn test_encode_default_route() {
        assert_eq!(encode("10.0.0.0/0", "10.0.0.1").unwrap(), "0x000a000001");
    }

    #[test]
    fn test_encode_network_byte_counts() {
        assert_eq!(encode("10.0.0.0/8", "10.0.0.1").unwrap(), "0x080a0a000001");
        assert_eq!(encode("172.16.0.0/12", "10.0.0.1").unwrap(), "0x0cac100a000001");
        assert_eq!(encode("192.168.1.128/25", "10.0.0.1").unwrap(), "0x19c0a801800a000001");
        assert_eq!(encode("192.168.1.7/32", "10.0.0.1").unwrap(), "0x20c0a801070a000001");
    }

    #[test]
    fn test_encode_keeps_host_bits_in_partial_octet() {
        assert_eq!(encode("192.168.0.200/25", "192.168.0.1").unwrap(), "0x19c0a800c8c0a80001");
    }

    #[test]
    fn test_encode_errors() {
        assert_eq!(encode("not-a-cidr", "10.0.0.1").unwrap_err().kind(), "invalid_cidr");
        assert_eq!(encode("10.0.0.0/8", "gateway").unwrap_err().kind(), "invalid_gateway");
        assert_eq!(encode("10.0.0.0/8", "::1").unwrap_err().kind(), "invalid_gateway");
        // target is checked before the gateway
        assert_eq!(encode("bad", "bad").unwrap_err().kind(), "invalid_cidr");
    }

    #[test]
    fn test_encode_route_len_matches_wire_len() {
        for prefix in 0..=32u8 {
            let route = Route::new([10, 20, 30, 40].into(), prefix, [1, 2, 3, 4].into()).unwrap();
            assert_eq!(encode_route(&route).len(), route.wire_len());
        }
    }
}
