//! Route model and text parsing.
//!
//! # Responsibilities
//! - Parse `a.b.c.d/len` targets and gateway addresses (IPv4 only)
//! - Compute how many network octets a prefix length puts on the wire
//! - Hold a validated (prefix, network, gateway) triple
//!
//! # Design Decisions
//! - The network address is kept exactly as written; host bits are not
//!   masked, only the octets past `prefix_bytes` are dropped on encode
//! - Prefix lengths above 32 cannot be built here; the decoder tolerates
//!   them separately

use std::net::{IpAddr, Ipv4Addr};

use crate::codec::error::CodecError;
use crate::codec::GATEWAY_LEN;

/// Longest IPv4 prefix.
pub const MAX_PREFIX_LEN: u8 = 32;

/// Number of network octets carried on the wire for `prefix_len`.
///
/// `ceil(prefix_len / 8)`: 0→0, 1→1, 8→1, 9→2, 25→4, 32→4. Values above 32
/// keep following the same formula (255→32).
pub fn prefix_bytes(prefix_len: u8) -> usize {
    usize::from(prefix_len).div_ceil(8)
}

/// A classless static route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    prefix_len: u8,
    network: Ipv4Addr,
    gateway: Ipv4Addr,
}

impl Route {
    /// Build a route, rejecting prefixes longer than 32.
    pub fn new(network: Ipv4Addr, prefix_len: u8, gateway: Ipv4Addr) -> Result<Self, CodecError> {
        if prefix_len > MAX_PREFIX_LEN {
            return Err(CodecError::invalid_cidr(
                &format!("{network}/{prefix_len}"),
                format!("prefix length {prefix_len} exceeds {MAX_PREFIX_LEN}"),
            ));
        }
        Ok(Self {
            prefix_len,
            network,
            gateway,
        })
    }

    /// Parse a `target` CIDR and a `gateway` address.
    pub fn parse(target: &str, gateway: &str) -> Result<Self, CodecError> {
        let (network, prefix_len) = parse_cidr(target)?;
        let gateway = parse_gateway(gateway)?;
        Self::new(network, prefix_len, gateway)
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn gateway(&self) -> Ipv4Addr {
        self.gateway
    }

    /// Size of this route's record on the wire.
    pub fn wire_len(&self) -> usize {
        1 + prefix_bytes(self.prefix_len) + GATEWAY_LEN
    }

    /// Copy of this route with every octet past the wire octets zeroed.
    ///
    /// This is what a decoder reconstructs from the wire form.
    pub fn normalized(&self) -> Self {
        let len = prefix_bytes(self.prefix_len);
        let mut octets = [0u8; 4];
        octets[..len].copy_from_slice(&self.network.octets()[..len]);
        Self {
            network: Ipv4Addr::from(octets),
            ..*self
        }
    }

    /// `network/prefix_len`.
    pub fn target(&self) -> String {
        format!("{}/{}", self.network, self.prefix_len)
    }
}

/// Parse `a.b.c.d/len` into its address and prefix length.
pub fn parse_cidr(input: &str) -> Result<(Ipv4Addr, u8), CodecError> {
    let (addr, prefix) = input
        .split_once('/')
        .ok_or_else(|| CodecError::invalid_cidr(input, "missing '/' prefix separator"))?;

    let network = match addr.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => v4,
        Ok(IpAddr::V6(_)) => return Err(CodecError::invalid_cidr(input, "only IPv4 supported")),
        Err(_) => return Err(CodecError::invalid_cidr(input, "invalid IPv4 address")),
    };

    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::invalid_cidr(input, "prefix length is not a number"));
    }
    let prefix_len = prefix
        .parse::<u8>()
        .ok()
        .filter(|len| *len <= MAX_PREFIX_LEN)
        .ok_or_else(|| CodecError::invalid_cidr(input, "prefix length must be 0..=32"))?;

    Ok((network, prefix_len))
}

/// Parse a gateway address.
pub fn parse_gateway(input: &str) -> Result<Ipv4Addr, CodecError> {
    match input.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => Ok(v4),
        Ok(IpAddr::V6(_)) => Err(CodecError::invalid_gateway(input, "only IPv4 supported")),
        Err(_) => Err(CodecError::invalid_gateway(input, "invalid IPv4 address")),
    }
}
