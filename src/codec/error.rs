//! Codec error definitions.

use thiserror::Error;

/// Errors produced while encoding or decoding route records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Target is not `a.b.c.d/len` with an IPv4 address and a prefix of 0..=32.
    #[error("invalid target CIDR {input:?}: {reason}")]
    InvalidCidr { input: String, reason: String },

    /// Gateway is not an IPv4 address.
    #[error("invalid route IP {input:?}: {reason}")]
    InvalidGateway { input: String, reason: String },

    /// Blob has odd length or a non-hex character.
    #[error("invalid hex string: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// A record was expected at `offset` but the stream ended.
    #[error("unexpected end of data at byte {offset}")]
    TruncatedStream { offset: usize },

    /// The record at `offset` declares more bytes than the stream holds.
    #[error(
        "not enough data for record at byte {offset}: prefix /{prefix_len} needs {needed} bytes, {available} left"
    )]
    TruncatedRecord {
        offset: usize,
        prefix_len: u8,
        needed: usize,
        available: usize,
    },
}

impl CodecError {
    /// Stable identifier used in API responses and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            CodecError::InvalidCidr { .. } => "invalid_cidr",
            CodecError::InvalidGateway { .. } => "invalid_gateway",
            CodecError::InvalidHex(_) => "invalid_hex",
            CodecError::TruncatedStream { .. } => "truncated_stream",
            CodecError::TruncatedRecord { .. } => "truncated_record",
        }
    }

    pub(crate) fn invalid_cidr(input: &str, reason: impl Into<String>) -> Self {
        CodecError::InvalidCidr {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_gateway(input: &str, reason: impl Into<String>) -> Self {
        CodecError::InvalidGateway {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(CodecError::invalid_cidr("x", "bad").kind(), "invalid_cidr");
        assert_eq!(CodecError::invalid_gateway("x", "bad").kind(), "invalid_gateway");
        assert_eq!(CodecError::from(hex::FromHexError::OddLength).kind(), "invalid_hex");
        assert_eq!(CodecError::TruncatedStream { offset: 3 }.kind(), "truncated_stream");
    }

    #[test]
    fn test_display_mentions_input() {
        let err = CodecError::invalid_cidr("not-a-cidr", "missing '/'");
        assert_eq!(
            err.to_string(),
            "invalid target CIDR \"not-a-cidr\": missing '/'"
        );

        let err = CodecError::TruncatedRecord {
            offset: 8,
            prefix_len: 24,
            needed: 7,
            available: 2,
        };
        assert!(err.to_string().contains("/24 needs 7 bytes, 2 left"));
    }
}
