//! HexNet: DHCP classless static route (option 121/249) converter.

pub mod codec;
pub mod config;
pub mod convert;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod views;

pub use codec::{decode_stream, encode, CodecError, DecodedRecord, PartialDecode, Route};
pub use config::ServiceConfig;
pub use convert::{convert, ConversionRow};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
