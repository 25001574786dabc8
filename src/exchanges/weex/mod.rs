pub mod conversions;
pub mod describe;
pub mod errors;
pub mod requests;
pub mod signer;
pub mod types;

pub mod builder;
pub mod connector;
pub mod rest;

// Re-export main components
pub use builder::{build_connector, WeexBuilder};
pub use connector::{Account, MarketData, Trading, WeexConnector};
pub use describe::{describe, Endpoint, ExchangeDescriptor};
pub use errors::WeexErrorHandler;
pub use rest::WeexRest;
pub use signer::WeexSigner;
