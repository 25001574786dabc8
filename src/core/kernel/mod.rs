//! Exchange-agnostic transport kernel.
//!
//! The kernel holds transport only: no venue paths, codes or payload shapes.
//! Venues plug in through three seams:
//!
//! - [`Signer`]: turns a request into authentication headers
//! - [`ErrorHandler`]: inspects every response before HTTP status handling
//! - [`Throttle`]: weight-based pacing shared by one connector
//!
//! ```rust,no_run
//! use weex_connector::core::kernel::*;
//! use std::sync::Arc;
//!
//! # async fn example(signer: Arc<dyn Signer>) -> Result<(), weex_connector::ExchangeError> {
//! let rest_config = RestClientConfig::new(
//!     "https://api-spot.weex.com".to_string(),
//!     "weex".to_string(),
//! );
//! let rest = RestClientBuilder::new(rest_config)
//!     .with_signer(signer)
//!     .build()?;
//!
//! let _time = rest.get("/api/v2/public/time", &[], false).await?;
//! # Ok(())
//! # }
//! ```
pub mod rest;
pub mod signer;
pub mod throttle;

pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{hmac_sha256, ErrorHandler, SignatureResult, Signer};
pub use throttle::Throttle;
