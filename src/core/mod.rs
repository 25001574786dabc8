pub mod config;
pub mod conversion;
pub mod errors;
pub mod kernel;
pub mod markets;
pub mod traits;
pub mod types;
