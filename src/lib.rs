//! IpLocations - IPv4 to country resolution
//!
//! Resolves an IPv4 address to the ISO country code of the loaded range that
//! contains it. Ranges live in a sharded, score-ordered index (Redis sorted
//! sets in production); a lookup is one "greatest start <= address" query
//! followed by a bounds check.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Command-line interface
//!
//! # Architecture
//! - `utils`: IPv4 text <-> ordinal encoding
//! - `store`: shard derivation, range index backends, resolution store
//! - `api`: HTTP services and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging

#[cfg(feature = "server")]
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod store;
pub mod system;
pub mod utils;
