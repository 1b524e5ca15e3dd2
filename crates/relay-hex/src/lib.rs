//! relay-hex: order-management relay (core + inbound HTTP)

pub mod config;
pub mod errors;

pub mod application;

pub use relay_types::{domain, ports};

pub mod inbound; // HTTP adapter (server + handlers)
