//! relay-types: domain values and ports shared by the relay service and its upstream adapter.

pub mod domain;
pub mod ports;
