//! Shared models and ports used by every feature

pub mod models;
pub mod ports;
