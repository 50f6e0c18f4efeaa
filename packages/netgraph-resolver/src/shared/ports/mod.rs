//! Ports shared by every feature

mod adapter;

pub use adapter::{ensure_scope, Adapter};
