//! Common test utilities for netgraph-resolver
//!
//! Fake upstream clients that record every request, canned registry
//! objects, and a few edge assertions.

#![allow(dead_code, unused_imports)]

mod assertions;
mod fakes;
mod fixtures;

pub use assertions::*;
pub use fakes::*;
pub use fixtures::*;
