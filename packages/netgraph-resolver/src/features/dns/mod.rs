//! DNS feature
//!
//! ```text
//! adapter.rs (DnsAdapter, source `stdlib-dns`)
//!           ↓
//! application/ (answer grouping, item shapes, name helpers)
//!           ↓
//! domain/ (record model, DnsClient port)
//! ```

pub mod adapter;
pub mod application;
pub mod domain;

pub use adapter::DnsAdapter;
pub use application::{answers_to_items, group_answers, reverse_name, AnswerGroup};
pub use domain::{DnsClient, DnsClientError, DnsRecord, RecordData, RecordType};
