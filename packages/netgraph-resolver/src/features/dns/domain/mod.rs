pub mod models;
pub mod ports;

pub use models::{DnsRecord, RecordData, RecordType};
pub use ports::{DnsClient, DnsClientError};
