//! IP feature: inherent address properties (source `stdlib-ip`)

pub mod adapter;
pub mod properties;

pub use adapter::IpAdapter;
pub use properties::AddressProperties;
