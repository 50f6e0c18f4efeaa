//! HTTP endpoints as graph items

pub mod adapter;
pub mod domain;

pub use adapter::{response_to_item, HttpAdapter, HttpTarget, HTTP_TYPE};
pub use domain::{
    HeadResponse, HttpClient, HttpClientError, PeerCertificate, TlsState, TlsVersion,
};
