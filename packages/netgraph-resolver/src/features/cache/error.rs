//! Error types for the cache system

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Metrics registration failed: {0}")]
    Metrics(#[from] prometheus::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;
