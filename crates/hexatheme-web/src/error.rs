#![forbid(unsafe_code)]

use thiserror::Error;

/// Failures of the browser document and storage ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebHostError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no root element")]
    NoRoot,
    #[error("document has no head")]
    NoHead,
    #[error("element does not support inline styles")]
    NotStylable,
    #[error("local storage is unavailable")]
    StorageUnavailable,
    #[error("javascript exception: {0}")]
    Js(String),
}
