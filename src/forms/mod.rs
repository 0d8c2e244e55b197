//! Form definitions backing the public pages.

use thiserror::Error;

#[cfg(feature = "server")]
pub mod admission;
pub mod contact;
pub mod validation;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("failed to read uploaded file: {0}")]
    Upload(#[from] std::io::Error),
}
