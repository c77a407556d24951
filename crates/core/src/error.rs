//! Error types for PowerPoint slide translation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while translating a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write raw bytes.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP archive error (reading or writing the package).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// A slide part could not be decoded as XML text.
    #[error("XML error: {0}")]
    XmlError(String),

    /// The request carried no usable document.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The translation provider answered with a non-success status.
    #[error("Translation provider error {status}")]
    ProviderStatus {
        /// HTTP status code returned by the provider.
        status: u16,
    },

    /// The translation provider could not be reached.
    #[error("Translation transport error: {0}")]
    TransportError(String),

    /// The translation provider answered with a body we could not read.
    #[error("Translation response error: {0}")]
    ResponseError(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
