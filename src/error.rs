//! Error types for the StegoX codec.

use crate::carrier::MediaFormat;
use thiserror::Error;

/// Result type alias for StegoX operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown to users for any extraction failure that must not leak
/// whether the password or the carrier was at fault.
pub const GENERIC_EXTRACT_FAILURE: &str = "could not extract: wrong password or not a StegoX file";

/// Errors that can occur in StegoX operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The message does not fit into the carrier.
    #[error("Message too large for carrier: need {required} bytes, carrier holds {available} bytes")]
    CapacityExceeded { required: usize, available: usize },

    /// The embedded frame is malformed or absent.
    #[error("Invalid frame: {0}")]
    FrameFormat(String),

    /// Integrity tag mismatch (wrong password or corrupted data).
    #[error("Authentication failed: wrong password or corrupted data")]
    AuthenticationFailure,

    /// A bit sequence was not a whole number of bytes.
    #[error("Bit sequence of length {bits} is not byte aligned")]
    Alignment { bits: usize },

    /// The embedding engine was asked to touch more units than exist.
    #[error("Carrier too short: need {needed} units, have {available}")]
    CarrierTooShort { needed: usize, available: usize },

    /// The carrier format would destroy the payload when saved.
    #[error("Lossy carrier format not supported: {0}")]
    LossyFormat(MediaFormat),

    /// The carrier container or sample layout is not supported.
    #[error("Unsupported carrier format: {0}")]
    UnsupportedFormat(String),

    /// Key derivation error.
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Encryption error.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// The revealed plaintext is not valid UTF-8.
    #[error("Extracted message is not valid UTF-8")]
    InvalidUtf8,

    /// The passphrase gate refused access.
    #[error("Passphrase verification failed")]
    Unauthorized,

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Media container could not be decoded or encoded.
    #[error("Media error: {0}")]
    Media(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Text safe to show to an end user.
    ///
    /// Frame and authentication failures collapse into one message so a
    /// caller cannot tell a near-miss password from a plain carrier.
    pub fn user_message(&self) -> String {
        match self {
            Error::FrameFormat(_) | Error::AuthenticationFailure | Error::InvalidUtf8 => {
                GENERIC_EXTRACT_FAILURE.to_string()
            }
            other => other.to_string(),
        }
    }

    /// Returns true for the failures a reveal reports generically.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            Error::FrameFormat(_) | Error::AuthenticationFailure | Error::InvalidUtf8
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Media(e.to_string())
    }
}

impl From<hound::Error> for Error {
    fn from(e: hound::Error) -> Self {
        Error::Media(e.to_string())
    }
}
