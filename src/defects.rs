//! Defects

use std::io;

use thiserror::Error;

/// Reasons an encoded-word payload could not be turned back into text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Defect {
    #[error("invalid Q encoding escape: {:?}", String::from_utf8_lossy(bytes))]
    InvalidEscape { bytes: [u8; 2] },
    #[error(
        "Q encoding escape ended after {} of 2 hex digits",
        bytes.len()
    )]
    TruncatedEscape { bytes: Vec<u8> },
    #[error("base64 encoded sequence had an incorrect length")]
    InvalidBase64Padding,
    #[error("base64 encoded sequence is invalid: {0}")]
    InvalidBase64(base64::DecodeError),
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
    #[error("reading the payload failed: {}", message)]
    Io { message: String },
}

impl From<Defect> for io::Error {
    fn from(defect: Defect) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, defect)
    }
}

impl From<io::Error> for Defect {
    /// Recover the defect carried by a streaming decoder's `io::Error`.
    fn from(err: io::Error) -> Self {
        let message = err.to_string();
        let inner = match err.into_inner() {
            Some(inner) => inner,
            None => return Defect::Io { message },
        };
        let inner = match inner.downcast::<Defect>() {
            Ok(defect) => return *defect,
            Err(inner) => inner,
        };
        match inner.downcast::<base64::DecodeError>() {
            Ok(err) => Defect::InvalidBase64(*err),
            Err(_) => Defect::Io { message },
        }
    }
}
