//! Error type shared by every operation in the crate.
//!
//! Each variant corresponds to one failure class so callers can match on it
//! instead of parsing messages.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Plaintext outside the encryptable interval.
    #[error("plaintext {value} out of range: must satisfy {min} < m < {max}")]
    Range { value: i64, min: i64, max: i64 },
    /// Bytes or components presented as a ciphertext are not a valid pair of group elements.
    #[error("malformed ciphertext: {0}")]
    Format(String),
    /// The recovered element is not `m * h` for any `m` in the lookup window.
    #[error("no plaintext in window [{min}, {max}) matches the decrypted element")]
    Decryption { min: i64, max: i64 },
    #[error("invalid argument: {0}")]
    Argument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
