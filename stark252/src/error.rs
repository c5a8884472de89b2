//! Error type

use core::fmt::{self, Display};

/// Result type with the `stark252` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Signing and arithmetic errors.
///
/// Verification never fails with an error: invalid signatures simply do not
/// verify.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Value outside the domain of an operation: inverse of zero, a point
    /// not on the curve, or malformed text.
    Domain,

    /// Private key is zero or not below the curve order.
    InvalidKey,

    /// Message hash is outside the accepted range.
    InvalidHash,

    /// The nonce is unusable for this key and message (`k`, `r` or `s` out
    /// of range). Derive a fresh nonce and sign again.
    RetryNonce,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::Domain => "value outside the domain of the operation",
            Error::InvalidKey => "invalid private key",
            Error::InvalidHash => "message hash out of range",
            Error::RetryNonce => "nonce rejected, retry with another nonce",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "ecdsa")]
impl From<Error> for signature::Error {
    #[cfg(feature = "std")]
    fn from(err: Error) -> signature::Error {
        signature::Error::from_source(err)
    }

    #[cfg(not(feature = "std"))]
    fn from(_: Error) -> signature::Error {
        signature::Error::new()
    }
}
