//! Error types for license verification.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;

/// Errors that can occur while loading key material or verifying a license.
///
/// Every failure is terminal: a license is either fully valid or the call
/// fails with the first error encountered. Display output never includes key
/// material or full token contents.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// The public key blob is not a PEM encoded PKIX key or certificate.
    #[error("invalid public key format: {0}")]
    KeyFormat(String),

    /// The decoded public key is not an ECDSA P-384 key.
    #[error("unsupported public key type: {0}")]
    KeyType(String),

    /// The license token envelope could not be parsed.
    #[error("malformed license token: {0}")]
    MalformedToken(String),

    /// The token header declares a different algorithm than the key set.
    #[error("license algorithm {found:?} does not match expected {expected}")]
    AlgorithmMismatch {
        /// Algorithm the key set is bound to.
        expected: &'static str,
        /// Algorithm declared in the token header.
        found: String,
    },

    /// ES384 signature verification failed.
    #[error("license signature invalid")]
    InvalidSignature,

    /// The license expired at the given time.
    #[error("license expired at {0}")]
    Expired(DateTime<Utc>),

    /// The license is not valid before the given time.
    #[error("license not valid before {0}")]
    NotYetValid(DateTime<Utc>),

    /// A required claim is missing or has the wrong type.
    #[error("invalid {0} claim in license")]
    InvalidClaim(&'static str),

    /// The license is bound to a different deployment.
    #[error("license deployment id {found:?} does not match {expected:?}")]
    DeploymentMismatch {
        /// Deployment id the caller expected.
        expected: String,
        /// Deployment id found in the license.
        found: String,
    },
}
