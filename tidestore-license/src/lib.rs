//! License verification for TideStore deployments.
//!
//! This crate proves that a presented license token was issued by the
//! TideStore license service, has not expired, has not been tampered with,
//! and (optionally) is bound to the deployment it is being activated
//! against. It handles:
//! - Loading the service's ECDSA P-384 public key from a PEM blob (bare
//!   PKIX key or X.509 certificate)
//! - ES384 signature verification of compact JWS license tokens
//! - Temporal validation (expiry, not-before) with an injectable clock
//! - Strict typed extraction of the customer metadata claims
//!
//! # Design Principles
//!
//! - **One scheme**: exactly one signature algorithm (ES384) and one claim
//!   schema; a token declaring anything else is rejected outright
//! - **Fail fast**: the first failing stage aborts verification; there is no
//!   partially-trusted result and no error is downgraded to a warning
//! - **No I/O**: key material and tokens are supplied in memory; the wall
//!   clock is the only ambient input, and it can be overridden
//!
//! # License Token Format
//!
//! Tokens are compact JWS structures,
//! `base64url(header).base64url(payload).base64url(signature)`, whose
//! payload carries the account id, organization, storage capacity, plan,
//! and deployment id claims.

mod claims;
mod config;
mod error;
mod key;
mod options;
mod verifier;

pub use claims::{LicenseInfo, RawClaims};
pub use config::{DEV_MODE_ENV, KeyMode};
pub use error::{LicenseError, LicenseResult};
pub use options::{ClaimPredicate, VerifyOptions};
pub use verifier::{LicenseVerifier, verify_deployment_license};
