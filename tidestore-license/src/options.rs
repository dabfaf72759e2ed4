//! Caller-supplied verification options.
//!
//! The default configuration enforces the signature and expiry checks only.
//! Everything else is opt-in through named fields rather than an open-ended
//! options mechanism.

use crate::claims::RawClaims;
use crate::error::LicenseResult;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// A predicate over the raw claim set, applied after the standard checks.
///
/// Returning an error rejects the license with that error.
pub type ClaimPredicate = Arc<dyn Fn(&RawClaims) -> LicenseResult<()> + Send + Sync>;

/// Options controlling license verification.
#[derive(Clone, Default)]
pub struct VerifyOptions {
    pub(crate) skip_expiry_check: bool,
    pub(crate) clock: Option<DateTime<Utc>>,
    pub(crate) claim_predicates: Vec<ClaimPredicate>,
}

impl VerifyOptions {
    /// Default options: enforce signature and expiry checks only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables expiry enforcement. Intended for testing against archived
    /// licenses; production callers should leave this off.
    #[must_use]
    pub fn skip_expiry_check(mut self, skip: bool) -> Self {
        self.skip_expiry_check = skip;
        self
    }

    /// Fixes the clock used for temporal checks instead of the wall clock.
    #[must_use]
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    /// Adds a predicate over the raw claims. Predicates run in insertion
    /// order after the standard checks; the first rejection aborts.
    #[must_use]
    pub fn with_claim_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&RawClaims) -> LicenseResult<()> + Send + Sync + 'static,
    {
        self.claim_predicates.push(Arc::new(predicate));
        self
    }

    /// The time temporal claims are checked against.
    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.unwrap_or_else(Utc::now)
    }
}

impl fmt::Debug for VerifyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyOptions")
            .field("skip_expiry_check", &self.skip_expiry_check)
            .field("clock", &self.clock)
            .field("claim_predicates", &self.claim_predicates.len())
            .finish()
    }
}
