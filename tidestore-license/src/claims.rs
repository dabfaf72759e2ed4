//! Typed extraction of customer metadata from a verified claim set.
//!
//! The token payload is an untyped JSON map. Extraction is a sequence of
//! explicit typed lookups, one per field, each failing with the name of the
//! offending claim. It only ever runs on a token whose signature has already
//! been verified.

use crate::error::{LicenseError, LicenseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Untyped claim map decoded from a verified token payload.
pub type RawClaims = serde_json::Map<String, Value>;

// license token JSON claim names
pub(crate) const CLAIM_ACCOUNT_ID: &str = "aid";
pub(crate) const CLAIM_DEPLOYMENT_ID: &str = "did";
pub(crate) const CLAIM_ORGANIZATION: &str = "org";
pub(crate) const CLAIM_CAPACITY: &str = "cap";
pub(crate) const CLAIM_PLAN: &str = "plan";
pub(crate) const CLAIM_SUBJECT: &str = "sub";
pub(crate) const CLAIM_EXPIRY: &str = "exp";
pub(crate) const CLAIM_NOT_BEFORE: &str = "nbf";

/// Customer metadata carried in a verified license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfo {
    /// Email of the license requestor, from the token subject. May be empty.
    pub email: String,
    /// Organization the license was issued to.
    pub organization: String,
    /// License service account id.
    pub account_id: i64,
    /// Deployment the license is bound to. Empty for licenses issued before
    /// deployment binding existed.
    pub deployment_id: String,
    /// Licensed storage capacity in TB.
    pub storage_capacity: i64,
    /// Subscription plan.
    pub plan: String,
    /// Time of license expiry.
    pub expires_at: DateTime<Utc>,
}

/// Extracts [`LicenseInfo`] from a verified claim set.
pub(crate) fn extract_info(claims: &RawClaims) -> LicenseResult<LicenseInfo> {
    let account_id = integer_claim(claims, CLAIM_ACCOUNT_ID, "accountId")?;
    if account_id < 0 {
        return Err(LicenseError::InvalidClaim("accountId"));
    }

    // Deployment id may not be present in older licenses, so don't fail if
    // it's missing. This leniency is a compatibility shim for exactly this
    // claim; every other field is strict.
    let deployment_id = claims
        .get(CLAIM_DEPLOYMENT_ID)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let organization = string_claim(claims, CLAIM_ORGANIZATION, "organization")?;
    let storage_capacity = integer_claim(claims, CLAIM_CAPACITY, "storageCapacity")?;
    let plan = string_claim(claims, CLAIM_PLAN, "plan")?;

    let email = claims
        .get(CLAIM_SUBJECT)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(LicenseInfo {
        email,
        organization,
        account_id,
        deployment_id,
        storage_capacity,
        plan,
        expires_at: expiry(claims)?,
    })
}

/// Reads the required expiry claim as a UTC timestamp.
pub(crate) fn expiry(claims: &RawClaims) -> LicenseResult<DateTime<Utc>> {
    let secs = integer_claim(claims, CLAIM_EXPIRY, "expiry")?;
    DateTime::from_timestamp(secs, 0).ok_or(LicenseError::InvalidClaim("expiry"))
}

/// Reads the optional not-before claim as a UTC timestamp.
pub(crate) fn not_before(claims: &RawClaims) -> LicenseResult<Option<DateTime<Utc>>> {
    let Some(value) = claims.get(CLAIM_NOT_BEFORE) else {
        return Ok(None);
    };
    let secs = value.as_i64().ok_or(LicenseError::InvalidClaim("notBefore"))?;
    let ts = DateTime::from_timestamp(secs, 0).ok_or(LicenseError::InvalidClaim("notBefore"))?;
    Ok(Some(ts))
}

fn string_claim(claims: &RawClaims, key: &str, field: &'static str) -> LicenseResult<String> {
    claims
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(LicenseError::InvalidClaim(field))
}

fn integer_claim(claims: &RawClaims, key: &str, field: &'static str) -> LicenseResult<i64> {
    claims
        .get(key)
        .and_then(Value::as_i64)
        .ok_or(LicenseError::InvalidClaim(field))
}
