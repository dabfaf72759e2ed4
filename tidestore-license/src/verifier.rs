//! License token verification.
//!
//! License tokens are compact JWS structures:
//! `base64url(header).base64url(payload).base64url(signature)`, signed with
//! ES384. The pipeline is strictly linear: parse the envelope, verify the
//! signature, enforce temporal claims, then extract typed metadata. The
//! first failing stage aborts; no partially-trusted result is ever returned.

use crate::claims::{self, LicenseInfo, RawClaims};
use crate::error::{LicenseError, LicenseResult};
use crate::key::VerificationKeySet;
use crate::options::VerifyOptions;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use p384::ecdsa::Signature;
use p384::ecdsa::signature::Verifier as _;
use serde::Deserialize;

/// JOSE header fields the verifier inspects.
#[derive(Debug, Deserialize)]
struct JoseHeader {
    alg: String,
}

/// Verifies license tokens against the license service's public key.
///
/// Construction is the only fallible step tied to key material. A built
/// verifier is immutable and safe to share across threads for any number of
/// verifications.
#[derive(Debug, Clone)]
pub struct LicenseVerifier {
    key_set: VerificationKeySet,
}

impl LicenseVerifier {
    /// Creates a verifier from a PEM encoded ECDSA P-384 public key or
    /// X.509 certificate.
    pub fn new(pem_bytes: &[u8]) -> LicenseResult<Self> {
        let key_set = VerificationKeySet::es384(pem_bytes)?;
        tracing::debug!(
            algorithm = key_set.algorithm().header_name(),
            "license verifier initialized"
        );
        Ok(Self { key_set })
    }

    /// Verifies a license token with default options.
    pub fn verify(&self, license: &str) -> LicenseResult<LicenseInfo> {
        self.verify_with_options(license, &VerifyOptions::default())
    }

    /// Verifies a license token and extracts its customer metadata.
    pub fn verify_with_options(
        &self,
        license: &str,
        options: &VerifyOptions,
    ) -> LicenseResult<LicenseInfo> {
        let license = license.trim();
        let (header_b64, payload_b64, signature_b64) = split_segments(license)?;

        let header: JoseHeader = serde_json::from_slice(&decode_segment(header_b64, "header")?)
            .map_err(|err| LicenseError::MalformedToken(format!("invalid header JSON: {err}")))?;
        let key = self.key_set.lookup(&header.alg)?;

        let signature_bytes = decode_segment(signature_b64, "signature")?;
        let signature =
            Signature::from_slice(&signature_bytes).map_err(|_| LicenseError::InvalidSignature)?;

        // The signature covers the raw `header.payload` text.
        let signing_input = format!("{header_b64}.{payload_b64}");
        key.verify(signing_input.as_bytes(), &signature)
            .map_err(|_| LicenseError::InvalidSignature)?;

        let claims: RawClaims = serde_json::from_slice(&decode_segment(payload_b64, "payload")?)
            .map_err(|err| LicenseError::MalformedToken(format!("invalid payload JSON: {err}")))?;

        let now = options.now();
        let expires_at = claims::expiry(&claims)?;
        if !options.skip_expiry_check && now >= expires_at {
            return Err(LicenseError::Expired(expires_at));
        }
        if let Some(not_before) = claims::not_before(&claims)? {
            if now < not_before {
                return Err(LicenseError::NotYetValid(not_before));
            }
        }
        for predicate in &options.claim_predicates {
            predicate(&claims)?;
        }

        let info = claims::extract_info(&claims)?;
        tracing::debug!(
            organization = %info.organization,
            account_id = info.account_id,
            "license verified"
        );
        Ok(info)
    }
}

/// Verifies that a license token is valid for a specific deployment.
///
/// Builds a [`LicenseVerifier`] from `pem_bytes`, verifies `license`, and
/// asserts that the embedded deployment id equals `expected_deployment_id`
/// by exact string equality.
pub fn verify_deployment_license(
    license: &str,
    expected_deployment_id: &str,
    pem_bytes: &[u8],
    options: &VerifyOptions,
) -> LicenseResult<()> {
    let verifier = LicenseVerifier::new(pem_bytes)?;
    let info = verifier.verify_with_options(license, options)?;

    if info.deployment_id != expected_deployment_id {
        tracing::debug!(
            expected = %expected_deployment_id,
            found = %info.deployment_id,
            "license bound to a different deployment"
        );
        return Err(LicenseError::DeploymentMismatch {
            expected: expected_deployment_id.to_string(),
            found: info.deployment_id,
        });
    }
    Ok(())
}

fn split_segments(license: &str) -> LicenseResult<(&str, &str, &str)> {
    let mut parts = license.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None) => Ok((header, payload, signature)),
        _ => Err(LicenseError::MalformedToken(
            "token must have exactly three dot separated segments".to_string(),
        )),
    }
}

fn decode_segment(segment: &str, what: &str) -> LicenseResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|err| LicenseError::MalformedToken(format!("invalid {what} base64: {err}")))
}
