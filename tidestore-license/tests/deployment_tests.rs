mod common;

use common::{PUBLIC_KEY_PEM, acme_payload, es384_token, future_exp, past_exp, signing_key};
use tidestore_license::{LicenseError, VerifyOptions, verify_deployment_license};

// ── Deployment binding ───────────────────────────────────────────

#[test]
fn accepts_matching_deployment() {
    let token = es384_token(&signing_key(), &acme_payload(future_exp()));
    let result = verify_deployment_license(&token, "dep-123", PUBLIC_KEY_PEM, &VerifyOptions::new());
    assert!(result.is_ok());
}

#[test]
fn rejects_mismatched_deployment() {
    let token = es384_token(&signing_key(), &acme_payload(future_exp()));
    let err = verify_deployment_license(&token, "dep-999", PUBLIC_KEY_PEM, &VerifyOptions::new())
        .unwrap_err();
    match err {
        LicenseError::DeploymentMismatch { expected, found } => {
            assert_eq!(expected, "dep-999");
            assert_eq!(found, "dep-123");
        }
        other => panic!("expected DeploymentMismatch, got {other:?}"),
    }
}

#[test]
fn unbound_license_fails_against_expected_deployment() {
    // Older licenses carry no deployment id; the extracted id is empty and
    // cannot match a non-empty expectation.
    let payload = format!(
        r#"{{"aid":42,"org":"Acme","cap":100,"plan":"enterprise","exp":{}}}"#,
        future_exp()
    );
    let token = es384_token(&signing_key(), &payload);
    let err = verify_deployment_license(&token, "dep-999", PUBLIC_KEY_PEM, &VerifyOptions::new())
        .unwrap_err();
    assert!(matches!(
        err,
        LicenseError::DeploymentMismatch { found, .. } if found.is_empty()
    ));
}

#[test]
fn comparison_is_exact() {
    let token = es384_token(&signing_key(), &acme_payload(future_exp()));
    let err = verify_deployment_license(&token, "DEP-123", PUBLIC_KEY_PEM, &VerifyOptions::new())
        .unwrap_err();
    assert!(matches!(err, LicenseError::DeploymentMismatch { .. }));
}

// ── Error propagation ────────────────────────────────────────────

#[test]
fn propagates_key_errors() {
    let token = es384_token(&signing_key(), &acme_payload(future_exp()));
    let err =
        verify_deployment_license(&token, "dep-123", b"not-a-key", &VerifyOptions::new())
            .unwrap_err();
    assert!(matches!(err, LicenseError::KeyFormat(_)));
}

#[test]
fn propagates_expiry_errors() {
    let token = es384_token(&signing_key(), &acme_payload(past_exp()));
    let err = verify_deployment_license(&token, "dep-123", PUBLIC_KEY_PEM, &VerifyOptions::new())
        .unwrap_err();
    assert!(matches!(err, LicenseError::Expired(_)));
}

#[test]
fn honors_verification_options() {
    let token = es384_token(&signing_key(), &acme_payload(past_exp()));
    let options = VerifyOptions::new().skip_expiry_check(true);
    assert!(verify_deployment_license(&token, "dep-123", PUBLIC_KEY_PEM, &options).is_ok());
}
