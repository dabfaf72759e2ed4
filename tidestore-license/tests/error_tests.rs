use chrono::{DateTime, Utc};
use tidestore_license::LicenseError;

#[test]
fn error_display_key_format() {
    let err = LicenseError::KeyFormat("no PEM block found".into());
    let msg = format!("{err}");
    assert!(msg.contains("invalid public key format"));
    assert!(msg.contains("no PEM block found"));
}

#[test]
fn error_display_key_type() {
    let err = LicenseError::KeyType("key algorithm 1.2.840.113549.1.1.1 is not an EC key".into());
    assert!(format!("{err}").contains("unsupported public key type"));
}

#[test]
fn error_display_malformed_token() {
    let err = LicenseError::MalformedToken("invalid header base64".into());
    let msg = format!("{err}");
    assert!(msg.contains("malformed license token"));
    assert!(msg.contains("invalid header base64"));
}

#[test]
fn error_display_algorithm_mismatch() {
    let err = LicenseError::AlgorithmMismatch {
        expected: "ES384",
        found: "HS256".into(),
    };
    let msg = format!("{err}");
    assert!(msg.contains("ES384"));
    assert!(msg.contains("HS256"));
}

#[test]
fn error_display_invalid_signature() {
    let err = LicenseError::InvalidSignature;
    assert!(format!("{err}").contains("signature"));
}

#[test]
fn error_display_expired() {
    let at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
    let err = LicenseError::Expired(at);
    assert!(format!("{err}").contains("expired"));
}

#[test]
fn error_display_not_yet_valid() {
    let at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
    let err = LicenseError::NotYetValid(at);
    assert!(format!("{err}").contains("not valid before"));
}

#[test]
fn error_display_invalid_claim_names_field() {
    let err = LicenseError::InvalidClaim("accountId");
    let msg = format!("{err}");
    assert!(msg.contains("invalid"));
    assert!(msg.contains("accountId"));
}

#[test]
fn error_display_deployment_mismatch() {
    let err = LicenseError::DeploymentMismatch {
        expected: "dep-999".into(),
        found: "dep-123".into(),
    };
    let msg = format!("{err}");
    assert!(msg.contains("dep-999"));
    assert!(msg.contains("dep-123"));
}

#[test]
fn error_is_debug() {
    let err = LicenseError::InvalidSignature;
    let _ = format!("{err:?}");
}
