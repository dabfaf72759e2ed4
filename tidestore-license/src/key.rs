//! Public key loading and the ES384 verification key set.
//!
//! The license service publishes its verification key as a PEM blob wrapping
//! either a PKIX `SubjectPublicKeyInfo` or a full X.509 certificate. Both
//! encodings are accepted; anything that is not an ECDSA P-384 key is
//! rejected so a token can never be checked against a mismatched scheme.

use crate::error::{LicenseError, LicenseResult};
use p384::PublicKey;
use p384::ecdsa::VerifyingKey;
use p384::pkcs8::DecodePublicKey;
use spki::SubjectPublicKeyInfoRef;
use spki::der::asn1::ObjectIdentifier;
use spki::der::{Decode, Document, Encode};
use x509_cert::Certificate;

/// ANSI X9.62 id-ecPublicKey, the only key algorithm the verifier accepts.
const ID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// Parses a PEM encoded PKIX public key or X.509 certificate into a P-384
/// public key.
///
/// The inner DER payload is first tried as a bare `SubjectPublicKeyInfo`;
/// if that fails it is tried as a certificate and the embedded key is
/// extracted. Keys of any other algorithm family or curve are rejected with
/// [`LicenseError::KeyType`].
pub(crate) fn load_ec_public_key(pem_bytes: &[u8]) -> LicenseResult<PublicKey> {
    let text = std::str::from_utf8(pem_bytes)
        .map_err(|_| LicenseError::KeyFormat("key blob is not UTF-8 text".to_string()))?;

    let (_label, document) = Document::from_pem(text.trim())
        .map_err(|err| LicenseError::KeyFormat(format!("no PEM block found: {err}")))?;
    let der = document.as_bytes();

    // Bare PKIX public key first, certificate as the fallback. On a double
    // failure the SPKI error is the one worth reporting.
    let spki_der = match SubjectPublicKeyInfoRef::from_der(der) {
        Ok(_) => der.to_vec(),
        Err(spki_err) => {
            let cert = Certificate::from_der(der)
                .map_err(|_| LicenseError::KeyFormat(spki_err.to_string()))?;
            cert.tbs_certificate
                .subject_public_key_info
                .to_der()
                .map_err(|err| LicenseError::KeyFormat(err.to_string()))?
        }
    };

    let spki = SubjectPublicKeyInfoRef::from_der(&spki_der)
        .map_err(|err| LicenseError::KeyFormat(err.to_string()))?;
    if spki.algorithm.oid != ID_EC_PUBLIC_KEY {
        return Err(LicenseError::KeyType(format!(
            "key algorithm {} is not an EC key",
            spki.algorithm.oid
        )));
    }

    // Wrong-curve EC keys land here: the SPKI parameters must name secp384r1.
    PublicKey::from_public_key_der(&spki_der).map_err(|err| LicenseError::KeyType(err.to_string()))
}

/// Signature algorithm a key set is bound to.
///
/// The verifier supports exactly one scheme. The binding is explicit rather
/// than inferred from the key so a token declaring anything else is refused
/// before signature bytes are even looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignatureAlgorithm {
    /// ECDSA over P-384 with SHA-384.
    Es384,
}

impl SignatureAlgorithm {
    /// The JOSE header name for this algorithm.
    pub(crate) const fn header_name(self) -> &'static str {
        match self {
            SignatureAlgorithm::Es384 => "ES384",
        }
    }
}

/// One public key bound to one signature algorithm.
///
/// Immutable after construction and holds no secret material.
#[derive(Clone)]
pub(crate) struct VerificationKeySet {
    key: VerifyingKey,
    algorithm: SignatureAlgorithm,
}

impl VerificationKeySet {
    /// Loads `pem_bytes` and binds the resulting key to ES384.
    pub(crate) fn es384(pem_bytes: &[u8]) -> LicenseResult<Self> {
        let public_key = load_ec_public_key(pem_bytes)?;
        Ok(Self {
            key: VerifyingKey::from(&public_key),
            algorithm: SignatureAlgorithm::Es384,
        })
    }

    /// Returns the verifying key for a token that declares `header_alg`.
    ///
    /// Any algorithm other than the bound one is an
    /// [`LicenseError::AlgorithmMismatch`].
    pub(crate) fn lookup(&self, header_alg: &str) -> LicenseResult<&VerifyingKey> {
        if header_alg != self.algorithm.header_name() {
            return Err(LicenseError::AlgorithmMismatch {
                expected: self.algorithm.header_name(),
                found: header_alg.to_string(),
            });
        }
        Ok(&self.key)
    }

    /// The algorithm this key set is bound to.
    pub(crate) fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }
}

impl std::fmt::Debug for VerificationKeySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationKeySet")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
