//! Selection of the embedded license service verification keys.
//!
//! The core verifier takes key material as an argument; this module is the
//! thin policy layer that picks which embedded key a deployment should use.
//! CI/CD environments verify against the development key, everything else
//! against the production key.

use std::env;

/// Environment variable that switches key selection to the development key.
/// Any non-empty value enables it.
pub const DEV_MODE_ENV: &str = "TIDESTORE_CI_CD";

/// License service production verification key.
const PRODUCTION_PUBLIC_KEY_PEM: &[u8] = b"-----BEGIN PUBLIC KEY-----
MHYwEAYHKoZIzj0CAQYFK4EEACIDYgAEaK31xujr6/rZ7ZfXZh3SlwovjC+X8wGq
qkltaKyTLRENd4w3IRktYYCRgzpDLPn/nrf7snV/ERO5qcI7fkEES34IVEr+2Uff
JkO2PfyyAYEO/5dBlPh1Undu9WQl6J7B
-----END PUBLIC KEY-----";

/// License service development verification key, used by CI/CD deployments.
const DEVELOPMENT_PUBLIC_KEY_PEM: &[u8] = b"-----BEGIN PUBLIC KEY-----
MHYwEAYHKoZIzj0CAQYFK4EEACIDYgAEbo+e1wpBY4tBq9AONKww3Kq7m6QP/TBQ
mr/cKCUyBL7rcAvg0zNq1vcSrUSGlAmY3SEDCu3GOKnjG/U4E7+p957ocWSV+mQU
9NKlTdQFGF3+aO6jbQ4hX/S5qPyF+a3z
-----END PUBLIC KEY-----";

/// Which embedded license service key to verify against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Verify against the production key.
    Production,
    /// Verify against the development key.
    Development,
}

impl KeyMode {
    /// Selects the mode from the environment: [`KeyMode::Development`] when
    /// [`DEV_MODE_ENV`] is set to a non-empty value, else
    /// [`KeyMode::Production`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_value(env::var(DEV_MODE_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => KeyMode::Development,
            _ => KeyMode::Production,
        }
    }

    /// The embedded license service public key PEM for this mode.
    #[must_use]
    pub fn public_key_pem(self) -> &'static [u8] {
        match self {
            KeyMode::Production => PRODUCTION_PUBLIC_KEY_PEM,
            KeyMode::Development => DEVELOPMENT_PUBLIC_KEY_PEM,
        }
    }
}
