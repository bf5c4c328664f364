//! The signature algorithm contract
//!
//! Devices reference algorithms by name; everything an algorithm must be
//! able to do for the device manager is captured here.

use crate::CryptoResult;
use serde::{Deserialize, Serialize};

/// A freshly generated key pair, serialized for storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPairPem {
    /// PEM-encoded public key
    pub public_key: String,
    /// PEM-encoded private key
    pub private_key: String,
}

/// A named asymmetric signing scheme.
///
/// `sign` must hash the data (content hash, never raw signing of
/// arbitrary-length input), sign the hash, and verify the result against
/// the paired public key before returning it.
pub trait SignatureAlgorithm: Send + Sync {
    /// Registry name, e.g. `"RSA"`
    fn name(&self) -> &'static str;

    /// Generate a fresh key pair and serialize both halves
    fn generate_key_pair(&self) -> CryptoResult<KeyPairPem>;

    /// Hash and sign `data` with the PEM-encoded private key
    fn sign(&self, private_key_pem: &str, data: &[u8]) -> CryptoResult<Vec<u8>>;

    /// Verify a signature produced by `sign` against the PEM-encoded
    /// public key. Returns `Ok(false)` for a well-formed but wrong
    /// signature; `Err` only for malformed inputs.
    fn verify(&self, public_key_pem: &str, data: &[u8], signature: &[u8]) -> CryptoResult<bool>;
}
