//! RSA signing with SHA-256 digests
//!
//! Keys are serialized as PKCS#1 PEM. Signatures are PKCS#1 v1.5 over the
//! SHA-256 digest of the payload.

use crate::{CryptoError, CryptoResult, KeyPairPem, SignatureAlgorithm};
use rsa::pkcs1::{
    DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding,
};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

/// Registry name for this algorithm
pub const RSA_ALGORITHM_NAME: &str = "RSA";

/// Modulus size for generated keys. Kept small so per-device key issuance
/// stays in the tens of milliseconds; not a production-strength parameter.
pub const RSA_KEY_BITS: usize = 1024;

/// RSA + SHA-256 signature algorithm
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaSha256;

impl RsaSha256 {
    pub fn new() -> Self {
        Self
    }

    fn parse_private_key(pem: &str) -> CryptoResult<RsaPrivateKey> {
        RsaPrivateKey::from_pkcs1_pem(pem)
            .map_err(|e| CryptoError::InvalidKeyFormat(e.to_string()))
    }
}

impl SignatureAlgorithm for RsaSha256 {
    fn name(&self) -> &'static str {
        RSA_ALGORITHM_NAME
    }

    fn generate_key_pair(&self) -> CryptoResult<KeyPairPem> {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS)
            .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;
        let public_key = RsaPublicKey::from(&private_key);

        let private_pem = private_key
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;
        let public_pem = public_key
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;

        Ok(KeyPairPem {
            public_key: public_pem,
            private_key: private_pem.to_string(),
        })
    }

    fn sign(&self, private_key_pem: &str, data: &[u8]) -> CryptoResult<Vec<u8>> {
        let private_key = Self::parse_private_key(private_key_pem)?;

        let digest = Sha256::digest(data);
        let signature = private_key
            .sign(Pkcs1v15Sign::new::<Sha256>(), digest.as_slice())
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        // Self-check: a corrupted private key must fail here, not at some
        // later verification by a relying party.
        let public_key = RsaPublicKey::from(&private_key);
        public_key
            .verify(Pkcs1v15Sign::new::<Sha256>(), digest.as_slice(), &signature)
            .map_err(|e| CryptoError::VerificationFailed(e.to_string()))?;

        Ok(signature)
    }

    fn verify(&self, public_key_pem: &str, data: &[u8], signature: &[u8]) -> CryptoResult<bool> {
        let public_key = RsaPublicKey::from_pkcs1_pem(public_key_pem)
            .map_err(|e| CryptoError::InvalidKeyFormat(e.to_string()))?;

        let digest = Sha256::digest(data);
        Ok(public_key
            .verify(Pkcs1v15Sign::new::<Sha256>(), digest.as_slice(), signature)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let algorithm = RsaSha256::new();
        let keys = algorithm.generate_key_pair().unwrap();

        let signature = algorithm.sign(&keys.private_key, b"payload").unwrap();
        assert!(algorithm
            .verify(&keys.public_key, b"payload", &signature)
            .unwrap());
    }

    #[test]
    fn test_corrupted_signature_fails() {
        let algorithm = RsaSha256::new();
        let keys = algorithm.generate_key_pair().unwrap();

        let mut signature = algorithm.sign(&keys.private_key, b"payload").unwrap();
        signature[0] ^= 0xff;
        assert!(!algorithm
            .verify(&keys.public_key, b"payload", &signature)
            .unwrap());
    }

    #[test]
    fn test_corrupted_data_fails() {
        let algorithm = RsaSha256::new();
        let keys = algorithm.generate_key_pair().unwrap();

        let signature = algorithm.sign(&keys.private_key, b"payload").unwrap();
        assert!(!algorithm
            .verify(&keys.public_key, b"paylaod", &signature)
            .unwrap());
    }

    #[test]
    fn test_malformed_private_key_rejected() {
        let algorithm = RsaSha256::new();
        let result = algorithm.sign("not a pem", b"payload");
        assert!(matches!(result, Err(CryptoError::InvalidKeyFormat(_))));
    }
}
