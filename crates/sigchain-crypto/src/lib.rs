//! sigchain Crypto - Cryptographic primitives for signature chaining
//!
//! This crate provides:
//! - Key pair generation per named algorithm, serialized as PEM blobs
//! - Hash-then-sign signing with a post-sign self-verification
//! - An explicit algorithm registry (RSA and ECDSA P-384 built in)
//!
//! # Security Invariant
//!
//! **Every signature is verified against the paired public key before it
//! leaves this crate.** Silent corruption of key material surfaces as an
//! immediate error instead of a bad signature accepted later.

pub mod algorithm;
pub mod algorithms;
pub mod registry;

pub use algorithm::*;
pub use algorithms::*;
pub use registry::*;

use thiserror::Error;

/// Cryptographic errors
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

pub type CryptoResult<T> = Result<T, CryptoError>;
