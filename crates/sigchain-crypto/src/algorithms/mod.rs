//! Built-in signature algorithms
//!
//! Each submodule provides one [`SignatureAlgorithm`](crate::SignatureAlgorithm)
//! implementation. The registry registers both by default; additional
//! algorithms can be registered without touching the device manager.

mod ecdsa;
mod rsa;

pub use self::ecdsa::{EcdsaP384, ECDSA_ALGORITHM_NAME};
pub use self::rsa::{RsaSha256, RSA_ALGORITHM_NAME, RSA_KEY_BITS};
