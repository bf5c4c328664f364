//! sigchain Manager - the signature chaining core
//!
//! The device manager orchestrates device creation and signed-transaction
//! creation. It owns the service's one hard invariant:
//!
//! **A device's sign counter and its transaction history never diverge,
//! even under concurrent signing requests against the same device.**
//!
//! # Critical section
//!
//! Extending a chain reads the counter, derives the payload from
//! `{counter + 1, raw data, previous signature}`, persists the signed
//! transaction, and only then advances the counter. The whole sequence is
//! serialized per device: no two signing operations for the same device
//! ever observe the same pre-increment counter value.
//!
//! # Failure direction
//!
//! The transaction is durably stored before the counter moves. A crash
//! between the two writes leaves the counter lagging one behind the stored
//! chain, which an operator can reconcile by recounting. The reverse, a
//! counter ahead of the stored chain, cannot be corrected safely and is
//! treated as a fatal consistency violation.

pub mod manager;

pub use manager::DeviceManager;

use sigchain_crypto::CryptoError;
use sigchain_store::StoreError;
use sigchain_types::DeviceId;
use thiserror::Error;

/// Device manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Device already exists: {0}")]
    DeviceExists(DeviceId),

    #[error("Device not found: {0}")]
    DeviceNotFound(DeviceId),

    #[error("Invalid algorithm: {0}")]
    InvalidAlgorithm(String),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Storage error: {0}")]
    Store(String),
}

impl From<StoreError> for ManagerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DeviceNotFound(id) => Self::DeviceNotFound(id),
            StoreError::DeviceExists(id) => Self::DeviceExists(id),
            StoreError::Backend(message) => Self::Store(message),
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
