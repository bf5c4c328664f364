//! sigchain Store - persistence contract for devices and their chains
//!
//! The device manager talks to storage exclusively through [`DeviceStore`].
//! The bundled [`MemoryStore`] is the reference backend; a database-backed
//! implementation would slot in behind the same trait.
//!
//! # Contract
//!
//! - Device ids are unique; `save_device` is the final arbiter and rejects
//!   duplicates even if the caller pre-checked
//! - Signed transactions belong to an existing device; `save_signed_transaction`
//!   rejects orphans
//! - Transactions are append-only, kept in creation order per device

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use sigchain_types::{Device, DeviceId, SignedTransaction, TransactionId};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Device not found: {0}")]
    DeviceNotFound(DeviceId),

    #[error("Device already exists: {0}")]
    DeviceExists(DeviceId),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable mapping from device id to device record and to the device's
/// ordered list of signed transactions
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Persist a new device. Fails with [`StoreError::DeviceExists`] if the
    /// id is already present.
    async fn save_device(&self, device: Device) -> StoreResult<()>;

    /// All devices, in unspecified order
    async fn get_devices(&self) -> StoreResult<Vec<Device>>;

    /// Look up one device
    async fn get_device(&self, id: DeviceId) -> StoreResult<Device>;

    /// Replace an existing device record
    async fn update_device(&self, device: Device) -> StoreResult<()>;

    /// Append a signed transaction to its device's chain, returning the
    /// persisted transaction id. Fails with [`StoreError::DeviceNotFound`]
    /// if the referenced device does not exist.
    async fn save_signed_transaction(
        &self,
        transaction: SignedTransaction,
    ) -> StoreResult<TransactionId>;

    /// The transaction recorded at `sign_counter` for a device, if any.
    /// Used to fetch the predecessor when extending the chain.
    async fn get_signed_transaction(
        &self,
        device_id: DeviceId,
        sign_counter: u64,
    ) -> StoreResult<Option<SignedTransaction>>;

    /// All signed transactions for a device, in creation order
    async fn get_signed_transactions(
        &self,
        device_id: DeviceId,
    ) -> StoreResult<Vec<SignedTransaction>>;
}
