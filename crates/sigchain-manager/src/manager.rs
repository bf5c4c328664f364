//! The device manager

use crate::{ManagerError, ManagerResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use dashmap::DashMap;
use sigchain_crypto::AlgorithmRegistry;
use sigchain_store::{DeviceStore, StoreError};
use sigchain_types::{Device, DeviceId, SignedTransaction, TransactionId};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Orchestrates device creation and signed-transaction creation.
///
/// Mutating operations for one device are serialized through a per-device
/// lock; operations on distinct devices run concurrently.
pub struct DeviceManager {
    store: Arc<dyn DeviceStore>,
    registry: Arc<AlgorithmRegistry>,
    device_locks: DashMap<DeviceId, Arc<Mutex<()>>>,
}

impl DeviceManager {
    pub fn new(store: Arc<dyn DeviceStore>, registry: Arc<AlgorithmRegistry>) -> Self {
        Self {
            store,
            registry,
            device_locks: DashMap::new(),
        }
    }

    /// The lock serializing mutations for one device. Created on demand and
    /// never removed: a stale entry is one Arc, and dropping it while a
    /// request holds the lock would let a second lock for the same device
    /// exist.
    fn lock_for(&self, id: DeviceId) -> Arc<Mutex<()>> {
        self.device_locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Create a device with a fresh key pair and its counter at zero.
    ///
    /// Fails with [`ManagerError::DeviceExists`] if the caller-chosen id is
    /// taken and with [`ManagerError::InvalidAlgorithm`] before any key is
    /// generated or anything is written.
    pub async fn create_device(
        &self,
        id: DeviceId,
        label: &str,
        algorithm: &str,
    ) -> ManagerResult<Device> {
        // Creation is check-then-write, so it takes the same per-device
        // lock as signing; the store's duplicate rejection remains the
        // final arbiter.
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        match self.store.get_device(id).await {
            Ok(_) => return Err(ManagerError::DeviceExists(id)),
            Err(StoreError::DeviceNotFound(_)) => {}
            Err(err) => return Err(err.into()),
        }

        if !self.registry.is_valid(algorithm) {
            return Err(ManagerError::InvalidAlgorithm(algorithm.to_string()));
        }

        let keys = self.registry.get(algorithm)?.generate_key_pair()?;
        let device = Device::new(id, label, algorithm, keys.public_key, keys.private_key);

        self.store.save_device(device.clone()).await?;
        tracing::info!(device_id = %id, algorithm, "device created");

        Ok(device)
    }

    /// All devices
    pub async fn get_devices(&self) -> ManagerResult<Vec<Device>> {
        Ok(self.store.get_devices().await?)
    }

    /// One device by id
    pub async fn get_device(&self, id: DeviceId) -> ManagerResult<Device> {
        Ok(self.store.get_device(id).await?)
    }

    /// Extend a device's signature chain by one transaction.
    ///
    /// The signed payload is `"{counter}_{raw_data}_{previous_signature}"`
    /// where the previous signature is the chain anchor (base64 of the
    /// device id) for the first transaction. The transaction is persisted
    /// before the counter advances; see the crate docs for why that order
    /// is load-bearing.
    pub async fn create_signed_transaction(
        &self,
        device_id: DeviceId,
        raw_data: Vec<u8>,
    ) -> ManagerResult<SignedTransaction> {
        let lock = self.lock_for(device_id);
        let _guard = lock.lock().await;

        let mut device = self.store.get_device(device_id).await?;

        let previous_signature = self.previous_signature(&device).await?;

        let mut transaction = SignedTransaction {
            id: TransactionId::new(),
            device_id,
            raw_data,
            sign_counter: device.sign_counter + 1,
            previous_signature,
            signature: String::new(),
        };

        let algorithm = self.registry.get(&device.sign_algorithm)?;
        let signature = algorithm.sign(
            &device.private_key,
            transaction.signable_data().as_bytes(),
        )?;
        transaction.signature = BASE64.encode(signature);

        self.store.save_signed_transaction(transaction.clone()).await?;

        // The counter moves only after the transaction is durable.
        device.sign_counter += 1;
        self.store.update_device(device).await?;

        tracing::debug!(
            device_id = %device_id,
            sign_counter = transaction.sign_counter,
            "signed transaction created"
        );

        Ok(transaction)
    }

    /// All signed transactions for a device, in creation order
    pub async fn get_signed_transactions(
        &self,
        device_id: DeviceId,
    ) -> ManagerResult<Vec<SignedTransaction>> {
        Ok(self.store.get_signed_transactions(device_id).await?)
    }

    /// Signature of the transaction at the device's current counter, or the
    /// chain anchor if the device has not signed yet
    async fn previous_signature(&self, device: &Device) -> ManagerResult<String> {
        let previous = self
            .store
            .get_signed_transaction(device.id, device.sign_counter)
            .await?;

        Ok(match previous {
            Some(transaction) => transaction.signature,
            None => device.chain_anchor(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigchain_store::MemoryStore;

    fn manager() -> Arc<DeviceManager> {
        Arc::new(DeviceManager::new(
            Arc::new(MemoryStore::new()),
            Arc::new(AlgorithmRegistry::with_defaults()),
        ))
    }

    #[tokio::test]
    async fn test_create_device_starts_at_zero() {
        let manager = manager();
        let id = DeviceId::new();

        let device = manager.create_device(id, "terminal-1", "ECDSA").await.unwrap();

        assert_eq!(device.id, id);
        assert_eq!(device.sign_counter, 0);
        assert_eq!(device.sign_algorithm, "ECDSA");
        assert!(device.public_key.contains("BEGIN PUBLIC KEY"));
    }

    #[tokio::test]
    async fn test_duplicate_device_rejected_without_mutation() {
        let manager = manager();
        let id = DeviceId::new();

        manager.create_device(id, "original", "ECDSA").await.unwrap();
        let result = manager.create_device(id, "impostor", "ECDSA").await;

        assert!(matches!(result, Err(ManagerError::DeviceExists(_))));
        let device = manager.get_device(id).await.unwrap();
        assert_eq!(device.label, "original");
    }

    #[tokio::test]
    async fn test_invalid_algorithm_writes_nothing() {
        let manager = manager();
        let result = manager
            .create_device(DeviceId::new(), "terminal-1", "DSA")
            .await;

        assert!(matches!(result, Err(ManagerError::InvalidAlgorithm(_))));
        assert!(manager.get_devices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sign_against_missing_device() {
        let manager = manager();
        let result = manager
            .create_signed_transaction(DeviceId::new(), b"data".to_vec())
            .await;

        assert!(matches!(result, Err(ManagerError::DeviceNotFound(_))));
    }

    #[tokio::test]
    async fn test_first_transaction_anchors_on_device_id() {
        let manager = manager();
        let device = manager
            .create_device(DeviceId::new(), "terminal-1", "ECDSA")
            .await
            .unwrap();

        let transaction = manager
            .create_signed_transaction(device.id, b"data1".to_vec())
            .await
            .unwrap();

        assert_eq!(transaction.sign_counter, 1);
        assert_eq!(transaction.previous_signature, device.chain_anchor());
    }

    #[tokio::test]
    async fn test_chain_links_and_counter_track() {
        let manager = manager();
        let device = manager
            .create_device(DeviceId::new(), "terminal-1", "ECDSA")
            .await
            .unwrap();

        for i in 0..5u64 {
            manager
                .create_signed_transaction(device.id, format!("data{i}").into_bytes())
                .await
                .unwrap();
        }

        let chain = manager.get_signed_transactions(device.id).await.unwrap();
        assert_eq!(chain.len(), 5);
        for (index, transaction) in chain.iter().enumerate() {
            assert_eq!(transaction.sign_counter, index as u64 + 1);
            if index > 0 {
                assert_eq!(
                    transaction.previous_signature,
                    chain[index - 1].signature
                );
            }
        }

        assert_eq!(manager.get_device(device.id).await.unwrap().sign_counter, 5);
    }

    #[tokio::test]
    async fn test_signatures_verify_against_device_key() {
        let manager = manager();
        let registry = AlgorithmRegistry::with_defaults();
        let device = manager
            .create_device(DeviceId::new(), "terminal-1", "ECDSA")
            .await
            .unwrap();

        let transaction = manager
            .create_signed_transaction(device.id, b"data1".to_vec())
            .await
            .unwrap();

        let signature = BASE64.decode(&transaction.signature).unwrap();
        let verified = registry
            .get("ECDSA")
            .unwrap()
            .verify(
                &device.public_key,
                transaction.signable_data().as_bytes(),
                &signature,
            )
            .unwrap();
        assert!(verified);
    }

    #[tokio::test]
    async fn test_concurrent_signing_keeps_counter_contiguous() {
        let manager = manager();
        let device = manager
            .create_device(DeviceId::new(), "terminal-1", "ECDSA")
            .await
            .unwrap();

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let manager = manager.clone();
                let device_id = device.id;
                tokio::spawn(async move {
                    manager
                        .create_signed_transaction(device_id, format!("data{i}").into_bytes())
                        .await
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let device = manager.get_device(device.id).await.unwrap();
        assert_eq!(device.sign_counter, 16);

        let chain = manager.get_signed_transactions(device.id).await.unwrap();
        assert_eq!(chain.len(), 16);

        let mut counters: Vec<u64> = chain.iter().map(|t| t.sign_counter).collect();
        counters.sort_unstable();
        assert_eq!(counters, (1..=16).collect::<Vec<u64>>());

        // The stored order is the chain order
        for window in chain.windows(2) {
            assert_eq!(window[1].previous_signature, window[0].signature);
        }
    }

    #[tokio::test]
    async fn test_example_scenario() {
        let manager = manager();
        let d1 = manager
            .create_device(DeviceId::new(), "d1", "RSA")
            .await
            .unwrap();
        assert_eq!(d1.sign_counter, 0);

        let first = manager
            .create_signed_transaction(d1.id, b"data1".to_vec())
            .await
            .unwrap();
        assert_eq!(first.sign_counter, 1);
        assert_eq!(
            first.previous_signature,
            BASE64.encode(d1.id.to_string().as_bytes())
        );

        let second = manager
            .create_signed_transaction(d1.id, b"data2".to_vec())
            .await
            .unwrap();
        assert_eq!(second.sign_counter, 2);
        assert_eq!(second.previous_signature, first.signature);

        let chain = manager.get_signed_transactions(d1.id).await.unwrap();
        assert_eq!(chain, vec![first, second]);
    }
}
