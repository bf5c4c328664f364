//! In-memory storage backend

use crate::{DeviceStore, StoreError, StoreResult};
use async_trait::async_trait;
use sigchain_types::{Device, DeviceId, SignedTransaction, TransactionId};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory [`DeviceStore`] backed by `RwLock`'d maps.
///
/// Each lock guards one map; methods that touch both take `devices` first.
pub struct MemoryStore {
    devices: RwLock<HashMap<DeviceId, Device>>,
    transactions: RwLock<HashMap<DeviceId, Vec<SignedTransaction>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            devices: RwLock::new(HashMap::new()),
            transactions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceStore for MemoryStore {
    async fn save_device(&self, device: Device) -> StoreResult<()> {
        let mut devices = self.devices.write().await;
        if devices.contains_key(&device.id) {
            return Err(StoreError::DeviceExists(device.id));
        }
        devices.insert(device.id, device);
        Ok(())
    }

    async fn get_devices(&self) -> StoreResult<Vec<Device>> {
        let devices = self.devices.read().await;
        Ok(devices.values().cloned().collect())
    }

    async fn get_device(&self, id: DeviceId) -> StoreResult<Device> {
        let devices = self.devices.read().await;
        devices
            .get(&id)
            .cloned()
            .ok_or(StoreError::DeviceNotFound(id))
    }

    async fn update_device(&self, device: Device) -> StoreResult<()> {
        let mut devices = self.devices.write().await;
        if !devices.contains_key(&device.id) {
            return Err(StoreError::DeviceNotFound(device.id));
        }
        devices.insert(device.id, device);
        Ok(())
    }

    async fn save_signed_transaction(
        &self,
        transaction: SignedTransaction,
    ) -> StoreResult<TransactionId> {
        let devices = self.devices.read().await;
        if !devices.contains_key(&transaction.device_id) {
            return Err(StoreError::DeviceNotFound(transaction.device_id));
        }

        let mut transactions = self.transactions.write().await;
        let id = transaction.id;
        transactions
            .entry(transaction.device_id)
            .or_default()
            .push(transaction);
        Ok(id)
    }

    async fn get_signed_transaction(
        &self,
        device_id: DeviceId,
        sign_counter: u64,
    ) -> StoreResult<Option<SignedTransaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .get(&device_id)
            .and_then(|chain| chain.iter().find(|t| t.sign_counter == sign_counter))
            .cloned())
    }

    async fn get_signed_transactions(
        &self,
        device_id: DeviceId,
    ) -> StoreResult<Vec<SignedTransaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(&device_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_device() -> Device {
        Device::new(DeviceId::new(), "terminal-1", "ECDSA", "pub", "priv")
    }

    fn test_transaction(device_id: DeviceId, sign_counter: u64) -> SignedTransaction {
        SignedTransaction {
            id: TransactionId::new(),
            device_id,
            raw_data: b"data".to_vec(),
            sign_counter,
            previous_signature: "prev".to_string(),
            signature: "sig".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_and_get_device() {
        let store = MemoryStore::new();
        let device = test_device();

        store.save_device(device.clone()).await.unwrap();
        let loaded = store.get_device(device.id).await.unwrap();
        assert_eq!(loaded, device);
    }

    #[tokio::test]
    async fn test_save_duplicate_device_rejected() {
        let store = MemoryStore::new();
        let device = test_device();

        store.save_device(device.clone()).await.unwrap();
        let result = store.save_device(device).await;
        assert!(matches!(result, Err(StoreError::DeviceExists(_))));
    }

    #[tokio::test]
    async fn test_get_missing_device() {
        let store = MemoryStore::new();
        let result = store.get_device(DeviceId::new()).await;
        assert!(matches!(result, Err(StoreError::DeviceNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_device() {
        let store = MemoryStore::new();
        let mut device = test_device();
        store.save_device(device.clone()).await.unwrap();

        device.sign_counter = 3;
        store.update_device(device.clone()).await.unwrap();

        let loaded = store.get_device(device.id).await.unwrap();
        assert_eq!(loaded.sign_counter, 3);
    }

    #[tokio::test]
    async fn test_update_missing_device_rejected() {
        let store = MemoryStore::new();
        let result = store.update_device(test_device()).await;
        assert!(matches!(result, Err(StoreError::DeviceNotFound(_))));
    }

    #[tokio::test]
    async fn test_transaction_requires_device() {
        let store = MemoryStore::new();
        let result = store
            .save_signed_transaction(test_transaction(DeviceId::new(), 1))
            .await;
        assert!(matches!(result, Err(StoreError::DeviceNotFound(_))));
    }

    #[tokio::test]
    async fn test_transactions_kept_in_order() {
        let store = MemoryStore::new();
        let device = test_device();
        store.save_device(device.clone()).await.unwrap();

        for counter in 1..=3 {
            store
                .save_signed_transaction(test_transaction(device.id, counter))
                .await
                .unwrap();
        }

        let chain = store.get_signed_transactions(device.id).await.unwrap();
        let counters: Vec<u64> = chain.iter().map(|t| t.sign_counter).collect();
        assert_eq!(counters, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_lookup_by_counter() {
        let store = MemoryStore::new();
        let device = test_device();
        store.save_device(device.clone()).await.unwrap();

        let transaction = test_transaction(device.id, 1);
        store
            .save_signed_transaction(transaction.clone())
            .await
            .unwrap();

        let found = store.get_signed_transaction(device.id, 1).await.unwrap();
        assert_eq!(found, Some(transaction));

        let absent = store.get_signed_transaction(device.id, 2).await.unwrap();
        assert_eq!(absent, None);
    }

    #[tokio::test]
    async fn test_empty_chain_for_fresh_device() {
        let store = MemoryStore::new();
        let device = test_device();
        store.save_device(device.clone()).await.unwrap();

        let chain = store.get_signed_transactions(device.id).await.unwrap();
        assert!(chain.is_empty());
    }
}
