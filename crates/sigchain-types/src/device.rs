//! The device record
//!
//! A device is created once with a fresh key pair and mutated only by
//! signing, which advances its sign counter. Devices are never deleted.

use crate::DeviceId;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

/// A signing device and its key material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Caller-supplied identifier; device creation is idempotent-by-id
    pub id: DeviceId,
    /// Free-text display name
    pub label: String,
    /// Registered algorithm name used for all of this device's signatures;
    /// immutable after creation
    pub sign_algorithm: String,
    /// PEM-encoded public key
    pub public_key: String,
    /// PEM-encoded private key. Stored plaintext; key protection at rest
    /// is out of scope
    pub private_key: String,
    /// Count of signed transactions persisted for this device
    pub sign_counter: u64,
}

impl Device {
    /// Create a fresh device with its counter at zero
    pub fn new(
        id: DeviceId,
        label: impl Into<String>,
        sign_algorithm: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            sign_algorithm: sign_algorithm.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
            sign_counter: 0,
        }
    }

    /// The chain anchor: base64 of the device id's string form.
    ///
    /// A device's first transaction has no predecessor to reference, so its
    /// `previous_signature` is this value instead.
    pub fn chain_anchor(&self) -> String {
        BASE64.encode(self.id.to_string().as_bytes())
    }
}
