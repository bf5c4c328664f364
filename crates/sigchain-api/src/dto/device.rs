//! Device DTOs

use serde::{Deserialize, Serialize};
use sigchain_types::{Device, DeviceId};

/// Request body for creating a device
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDeviceRequest {
    /// Registered algorithm name
    pub algorithm: String,
    /// Display name
    #[serde(default)]
    pub label: String,
}

/// Device summary. The private key is deliberately absent: it never
/// crosses the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceResponse {
    pub id: DeviceId,
    pub label: String,
    pub sign_algorithm: String,
    pub public_key: String,
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            label: device.label,
            sign_algorithm: device.sign_algorithm,
            public_key: device.public_key,
        }
    }
}
