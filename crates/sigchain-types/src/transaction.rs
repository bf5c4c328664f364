//! Signed transactions
//!
//! Each signed transaction links back to its predecessor through
//! `previous_signature`, forming a tamper-evident chain per device.

use crate::{DeviceId, TransactionId};
use serde::{Deserialize, Serialize};

/// One link in a device's signature chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// Server-generated identifier
    pub id: TransactionId,
    /// Owning device
    pub device_id: DeviceId,
    /// Caller-supplied bytes that were signed (input, not the signed payload)
    pub raw_data: Vec<u8>,
    /// Counter value assigned to this transaction: the device's
    /// pre-increment counter + 1
    pub sign_counter: u64,
    /// Base64 signature of the immediately prior transaction, or the
    /// device's chain anchor for the first transaction
    pub previous_signature: String,
    /// Base64 signature over `signable_data()`
    pub signature: String,
}

impl SignedTransaction {
    /// The exact payload that gets hashed and signed:
    /// `"{sign_counter}_{raw_data}_{previous_signature}"`.
    ///
    /// Never stored; always derived. Raw bytes are rendered as UTF-8,
    /// lossily for non-UTF-8 input.
    pub fn signable_data(&self) -> String {
        format!(
            "{}_{}_{}",
            self.sign_counter,
            String::from_utf8_lossy(&self.raw_data),
            self.previous_signature
        )
    }
}
