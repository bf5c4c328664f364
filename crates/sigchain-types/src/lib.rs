//! sigchain Types - Canonical domain types for signature chaining
//!
//! This crate contains the foundational types for sigchain with zero
//! dependencies on other sigchain crates:
//!
//! - Identity types (DeviceId, TransactionId)
//! - The device record and its sign counter
//! - Signed transactions and their derived signable payload
//!
//! # Architectural Invariants
//!
//! 1. A device's `sign_counter` equals the number of transactions persisted
//!    for it, and equals the counter recorded on its newest transaction
//! 2. Transaction *k*'s `previous_signature` is transaction *k-1*'s
//!    `signature`; transaction 1 anchors on base64 of the device id
//! 3. Transactions are append-only and immutable once created

pub mod device;
pub mod identity;
pub mod transaction;

pub use device::*;
pub use identity::*;
pub use transaction::*;

/// Version of the sigchain types schema
pub const TYPES_VERSION: &str = "0.1.0";
