//! Signed transaction DTOs

use serde::{Deserialize, Serialize};
use sigchain_types::{SignedTransaction, TransactionId};

/// Request body for creating a signature
#[derive(Debug, Clone, Deserialize)]
pub struct SignTransactionRequest {
    /// Data to be signed
    pub data: String,
}

/// Signed transaction summary: the signature plus the exact payload it
/// covers, so callers can verify without re-deriving the format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedTransactionResponse {
    pub id: TransactionId,
    pub signature: String,
    pub signed_data: String,
}

impl From<SignedTransaction> for SignedTransactionResponse {
    fn from(transaction: SignedTransaction) -> Self {
        Self {
            id: transaction.id,
            signature: transaction.signature.clone(),
            signed_data: transaction.signable_data(),
        }
    }
}
