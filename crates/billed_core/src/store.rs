use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::bill::Bill;
use crate::models::receipt::{CreatedReceipt, ReceiptPayload};

/// The bill store contract. Every operation may fail with an error carrying
/// a human-readable message; callers surface the message, never retry.
#[async_trait]
pub trait BillStore: Send + Sync {
    /// All bills visible to the caller.
    async fn list(&self) -> Result<Vec<Bill>>;

    /// Persist a receipt file, returning its public URL and store key.
    async fn create(&self, payload: ReceiptPayload) -> Result<CreatedReceipt>;

    /// Persist a complete bill record. `key` is the receipt upload key;
    /// None means no receipt was ever uploaded and the store decides.
    async fn update(&self, key: Option<Uuid>, bill: &Bill) -> Result<()>;
}
