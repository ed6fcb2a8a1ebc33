use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use uuid::Uuid;

use billed_core::get_standard_validator;
use billed_core::models::bill::Bill;
use billed_core::models::receipt::{CreatedReceipt, ReceiptPayload};
use billed_core::store::BillStore;
use billed_db::repository::BillRepository;

use crate::BilledService;

impl BilledService {
    pub async fn list_bills(&self) -> Result<Vec<Bill>> {
        let repo = BillRepository::new(self.pool.clone());
        let bills = repo.list_bills().await?;
        Ok(bills)
    }

    pub async fn get_bill(&self, id: Uuid) -> Result<Bill> {
        let repo = BillRepository::new(self.pool.clone());
        let bill = repo.get_bill(id).await?;
        Ok(bill)
    }

    /// Persists a complete bill record. This is the validation boundary:
    /// blocking rule failures reject the record, warnings are only logged.
    pub async fn submit_bill(&self, key: Option<Uuid>, bill: &Bill) -> Result<Uuid> {
        let findings = get_standard_validator().run(bill);

        let blocking: Vec<String> = findings
            .iter()
            .filter(|f| f.is_blocking())
            .map(|f| format!("[{}] {}", f.code, f.message))
            .collect();
        if !blocking.is_empty() {
            bail!("Bill rejected: {}", blocking.join("; "));
        }
        for warning in findings.iter().filter(|f| !f.is_blocking()) {
            tracing::warn!(code = %warning.code, "{}", warning.message);
        }

        let repo = BillRepository::new(self.pool.clone());
        match key {
            Some(id) => {
                repo.update_bill(id, bill)
                    .await
                    .context("Failed to persist bill record")?;
                Ok(id)
            }
            // No receipt was ever uploaded: insert the record whole.
            None => {
                let id = repo
                    .insert_bill(bill)
                    .await
                    .context("Failed to persist bill record")?;
                Ok(id)
            }
        }
    }
}

// The production side of the store contract the workflow controllers
// consume. Tests swap in a mock; binaries hand them a BilledService.
#[async_trait]
impl BillStore for BilledService {
    async fn list(&self) -> Result<Vec<Bill>> {
        self.list_bills().await
    }

    async fn create(&self, payload: ReceiptPayload) -> Result<CreatedReceipt> {
        self.upload_receipt(payload).await
    }

    async fn update(&self, key: Option<Uuid>, bill: &Bill) -> Result<()> {
        self.submit_bill(key, bill).await.map(|_| ())
    }
}
