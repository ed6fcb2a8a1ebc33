use anyhow::{bail, Context, Result};
use aws_sdk_s3::primitives::ByteStream;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use billed_core::models::receipt::{
    derive_file_name, is_supported_media_type, CreatedReceipt, ReceiptPayload,
    UNSUPPORTED_FORMAT_MESSAGE,
};
use billed_db::repository::BillRepository;

use crate::BilledService;

impl BilledService {
    /// Persists a receipt image: allow-list check, checksum, object storage,
    /// then a stub bill row carrying the owner's email and the file fields.
    pub async fn upload_receipt(&self, payload: ReceiptPayload) -> Result<CreatedReceipt> {
        // 1. Reject unsupported formats before anything touches storage.
        if !is_supported_media_type(&payload.media_type) {
            bail!("{}", UNSUPPORTED_FORMAT_MESSAGE);
        }

        let file_name = derive_file_name(&payload.file_name);
        let key = Uuid::new_v4();
        let object_key = format!("receipts/{}/{}", key, file_name);

        // 2. Checksum, kept alongside the row for later integrity checks.
        let mut hasher = Sha256::new();
        hasher.update(&payload.content);
        let checksum = hex::encode(hasher.finalize());

        // 3. SELF-HEALING: make sure the bucket exists before writing.
        self.ensure_bucket()
            .await
            .context("Failed to initialize storage backend")?;

        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .content_type(&payload.media_type)
            .body(ByteStream::from(payload.content))
            .send()
            .await
            .context("Failed to store receipt file")?;

        let file_url = format!(
            "{}/{}/{}",
            self.public_url_base.trim_end_matches('/'),
            self.bucket,
            object_key
        );

        // 4. Stub row; the submit handler completes it later.
        let repo = BillRepository::new(self.pool.clone());
        repo.insert_receipt(key, &payload.email, &file_url, &file_name, &checksum)
            .await
            .context("Failed to record receipt upload")?;

        tracing::info!(%key, file_name = %file_name, "receipt uploaded");

        Ok(CreatedReceipt { file_url, key })
    }

    async fn ensure_bucket(&self) -> Result<()> {
        if self
            .s3
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
        {
            return Ok(());
        }

        self.s3
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .context("Failed to create receipt bucket")?;

        Ok(())
    }
}
