pub mod bills;
pub mod receipts;
pub mod workflow;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct BilledService {
    pub pool: PgPool,
    pub s3: S3Client,
    pub bucket: String,
    /// Base under which uploaded receipts are publicly reachable,
    /// e.g. "http://localhost:9000".
    pub public_url_base: String,
}

impl BilledService {
    pub fn new(pool: PgPool, s3: S3Client, bucket: String, public_url_base: String) -> Self {
        Self {
            pool,
            s3,
            bucket,
            public_url_base,
        }
    }
}
