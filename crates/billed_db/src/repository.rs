use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use billed_core::models::bill::{Bill, BillStatus};

pub struct BillRepository {
    pool: PgPool,
}

// Row shape as stored in Postgres. Queries are bound at runtime so the
// workspace builds without a live database.
#[derive(sqlx::FromRow)]
struct BillRecord {
    id: Uuid,
    email: String,
    expense_type: Option<String>,
    name: Option<String>,
    amount: Option<i64>,
    date: Option<NaiveDate>,
    vat: Option<String>,
    pct: i32,
    commentary: Option<String>,
    file_url: Option<String>,
    file_name: Option<String>,
    status: String,
}

impl TryFrom<BillRecord> for Bill {
    type Error = sqlx::Error;

    fn try_from(record: BillRecord) -> Result<Self, Self::Error> {
        let status = BillStatus::parse(&record.status).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown bill status '{}'", record.status).into())
        })?;

        Ok(Bill {
            id: Some(record.id),
            email: record.email,
            expense_type: record.expense_type.unwrap_or_default(),
            name: record.name.unwrap_or_default(),
            amount: record.amount,
            date: record.date,
            vat: record.vat.unwrap_or_default(),
            pct: record.pct,
            commentary: record.commentary.unwrap_or_default(),
            file_url: record.file_url,
            file_name: record.file_name,
            status,
        })
    }
}

const BILL_COLUMNS: &str = "id, email, expense_type, name, amount, date, vat, pct, \
                            commentary, file_url, file_name, status";

impl BillRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_bills(&self) -> Result<Vec<Bill>, sqlx::Error> {
        let records: Vec<BillRecord> = sqlx::query_as(&format!(
            "SELECT {BILL_COLUMNS} FROM bills ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(Bill::try_from).collect()
    }

    pub async fn get_bill(&self, id: Uuid) -> Result<Bill, sqlx::Error> {
        let record: BillRecord =
            sqlx::query_as(&format!("SELECT {BILL_COLUMNS} FROM bills WHERE id = $1"))
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Bill::try_from(record)
    }

    /// Stub row written as soon as a receipt upload lands. The rest of the
    /// record arrives later through `update_bill`.
    pub async fn insert_receipt(
        &self,
        id: Uuid,
        email: &str,
        file_url: &str,
        file_name: &str,
        checksum: &str,
    ) -> Result<Uuid, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO bills (id, email, file_url, file_name, checksum, status)
            VALUES ($1, $2, $3, $4, $5, 'pending')
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(file_url)
        .bind(file_name)
        .bind(checksum)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Fills in the full record on the row created by the receipt upload.
    pub async fn update_bill(&self, id: Uuid, bill: &Bill) -> Result<(), sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE bills
            SET email = $2, expense_type = $3, name = $4, amount = $5, date = $6,
                vat = $7, pct = $8, commentary = $9, file_url = $10, file_name = $11,
                status = $12
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&bill.email)
        .bind(&bill.expense_type)
        .bind(&bill.name)
        .bind(bill.amount)
        .bind(bill.date)
        .bind(&bill.vat)
        .bind(bill.pct)
        .bind(&bill.commentary)
        .bind(&bill.file_url)
        .bind(&bill.file_name)
        .bind(bill.status.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }

    /// Bill submitted without any receipt upload: there is no stub row to
    /// update, so the record is inserted whole.
    pub async fn insert_bill(&self, bill: &Bill) -> Result<Uuid, sqlx::Error> {
        let id = bill.id.unwrap_or_else(Uuid::new_v4);

        sqlx::query(
            r#"
            INSERT INTO bills
            (id, email, expense_type, name, amount, date, vat, pct, commentary,
             file_url, file_name, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(id)
        .bind(&bill.email)
        .bind(&bill.expense_type)
        .bind(&bill.name)
        .bind(bill.amount)
        .bind(bill.date)
        .bind(&bill.vat)
        .bind(bill.pct)
        .bind(&bill.commentary)
        .bind(&bill.file_url)
        .bind(&bill.file_name)
        .bind(bill.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> BillRecord {
        BillRecord {
            id: Uuid::new_v4(),
            email: "a@a".into(),
            expense_type: Some("Transports".into()),
            name: Some("Train Paris-Lyon".into()),
            amount: Some(100),
            date: NaiveDate::from_ymd_opt(2004, 4, 4),
            vat: Some("20".into()),
            pct: 20,
            commentary: None,
            file_url: None,
            file_name: None,
            status: "accepted".into(),
        }
    }

    #[test]
    fn record_maps_to_domain_bill() {
        let bill = Bill::try_from(record()).unwrap();
        assert_eq!(bill.status, BillStatus::Accepted);
        assert_eq!(bill.expense_type, "Transports");
        assert_eq!(bill.commentary, "");
    }

    #[test]
    fn unknown_status_fails_decoding() {
        let mut rec = record();
        rec.status = "archived".into();
        assert!(Bill::try_from(rec).is_err());
    }
}
