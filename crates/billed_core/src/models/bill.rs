use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::receipt::ReceiptUpload;

// ---------------------------------------------------------------------------
// The Record: Bill
// Wire names follow the historical store contract (camelCase, "type").
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    // Store-assigned key. Absent on a record the client is still assembling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    pub email: String,

    // Expense category, from the fixed picklist.
    #[serde(rename = "type")]
    pub expense_type: String,

    pub name: String,

    // Absent when the raw input did not parse; the store decides whether
    // an amount-less bill is acceptable.
    pub amount: Option<i64>,

    pub date: Option<NaiveDate>,

    pub vat: String,

    pub pct: i32,

    pub commentary: String,

    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,

    #[serde(rename = "fileName")]
    pub file_name: Option<String>,

    pub status: BillStatus,
}

impl Bill {
    /// Assembles the full record submitted to the store: raw form fields,
    /// the session owner's email, and whatever the upload produced so far.
    pub fn from_form(email: &str, form: &BillForm, upload: &ReceiptUpload) -> Self {
        Bill {
            id: None,
            email: email.to_string(),
            expense_type: form.expense_type.clone(),
            name: form.name.clone(),
            amount: form.amount_value(),
            date: form.date_value(),
            vat: form.vat.clone(),
            pct: form.pct_or_default(),
            commentary: form.commentary.clone(),
            file_url: upload.file_url().map(str::to_string),
            file_name: upload.file_name().map(str::to_string),
            status: BillStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BillStatus::Pending),
            "accepted" => Some(BillStatus::Accepted),
            "refused" => Some(BillStatus::Refused),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }

    /// Display label shown next to each row.
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            BillStatus::Pending => "⏳",
            BillStatus::Accepted => "✅",
            BillStatus::Refused => "❌",
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// The Input: raw form fields, exactly as the employee typed them.
// All coercion rules live here so the submit path stays declarative.
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillForm {
    pub expense_type: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

impl BillForm {
    /// Integer amount, or None when the field is empty/garbage.
    pub fn amount_value(&self) -> Option<i64> {
        self.amount.trim().parse().ok()
    }

    /// Percentage with the historical default: anything unparsable is 20.
    pub fn pct_or_default(&self) -> i32 {
        self.pct.trim().parse().unwrap_or(20)
    }

    /// ISO date (YYYY-MM-DD), or None when the field did not parse.
    pub fn date_value(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::receipt::ReceiptUpload;

    #[test]
    fn pct_defaults_to_20_on_garbage() {
        let mut form = BillForm::default();
        assert_eq!(form.pct_or_default(), 20);

        form.pct = "abc".into();
        assert_eq!(form.pct_or_default(), 20);

        form.pct = "10".into();
        assert_eq!(form.pct_or_default(), 10);
    }

    #[test]
    fn unparsable_amount_is_absent() {
        let mut form = BillForm::default();
        assert_eq!(form.amount_value(), None);

        form.amount = "348".into();
        assert_eq!(form.amount_value(), Some(348));

        form.amount = "beaucoup".into();
        assert_eq!(form.amount_value(), None);
    }

    #[test]
    fn empty_form_assembles_a_pending_bill() {
        let bill = Bill::from_form("a@a", &BillForm::default(), &ReceiptUpload::NoUpload);

        assert_eq!(bill.email, "a@a");
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.pct, 20);
        assert!(bill.amount.is_none());
        assert!(bill.date.is_none());
        assert!(bill.file_url.is_none());
        assert!(bill.file_name.is_none());
    }

    #[test]
    fn uploaded_receipt_fields_flow_into_the_record() {
        let upload = ReceiptUpload::Uploaded {
            file_url: "http://localhost:9000/billed-receipts/receipts/x/image.png".into(),
            file_name: "image.png".into(),
            key: uuid::Uuid::new_v4(),
        };
        let bill = Bill::from_form("a@a", &BillForm::default(), &upload);

        assert_eq!(bill.file_name.as_deref(), Some("image.png"));
        assert!(bill.file_url.as_deref().unwrap().ends_with("image.png"));
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [BillStatus::Pending, BillStatus::Accepted, BillStatus::Refused] {
            assert_eq!(BillStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BillStatus::parse("archived"), None);
    }
}
