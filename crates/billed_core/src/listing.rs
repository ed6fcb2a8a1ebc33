use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::models::bill::{Bill, BillStatus};

// ---------------------------------------------------------------------------
// The View: one rendered row per bill
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Serialize)]
pub struct BillRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub date: Option<NaiveDate>,
    /// "4 Avr. 04" style display date; empty when the date is absent.
    #[serde(rename = "formattedDate")]
    pub formatted_date: String,
    pub amount: Option<i64>,
    pub status: BillStatus,
    #[serde(rename = "statusLabel")]
    pub status_label: &'static str,
    #[serde(rename = "statusIcon")]
    pub status_icon: &'static str,
    /// Target of the per-row "view proof" action.
    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
}

impl BillRow {
    /// URL opened by the proof modal, when a receipt exists.
    pub fn receipt_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }
}

/// Most-recent-first, on the parsed date. Bills without a usable date sink
/// to the bottom rather than poisoning the order.
pub fn sort_bills_desc(bills: &mut [Bill]) {
    bills.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Sorts and renders a fetched collection for display.
pub fn build_rows(mut bills: Vec<Bill>) -> Vec<BillRow> {
    sort_bills_desc(&mut bills);
    bills
        .into_iter()
        .map(|bill| BillRow {
            id: bill.id,
            formatted_date: bill.date.map(format_date).unwrap_or_default(),
            date: bill.date,
            expense_type: bill.expense_type,
            name: bill.name,
            amount: bill.amount,
            status: bill.status,
            status_label: bill.status.label(),
            status_icon: bill.status.icon(),
            file_url: bill.file_url,
            file_name: bill.file_name,
        })
        .collect()
}

/// Short French display date, e.g. 2004-04-04 -> "4 Avr. 04".
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {} {:02}",
        date.day(),
        month_abbrev(date.month()),
        date.year() % 100
    )
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan.",
        2 => "Fév.",
        3 => "Mar.",
        4 => "Avr.",
        5 => "Mai",
        6 => "Juin",
        7 => "Juil.",
        8 => "Aoû.",
        9 => "Sep.",
        10 => "Oct.",
        11 => "Nov.",
        12 => "Déc.",
        // NaiveDate never yields anything else.
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill_on(name: &str, date: &str) -> Bill {
        Bill {
            id: None,
            email: "a@a".into(),
            expense_type: "Transports".into(),
            name: name.into(),
            amount: Some(100),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            vat: "20".into(),
            pct: 20,
            commentary: String::new(),
            file_url: None,
            file_name: None,
            status: BillStatus::Pending,
        }
    }

    #[test]
    fn rows_are_ordered_most_recent_first() {
        let bills = vec![
            bill_on("middle", "2004-04-04"),
            bill_on("oldest", "2002-02-02"),
            bill_on("latest", "2003-03-03"),
        ];

        let rows = build_rows(bills);
        let dates: Vec<_> = rows.iter().filter_map(|r| r.date).collect();

        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2004, 4, 4).unwrap(),
                NaiveDate::from_ymd_opt(2003, 3, 3).unwrap(),
                NaiveDate::from_ymd_opt(2002, 2, 2).unwrap(),
            ]
        );
    }

    #[test]
    fn dateless_bills_sink_to_the_bottom() {
        let mut dateless = bill_on("dateless", "not-a-date");
        dateless.date = None;
        let bills = vec![dateless, bill_on("dated", "2004-04-04")];

        let rows = build_rows(bills);
        assert_eq!(rows[0].name, "dated");
        assert_eq!(rows[1].name, "dateless");
        assert_eq!(rows[1].formatted_date, "");
    }

    #[test]
    fn display_date_is_short_french() {
        let date = NaiveDate::from_ymd_opt(2004, 4, 4).unwrap();
        assert_eq!(format_date(date), "4 Avr. 04");

        let date = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        assert_eq!(format_date(date), "1 Jan. 01");
    }

    #[test]
    fn rows_carry_status_icon_and_label() {
        let mut bill = bill_on("resto", "2004-04-04");
        bill.status = BillStatus::Accepted;
        bill.file_url = Some("http://localhost:9000/billed-receipts/x.png".into());

        let rows = build_rows(vec![bill]);
        assert_eq!(rows[0].status_label, "Accepté");
        assert_eq!(rows[0].status_icon, "✅");
        assert!(rows[0].receipt_url().is_some());
    }
}
