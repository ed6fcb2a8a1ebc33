//! New-bill and bill-list workflows exercised against a mocked store,
//! the same way the UI layer would drive them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use billed_core::models::bill::{Bill, BillForm, BillStatus};
use billed_core::models::receipt::{CreatedReceipt, FileSelection, ReceiptPayload, ReceiptUpload};
use billed_core::session::StaticSession;
use billed_core::store::BillStore;
use billed_service::workflow::{routes, BillListPage, NewBillWorkflow};

#[derive(Default)]
struct MockStore {
    bills: Vec<Bill>,
    list_error: Option<String>,
    create_error: Option<String>,
    update_error: Option<String>,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    updates: Mutex<Vec<(Option<Uuid>, Bill)>>,
}

#[async_trait]
impl BillStore for MockStore {
    async fn list(&self) -> Result<Vec<Bill>> {
        match &self.list_error {
            Some(message) => Err(anyhow!("{message}")),
            None => Ok(self.bills.clone()),
        }
    }

    async fn create(&self, payload: ReceiptPayload) -> Result<CreatedReceipt> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        match &self.create_error {
            Some(message) => Err(anyhow!("{message}")),
            None => Ok(CreatedReceipt {
                file_url: format!("https://localhost:9000/billed-receipts/{}", payload.file_name),
                key: Uuid::new_v4(),
            }),
        }
    }

    async fn update(&self, key: Option<Uuid>, bill: &Bill) -> Result<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.updates.lock().unwrap().push((key, bill.clone()));
        match &self.update_error {
            Some(message) => Err(anyhow!("{message}")),
            None => Ok(()),
        }
    }
}

fn workflow_with(
    store: Arc<MockStore>,
) -> (NewBillWorkflow, Arc<Mutex<Vec<String>>>) {
    let navigations: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let recorded = navigations.clone();
    let session = Arc::new(StaticSession::employee("a@a"));

    let workflow = NewBillWorkflow::new(
        store,
        session,
        Box::new(move |path| recorded.lock().unwrap().push(path.to_string())),
    );
    (workflow, navigations)
}

fn png_selection() -> FileSelection {
    FileSelection {
        path_value: r"C:\fakepath\image.png".into(),
        media_type: "image/png".into(),
        content: b"img".to_vec(),
    }
}

fn bill_on(name: &str, date: &str) -> Bill {
    Bill {
        id: Some(Uuid::new_v4()),
        email: "a@a".into(),
        expense_type: "Transports".into(),
        name: name.into(),
        amount: Some(100),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
        vat: "20".into(),
        pct: 20,
        commentary: String::new(),
        file_url: Some("https://test.storage.tld/justificatif.png".into()),
        file_name: Some("justificatif.png".into()),
        status: BillStatus::Pending,
    }
}

#[tokio::test]
async fn wrong_format_is_refused_without_any_store_call() {
    let store = Arc::new(MockStore::default());
    let (mut workflow, _) = workflow_with(store.clone());

    let selection = FileSelection {
        path_value: r"C:\fakepath\hello.txt".into(),
        media_type: "document/txt".into(),
        content: b"hello".to_vec(),
    };

    let accepted = workflow.handle_file_selection(selection).await;

    assert!(!accepted, "caller must clear the file input");
    assert_eq!(workflow.upload(), &ReceiptUpload::NoUpload);
    assert_eq!(
        workflow.format_notice(),
        Some("Format non supporté, veuillez utiliser des jpg, jpeg ou des png")
    );
    assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn good_format_uploads_and_keeps_the_file_name() {
    let store = Arc::new(MockStore::default());
    let (mut workflow, _) = workflow_with(store.clone());

    let accepted = workflow.handle_file_selection(png_selection()).await;

    assert!(accepted);
    assert!(workflow.format_notice().is_none());
    assert_eq!(workflow.upload().file_name(), Some("image.png"));
    assert!(workflow.upload().key().is_some());
    assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_upload_leaves_file_fields_unset_and_is_not_retried() {
    let store = Arc::new(MockStore {
        create_error: Some("Erreur 500".into()),
        ..MockStore::default()
    });
    let (mut workflow, _) = workflow_with(store.clone());

    let accepted = workflow.handle_file_selection(png_selection()).await;

    assert!(accepted, "format itself was fine");
    assert!(workflow.upload().file_url().is_none());
    assert!(workflow.upload().file_name().is_none());
    assert!(matches!(workflow.upload(), ReceiptUpload::Failed { .. }));
    assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn submitting_an_empty_form_still_goes_through() {
    let store = Arc::new(MockStore::default());
    let (mut workflow, navigations) = workflow_with(store.clone());

    let result = workflow.handle_submit(BillForm::default()).await;

    assert!(result.is_ok());
    assert_eq!(store.update_calls.load(Ordering::SeqCst), 1);

    let updates = store.updates.lock().unwrap();
    let (key, bill) = &updates[0];
    assert!(key.is_none(), "no receipt was ever uploaded");
    assert_eq!(bill.email, "a@a");
    assert_eq!(bill.status, BillStatus::Pending);
    assert_eq!(bill.pct, 20);
    assert!(bill.amount.is_none());
    assert!(bill.file_url.is_none());

    assert_eq!(
        navigations.lock().unwrap().clone(),
        vec![routes::BILLS.to_string()]
    );
}

#[tokio::test]
async fn submit_forwards_the_upload_key_and_file_fields() {
    let store = Arc::new(MockStore::default());
    let (mut workflow, _) = workflow_with(store.clone());

    workflow.handle_file_selection(png_selection()).await;
    let key = workflow.upload().key();

    let form = BillForm {
        expense_type: "Transports".into(),
        name: "Vol Paris Londres".into(),
        amount: "348".into(),
        date: "2004-04-04".into(),
        vat: "70".into(),
        pct: "".into(),
        commentary: String::new(),
    };
    workflow.handle_submit(form).await.unwrap();

    let updates = store.updates.lock().unwrap();
    let (sent_key, bill) = &updates[0];
    assert_eq!(*sent_key, key);
    assert_eq!(bill.amount, Some(348));
    assert_eq!(bill.pct, 20);
    assert_eq!(bill.file_name.as_deref(), Some("image.png"));
}

#[tokio::test]
async fn rejected_update_is_reported_once_and_blocks_navigation() {
    let store = Arc::new(MockStore {
        update_error: Some("Erreur 404".into()),
        ..MockStore::default()
    });
    let (mut workflow, navigations) = workflow_with(store.clone());

    let result = workflow.handle_submit(BillForm::default()).await;

    let error = result.expect_err("store rejection must surface");
    assert!(error.to_string().contains("Erreur 404"));
    assert_eq!(store.update_calls.load(Ordering::SeqCst), 1, "no retry");
    assert!(navigations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn list_page_renders_rows_most_recent_first() {
    let store = Arc::new(MockStore {
        bills: vec![
            bill_on("middle", "2004-04-04"),
            bill_on("oldest", "2002-02-02"),
            bill_on("latest", "2003-03-03"),
        ],
        ..MockStore::default()
    });

    let rows = BillListPage::new(store).rows().await.unwrap();

    let dates: Vec<String> = rows
        .iter()
        .filter_map(|r| r.date.map(|d| d.to_string()))
        .collect();
    assert_eq!(dates, ["2004-04-04", "2003-03-03", "2002-02-02"]);
    assert!(rows.iter().all(|r| r.receipt_url().is_some()));
}

#[tokio::test]
async fn list_page_surfaces_store_error_messages_verbatim() {
    for message in ["Erreur 404", "Erreur 500"] {
        let store = Arc::new(MockStore {
            list_error: Some(message.into()),
            ..MockStore::default()
        });

        let error = BillListPage::new(store).rows().await.unwrap_err();
        assert!(error.to_string().contains(message));
    }
}
