//! Employee-facing controllers: the new-bill form workflow and the bill
//! list page, both working against the store contract through trait objects.

use std::sync::Arc;

use anyhow::Result;

use billed_core::listing::{build_rows, BillRow};
use billed_core::models::bill::{Bill, BillForm};
use billed_core::models::receipt::{
    derive_file_name, is_supported_media_type, FileSelection, ReceiptPayload, ReceiptUpload,
    UNSUPPORTED_FORMAT_MESSAGE,
};
use billed_core::session::SessionProvider;
use billed_core::store::BillStore;

pub mod routes {
    pub const BILLS: &str = "/bills";
    pub const NEW_BILL: &str = "/bills/new";
}

pub struct NewBillWorkflow {
    store: Arc<dyn BillStore>,
    session: Arc<dyn SessionProvider>,
    on_navigate: Box<dyn FnMut(&str) + Send>,
    upload: ReceiptUpload,
    format_notice: Option<String>,
}

impl NewBillWorkflow {
    pub fn new(
        store: Arc<dyn BillStore>,
        session: Arc<dyn SessionProvider>,
        on_navigate: Box<dyn FnMut(&str) + Send>,
    ) -> Self {
        Self {
            store,
            session,
            on_navigate,
            upload: ReceiptUpload::NoUpload,
            format_notice: None,
        }
    }

    pub fn upload(&self) -> &ReceiptUpload {
        &self.upload
    }

    /// User-visible notice after an unsupported file pick, cleared by the
    /// next accepted one.
    pub fn format_notice(&self) -> Option<&str> {
        self.format_notice.as_deref()
    }

    /// Handles a receipt file pick. Returns false when the format is
    /// refused, so the caller clears its input; nothing touches the network
    /// in that case.
    pub async fn handle_file_selection(&mut self, selection: FileSelection) -> bool {
        if !is_supported_media_type(&selection.media_type) {
            self.format_notice = Some(UNSUPPORTED_FORMAT_MESSAGE.to_string());
            self.upload = ReceiptUpload::NoUpload;
            return false;
        }

        self.format_notice = None;
        let file_name = derive_file_name(&selection.path_value);

        let email = match self.session.current_user() {
            Ok(user) => user.email,
            Err(error) => {
                tracing::error!(error = %error, "no session user for receipt upload");
                self.upload = ReceiptUpload::Failed {
                    message: error.to_string(),
                };
                return true;
            }
        };

        self.upload = ReceiptUpload::Uploading;
        let payload = ReceiptPayload {
            email,
            file_name: file_name.clone(),
            media_type: selection.media_type,
            content: selection.content,
        };

        match self.store.create(payload).await {
            Ok(created) => {
                self.upload = ReceiptUpload::Uploaded {
                    file_url: created.file_url,
                    file_name,
                    key: created.key,
                };
            }
            Err(error) => {
                // No retry; the form can still be submitted without a receipt.
                tracing::error!(error = %error, "receipt upload failed");
                self.upload = ReceiptUpload::Failed {
                    message: error.to_string(),
                };
            }
        }

        true
    }

    /// Assembles the full bill from the form and the upload state, persists
    /// it, and navigates to the list only once the store has accepted it.
    pub async fn handle_submit(&mut self, form: BillForm) -> Result<()> {
        let user = self.session.current_user()?;
        let bill = Bill::from_form(&user.email, &form, &self.upload);

        match self.store.update(self.upload.key(), &bill).await {
            Ok(()) => {
                (self.on_navigate)(routes::BILLS);
                Ok(())
            }
            Err(error) => {
                tracing::error!(error = %error, "bill submission failed");
                Err(error)
            }
        }
    }
}

pub struct BillListPage {
    store: Arc<dyn BillStore>,
}

impl BillListPage {
    pub fn new(store: Arc<dyn BillStore>) -> Self {
        Self { store }
    }

    /// Sorted display rows. A fetch failure propagates the store's own
    /// message text, which the caller renders in place of the list.
    pub async fn rows(&self) -> Result<Vec<BillRow>> {
        let bills = self.store.list().await?;
        Ok(build_rows(bills))
    }
}
