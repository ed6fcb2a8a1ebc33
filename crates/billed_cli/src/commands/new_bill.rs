use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;

use billed_core::models::bill::BillForm;
use billed_core::models::receipt::FileSelection;
use billed_core::session::StaticSession;
use billed_service::workflow::NewBillWorkflow;
use billed_service::BilledService;

#[derive(Debug, Args)]
pub struct NewBillArgs {
    /// Path to the receipt image (jpg, jpeg or png)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Expense category (e.g. "Transports", "Restaurants et bars")
    #[arg(short = 't', long, default_value = "Transports")]
    pub expense_type: String,

    /// Expense label
    #[arg(short, long, default_value = "")]
    pub name: String,

    #[arg(short, long, default_value = "")]
    pub amount: String,

    /// Expense date, YYYY-MM-DD
    #[arg(short, long, default_value = "")]
    pub date: String,

    #[arg(long, default_value = "")]
    pub vat: String,

    /// VAT percentage (defaults to 20 when omitted or unparsable)
    #[arg(long, default_value = "")]
    pub pct: String,

    #[arg(short, long, default_value = "")]
    pub commentary: String,
}

pub async fn execute(
    service: BilledService,
    email: String,
    args: NewBillArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Arc::new(StaticSession::employee(email));
    let mut workflow = NewBillWorkflow::new(
        Arc::new(service),
        session,
        Box::new(|path| println!("➡️  {}", path)),
    );

    // 1. Receipt upload, when a file was given.
    if let Some(file) = &args.file {
        println!("🧾 Uploading receipt: {:?}", file);

        let selection = FileSelection {
            path_value: file.to_string_lossy().to_string(),
            media_type: media_type_for(file).to_string(),
            content: fs::read(file)?,
        };

        let accepted = workflow.handle_file_selection(selection).await;
        if !accepted {
            // Same notice the form shows; the bill can still go out bare.
            eprintln!("⚠️  {}", workflow.format_notice().unwrap_or_default());
        } else if let Some(name) = workflow.upload().file_name() {
            println!("✅ Receipt stored as '{}'", name);
        } else {
            eprintln!("⚠️  Receipt upload failed; submitting without proof.");
        }
    }

    // 2. Submit the bill; navigation only fires once the store accepted it.
    let form = BillForm {
        expense_type: args.expense_type,
        name: args.name,
        amount: args.amount,
        date: args.date,
        vat: args.vat,
        pct: args.pct,
        commentary: args.commentary,
    };

    workflow.handle_submit(form).await?;
    println!("✅ Bill submitted.");

    Ok(())
}

/// Declared media type from the file extension, the way a browser would
/// label the picked file.
fn media_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("jpg") => "image/jpg",
        Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_follows_the_extension() {
        assert_eq!(media_type_for(Path::new("note.PNG")), "image/png");
        assert_eq!(media_type_for(Path::new("note.jpeg")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("facture.pdf")), "application/pdf");
        assert_eq!(
            media_type_for(Path::new("mystery")),
            "application/octet-stream"
        );
    }
}
