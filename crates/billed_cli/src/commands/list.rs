use clap::Args;

use billed_core::listing::build_rows;
use billed_service::BilledService;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show bills with this status (pending, accepted, refused)
    #[arg(long)]
    pub status: Option<String>,
}

pub async fn execute(
    service: BilledService,
    args: ListArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let bills = match service.list_bills().await {
        Ok(bills) => bills,
        Err(e) => {
            // The list view renders the failure message in place of the list.
            eprintln!("{}", e);
            return Ok(());
        }
    };

    let rows = build_rows(bills);

    println!("📋 Mes notes de frais ({})", rows.len());
    println!("{:-<78}", "-");
    for row in rows {
        if let Some(filter) = &args.status {
            if row.status.as_str() != filter {
                continue;
            }
        }

        let amount = row
            .amount
            .map(|a| format!("{} €", a))
            .unwrap_or_else(|| "—".to_string());

        println!(
            "{} {:<10} | {:<22} | {:<24} | {:>10} | {}",
            row.status_icon, row.formatted_date, row.expense_type, row.name, amount, row.status_label
        );
        if let Some(url) = row.receipt_url() {
            println!("     🧾 {}", url);
        }
    }

    Ok(())
}
