// billed_cli/src/main.rs
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::{config::Region, Client};
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use billed_cli::commands;
use billed_cli::config::Config;
use billed_service::BilledService;

#[derive(Parser)]
#[command(name = "billed")]
#[command(about = "Employee expense-report toolchain", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the database schema from embedded assets
    Rebuild(commands::rebuild::RebuildArgs),

    /// List submitted bills, most recent first
    List(commands::list::ListArgs),

    /// Upload a receipt and submit a new bill
    NewBill(commands::new_bill::NewBillArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Surface workflow errors logged through tracing.
    tracing_subscriber::fmt::init();

    // 1. Load Config (Fails fast if invalid)
    let config = Config::from_env()?;

    // 2. Parse arguments and route to the correct command
    let cli = Cli::parse();

    match cli.command {
        Commands::Rebuild(args) => {
            let pool = connect(&config).await?;
            commands::rebuild::execute(pool, args).await?;
        }
        Commands::List(args) => {
            let pool = connect(&config).await?;
            let service = build_service(pool, &config).await;
            commands::list::execute(service, args).await?;
        }
        Commands::NewBill(args) => {
            let pool = connect(&config).await?;
            let service = build_service(pool, &config).await;
            commands::new_bill::execute(service, config.employee_email.clone(), args).await?;
        }
    }

    Ok(())
}

async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
}

async fn build_service(pool: PgPool, config: &Config) -> BilledService {
    // Path-style addressing for MinIO (localhost compatibility).
    let region_provider =
        RegionProviderChain::default_provider().or_else(Region::new(config.s3_region.clone()));
    let aws_config = aws_config::from_env().region(region_provider).load().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(true)
        .endpoint_url(&config.s3_endpoint)
        .build();
    let s3_client = Client::from_conf(s3_config);

    BilledService::new(
        pool,
        s3_client,
        config.s3_bucket.clone(),
        config.s3_endpoint.clone(),
    )
}
