use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::{config::Region, Client};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use billed_api::config::Config;
use billed_api::routes::app_router;
use billed_api::AppState;
use billed_service::BilledService;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("invalid configuration");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to Postgres");

    // Path-style addressing for MinIO compatibility.
    let region_provider =
        RegionProviderChain::default_provider().or_else(Region::new(config.s3_region.clone()));
    let aws_config = aws_config::from_env().region(region_provider).load().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(true)
        .endpoint_url(&config.s3_endpoint)
        .build();
    let s3_client = Client::from_conf(s3_config);

    let service = BilledService::new(
        pool,
        s3_client,
        config.s3_bucket.clone(),
        config.s3_endpoint.clone(),
    );

    let app = app_router(AppState { service });

    let listener = TcpListener::bind(&config.bind_addr).await.unwrap();
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
