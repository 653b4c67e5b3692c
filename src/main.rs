use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aura_core::{data_file_from_env_value, CoreConfig, PatientService};

/// Main entry point for the AuraHealth application
///
/// Starts the REST server for patient record management. The server exposes
/// the CRUD, sort and view endpoints together with its own OpenAPI document
/// and Swagger UI.
///
/// # Environment Variables
/// - `AURA_REST_ADDR`: REST server address (default: "0.0.0.0:8000")
/// - `PATIENT_DATA_FILE`: JSON snapshot file for patient records (default: "patients.json")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If server startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("aura_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("aura_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("AURA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let data_file = data_file_from_env_value(std::env::var("PATIENT_DATA_FILE").ok());

    tracing::info!("-- Starting AuraHealth REST API on {}", rest_addr);
    tracing::info!("-- Patient snapshot file: {}", data_file.display());

    let cfg = Arc::new(CoreConfig::new(data_file)?);
    let service = PatientService::open(cfg)?;

    let app = api_rest::app(service);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
