use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use symptom_core::{resolve_config, DiagnosisService};

/// Main entry point for the symptom checker
///
/// Loads the reference dataset and classifier once, then serves the REST API. A failed load
/// does not stop the server: it runs in degraded mode, answering predictions with an
/// advisory and reporting `ok: false` on `/health`.
///
/// # Environment Variables
/// - `SYMPTOM_REST_ADDR`: REST server address (default: "0.0.0.0:8000")
/// - `SYMPTOM_DATA_DIR`: Directory holding the artifacts (default: "data")
/// - `SYMPTOM_MODEL_PATH`: Model artifact (default: "<data dir>/disease_model.json")
/// - `SYMPTOM_DATASET_PATH`: Reference dataset (default: "<data dir>/Training.csv")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server cannot bind or run
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symptom_run=info".parse()?)
                .add_directive("symptom_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("SYMPTOM_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());

    let cfg = resolve_config(
        std::env::var("SYMPTOM_DATA_DIR").ok(),
        std::env::var("SYMPTOM_MODEL_PATH").ok(),
        std::env::var("SYMPTOM_DATASET_PATH").ok(),
    )?;
    for (what, path) in [("model", cfg.model_path()), ("dataset", cfg.dataset_path())] {
        if !path.exists() {
            tracing::warn!("{} file not found: {}", what, path.display());
        }
    }

    let service = DiagnosisService::load(&cfg);
    if service.is_ready() {
        tracing::info!(
            "++ Loaded {} symptoms from {}",
            service.vocabulary().len(),
            cfg.dataset_path().display()
        );
    }

    tracing::info!("++ Starting symptom checker REST on {}", rest_addr);

    let app = api_rest::router(service);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
