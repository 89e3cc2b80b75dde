use axum::extract::DefaultBodyLimit;
use registrar::server::{
    config::Config, error::Error, model::app::AppState, router, startup,
    util::storage::FileStore,
};

/// Room for multipart boundaries and form fields around an upload
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    if let Err(e) = run().await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    let files = FileStore::new(config.upload_dir.clone(), config.max_upload_size);
    let body_limit = usize::try_from(config.max_upload_size + MULTIPART_OVERHEAD)
        .unwrap_or(usize::MAX);

    let app = router::routes()
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(AppState { db, files });

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!(
        "Listening on {}, storing uploads in {}",
        config.bind_address,
        config.upload_dir.display()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
