use chrono::Utc;
use reboot::{load_or_init, remote::RemoteClient, router, AppState, Config};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    if let Some(parent) = config.data_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let stats = load_or_init(&config.data_path, Utc::now())
        .await
        .map_err(|err| err.message)?;

    let remote = match &config.remote {
        Some(remote) => Some(RemoteClient::new(remote)?),
        None => {
            warn!("REBOOT_REMOTE_URL not set; profile and diary endpoints are disabled");
            None
        }
    };

    let state = AppState::new(config.data_path.clone(), stats, remote);
    let app = router(state);

    let addr = config.listen_addr()?;
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
