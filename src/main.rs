use adreport::{jobs, load_data, router, webhook::WebhookClient, AppState, Settings};
use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = Settings::from_env()?;
    if let Some(parent) = settings.data_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let data = load_data(&settings.data_path).await;
    let webhook = WebhookClient::new(&settings)?;
    info!(webhook = webhook.url(), "report webhook configured");
    if settings.pdf_converter.is_none() {
        info!("PDF_CONVERTER not set, PDF downloads fall back to the print dialog");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let state = AppState::new(settings, webhook, data);

    let resumed = jobs::resume_unfinished(&state).await;
    if resumed > 0 {
        info!(resumed, "resumed unfinished report jobs");
    }

    let app = router(state);

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
