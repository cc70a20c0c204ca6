pub mod api;
pub mod config;
pub mod directory;
pub mod engine;
pub mod facets;
pub mod fetch;
pub mod models;
pub mod normalize;
pub mod query_state;

use tracing_subscriber::EnvFilter;

use crate::api::ApiContext;
use crate::directory::Directory;
use crate::fetch::RecordClient;
use crate::query_state::MemoryParams;

/// Start the directory: load settings, fetch records, serve until Ctrl-C.
pub async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = config::Settings::from_env()?;
    tracing::info!(source = %settings.source_url, bind = %settings.bind_addr, "Settings loaded");

    // Seed from a shared link, if one was passed in.
    let mut directory = Directory::new(Box::new(MemoryParams::from_query_string(
        &settings.initial_query,
    )));
    directory.subscribe(Box::new(|view| {
        tracing::debug!(
            total = view.total,
            suggestions = view.suggestions.len(),
            page_query = %view.page_query,
            "View updated"
        );
    }));

    let ctx = ApiContext::new(directory, RecordClient::new(&settings.source_url));
    ctx.spawn_load()?;

    let mut server = api::start_server(ctx.clone(), settings.bind_addr).await?;
    tracing::info!(addr = %server.session.server_addr, "Listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");

    ctx.cancel_load();
    server.shutdown();
    Ok(())
}
