use url_alias::{config, logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    logging::init(&config)?;

    tracing::info!(
        env = config.env.as_str(),
        version = env!("CARGO_PKG_VERSION"),
        "starting url-alias"
    );
    tracing::debug!("debug messages are enabled");

    config.print_summary();

    if let Err(e) = server::run(config).await {
        tracing::error!(error = ?e, "server failed");
        return Err(e);
    }

    Ok(())
}
