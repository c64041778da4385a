use anyhow::{Error, Result};
use dispatch_service::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let _ = Config::load()?;

    println!("Configuration validated. Dispatcher is ready to start.");

    Ok(())
}
