use anyhow::Result;
use engine::engine::ConsoleEngine;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    ConsoleEngine::new().start()?;
    Ok(())
}
