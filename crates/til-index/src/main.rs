//! til-index: regenerate a TIL README from git history
//!
//! Clones (or reopens) the TIL repository, derives each entry's creation date
//! from commit history, and rewrites the README's counter and entry listing.

use clap::Parser;
use tracing::info;

use til_index::config::Config;
use til_index::run::Generator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    config.validate()?;
    info!("Starting til-index...");

    let report = Generator::new(config.clone()).run().await?;

    if config.dry_run {
        print!("{}", report.document);
    }
    if config.stats_json {
        println!("{}", serde_json::to_string_pretty(&report.stats)?);
    }

    Ok(())
}
