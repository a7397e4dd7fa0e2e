//! Feature Creator - Main Entry Point

use anyhow::Context;
use clap::Parser;
use pipeline::{create_features, init_logging, CreatorArgs, PipelineConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CreatorArgs::parse();
    let config = PipelineConfig::load(args.config.as_deref()).context("loading configuration")?;
    init_logging(args.verbose, &config.log_file)?;

    info!("=== Feature Creator v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Mode: {}, combinators: {}",
        args.run_mode(),
        if args.skip_combinators { "off" } else { "on" }
    );

    match create_features(&config, args.run_mode(), args.skip_combinators).await {
        Ok(summary) => {
            info!(
                "Wrote {} records to {}",
                summary.records,
                config.features_path.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Feature run failed: {}", e);
            Err(e).context("feature run failed")
        }
    }
}
