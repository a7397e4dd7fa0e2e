//! Submission Export - Main Entry Point

use anyhow::Context;
use clap::Parser;
use pipeline::{export_submission, init_logging, PipelineConfig, SubmitArgs};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let args = SubmitArgs::parse();
    let config = PipelineConfig::load(args.config.as_deref()).context("loading configuration")?;
    init_logging(args.verbose, &config.log_file)?;

    info!("=== Data To Submit v{} ===", env!("CARGO_PKG_VERSION"));

    match export_submission(&config) {
        Ok(count) => {
            info!(
                "Wrote {} records to {}",
                count,
                config.submission_path.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Submission export failed: {}", e);
            Err(e).context("submission export failed")
        }
    }
}
