//! mirbench — Compare miRNA–target binding predictors on a held-out test set.
//! Entry point for the evaluation binary.

use std::path::PathBuf;

use clap::Parser;
use mirbench_eval::{run, EvalConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mirbench", version, about = "Precision-recall comparison of miRNA binding predictors")]
struct Cli {
    /// Path to the evaluation config
    #[arg(short, long, env = "MIRBENCH_CONFIG", default_value = "mirbench.toml")]
    config: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mirbench=debug,info")),
        )
        .init();

    let cli = Cli::parse();
    info!("mirbench v{}", env!("CARGO_PKG_VERSION"));

    let config = EvalConfig::load_from(&cli.config)?;
    info!(
        "Configuration loaded: {} models, cofold {}, rna22 {}, seed {}",
        config.models.len(),
        config.cofold.is_some(),
        config.rna22.is_some(),
        config.seed.enabled
    );

    let report = run(&config).await?;
    println!("{}", report.summary());

    Ok(())
}
