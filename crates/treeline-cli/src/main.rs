//! The `treeline` binary.

use clap::Parser;
use treeline_cli::{CliArgs, TreelineCli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let cli = TreelineCli::from_args("treeline", &args)?;
    cli.run(args).await?;
    Ok(())
}
