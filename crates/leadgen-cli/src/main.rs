use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod leads;

#[derive(Debug, Parser)]
#[command(name = "leadgen")]
#[command(about = "Find local businesses with no website and export them as sales leads")]
struct Cli {
    /// Write the spreadsheet to this file instead of a generated name
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Print the search plan and exit without calling the Places API
    #[arg(long)]
    dry_run: bool,
    /// Do not email the spreadsheet even when SMTP credentials are configured
    #[arg(long)]
    no_email: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = leadgen_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?,
        )
        .init();

    let plan = leads::resolve_search_plan(&config.search_plan_path)?;

    if cli.dry_run {
        leads::print_plan(&plan);
        return Ok(());
    }

    let options = leads::RunOptions {
        output: cli.output,
        send_email: !cli.no_email,
    };
    leads::run_leads(&config, &plan, &options).await
}
