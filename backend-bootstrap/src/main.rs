use anyhow::Result;
use clap::Parser;

use backend_infrastructure::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "fraudscope-backend")]
#[command(about = "Fraudscope transaction risk scoring server", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("FRAUDSCOPE_CONFIG", config);
    }

    let config = AppConfig::load().await?;
    let _log_guard = backend_bootstrap::init_tracing(config.log_dir.as_deref());

    backend_bootstrap::run_with_config(config).await
}
