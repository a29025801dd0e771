use clap::{Parser, Subcommand};
use review_stats_core::config_loader::DEFAULT_CONFIG_PATH;
use review_stats_core::ConfigLoader;

mod commands;

use commands::CallArgs;

#[derive(Parser)]
#[command(name = "review-stats")]
#[command(about = "Statistics tools for research-paper review agents", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, env = "REVIEW_STATS_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the function-calling schema for every tool
    Schema,
    /// Run one tool call and print its JSON result
    Call(CallArgs),
    /// Answer JSON-lines tool calls from stdin until it closes
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ConfigLoader::load_from(&cli.config)?;
    if cli.pretty {
        config.output.pretty = true;
    }

    match cli.command {
        Commands::Schema => {
            commands::run_schema(&config)?;
        }
        Commands::Call(args) => {
            commands::run_call(args, &config)?;
        }
        Commands::Serve => {
            commands::run_serve(&config).await?;
        }
    }

    Ok(())
}
