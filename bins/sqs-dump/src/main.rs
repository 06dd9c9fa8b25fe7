mod cmd;

use clap::Parser;
use cmd::config::{DumpArgs, Effective};

#[derive(Parser)]
#[command(name = "sqs-dump", version, about = "Выгрузка сообщений SQS в NDJSON файл (без удаления из очереди)")]
struct Cli {
    #[command(flatten)]
    args: DumpArgs,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sqs-dump starting");

    let eff = match Effective::new(&cli.args) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cmd::dump::run(eff).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
