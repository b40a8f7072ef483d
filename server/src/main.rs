mod score_store;
mod server_config;
mod web_server;

use clap::Parser;
use common::{log, logger};

use score_store::PgScoreStore;
use server_config::DEFAULT_LISTEN_ADDR;
use web_server::run_web_server;

#[derive(Parser)]
#[command(name = "snake_scores_server")]
struct Args {
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    listen: String,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let database_url = std::env::var("POSTGRES_URL")
        .map_err(|_| "Missing POSTGRES_URL environment variable")?;

    let store = PgScoreStore::connect(&database_url).await?;
    store.ensure_schema().await?;

    run_web_server(store, &args.listen).await?;

    log!("Server shut down gracefully");
    Ok(())
}
