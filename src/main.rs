use anyhow::Result;
use clap::{Parser, Subcommand};
use estat::{Config, Reader, StatsDataReader, StatsListReader, StatsResponse};
use reqwest::Client;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch tables from the e-Stat statistics API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Maximum number of rows to request
    #[arg(long, global = true)]
    limit: Option<u32>,
    /// Print the whole parsed response as JSON instead of the table
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// List statistics tables (getSimpleStatsList)
    List {
        /// Government statistics code
        stats_code: Option<String>,
    },
    /// Fetch data for one statistics table (getSimpleStatsData)
    Data { stats_data_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) args + config ────────────────────────────────────────────
    let cli = Cli::parse();
    let config = Config::load()?;
    let client = Client::new();

    // ─── 3) fetch + parse ────────────────────────────────────────────
    let resp: StatsResponse = match cli.command {
        Command::List { stats_code } => {
            let mut reader = StatsListReader::new(config);
            if let Some(code) = stats_code {
                reader = reader.stats_code(code);
            }
            if let Some(n) = cli.limit {
                reader = reader.limit(n);
            }
            reader.read(&client).await?
        }
        Command::Data { stats_data_id } => {
            let mut reader = StatsDataReader::new(config, stats_data_id);
            if let Some(n) = cli.limit {
                reader = reader.limit(n);
            }
            reader.read(&client).await?
        }
    };

    // ─── 4) output ───────────────────────────────────────────────────
    for (key, value) in resp.metadata() {
        info!(key, value, "metadata");
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&resp)?);
    } else {
        println!("{}", resp.table()?);
    }
    Ok(())
}
