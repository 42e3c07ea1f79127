use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weekend_fares::{output_path, FareMonitor, QpxClient, Settings};

/// Get flights on weekends for the rest of the year
#[derive(Parser)]
struct Args {
    /// Destination to price
    #[arg(default_value = "AUS")]
    destination: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let path = output_path(&args.destination)?;
    let settings = Settings::load()?;

    let client = QpxClient::new(&settings.api)?;
    let monitor = FareMonitor::new(client, settings.search);
    let table = monitor
        .collect(&args.destination, Local::now().date_naive())
        .await?;

    table.save(&path)?;
    info!(path = %path.display(), rows = table.len(), "Saved weekend fares");

    println!("{}", table.render());
    Ok(())
}
