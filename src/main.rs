use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use trendband::chart::epoch_seconds;
use trendband::config::{AnalysisSettings, Config};
use trendband::logging;
use trendband::services::twelve_data::messages::parse_datetime;
use trendband::services::{AnalysisService, TwelveDataClient};

#[derive(Parser, Debug)]
#[command(version, about = "EMA tolerance-band crossover signals for a ticker")]
struct Args {
    /// Ticker symbol (defaults to DEFAULT_SYMBOL)
    #[arg(long)]
    symbol: Option<String>,

    /// EMA period (defaults to EMA_PERIOD)
    #[arg(long)]
    period: Option<usize>,

    /// Band half-width as a fraction of the EMA, e.g. 0.05
    #[arg(long)]
    tolerance: Option<f64>,

    /// Print the tooltip at this time (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS).
    /// A bare date picks the first bar of that day.
    #[arg(long)]
    at: Option<String>,

    /// Print the full chart payload as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let args = Args::parse();

    let config = Config::from_env();
    logging::init_logging(config.is_production());

    let symbol = args.symbol.unwrap_or_else(|| config.default_symbol.clone());
    let settings = AnalysisSettings {
        ema_period: args.period.unwrap_or(config.analysis.ema_period),
        tolerance: args.tolerance.unwrap_or(config.analysis.tolerance),
    };

    let provider = Arc::new(TwelveDataClient::new(&config.provider));
    let service = AnalysisService::new(provider, config.provider.output_size, settings);
    let payload = service.chart(&symbol, None).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{} - EMA {} crossover signals", symbol, settings.ema_period);
    println!("Found {} crossover signals:", payload.signals.len());
    for line in payload.summary_lines() {
        println!("  {}", line);
    }

    if let Some(raw) = args.at {
        let at = parse_datetime(&raw)?;
        let exact = epoch_seconds(&at);
        let time = if payload.tooltip_at(exact).is_some() {
            exact
        } else {
            payload.first_time_on(at.date()).unwrap_or(exact)
        };
        match payload.tooltip_at(time) {
            Some(tooltip) => {
                println!();
                for line in tooltip.lines() {
                    println!("  {}", line);
                }
            }
            None => println!("No data for {}", raw),
        }
    }

    Ok(())
}
