//! Silverdash CLI
//!
//! Command-line interface for Silverdash operations:
//! - Price a quantity of silver
//! - Rank states by silver purchases
//! - Summarize the price history
//! - Generate a config file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use silverdash::chart::BarChartSpec;
use silverdash::config::{generate_default_config, Config};
use silverdash::dataset::{PriceHistory, PurchaseTable};
use silverdash::pricing::{format_converted, format_total, quote_cost, PriceQuote, WeightUnit};

#[derive(Parser)]
#[command(name = "silverdash-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Silver price calculator and sales rankings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file (default: built-in defaults with env overrides)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate the cost of a quantity of silver
    Cost {
        /// Weight of silver (default: from config)
        #[arg(short, long)]
        weight: Option<f64>,
        /// Weight unit: grams or kilograms
        #[arg(short, long)]
        unit: Option<String>,
        /// Price per gram in the base currency (default: from config)
        #[arg(short, long)]
        price: Option<f64>,
        /// Currency to convert to
        #[arg(long, default_value = "USD")]
        currency: String,
    },

    /// Show the states with the largest silver purchases
    TopStates {
        /// Purchases CSV (default: from config)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Number of states (default: from config)
        #[arg(short)]
        n: Option<usize>,
        /// Print the bar chart specification instead of the ranking
        #[arg(long)]
        chart: bool,
    },

    /// Summarize the historical price file
    History {
        /// History CSV (default: from config)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::from_env(),
    };
    silverdash::logging::init(&config.logging);

    match cli.command {
        Commands::Cost {
            weight,
            unit,
            price,
            currency,
        } => {
            let pricing = &config.pricing;
            let unit = match unit {
                Some(u) => u.parse::<WeightUnit>().map_err(anyhow::Error::msg)?,
                None => pricing.default_unit,
            };

            let quote = PriceQuote::new(
                weight.unwrap_or(pricing.default_weight),
                unit,
                price.unwrap_or(pricing.default_price_per_gram),
            )?;
            let rates = pricing.conversion_table()?;

            let cost = match quote_cost(&quote, &rates, &currency) {
                Ok(cost) => cost,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    eprintln!(
                        "Available currencies: {}",
                        rates.codes().collect::<Vec<_>>().join(", ")
                    );
                    std::process::exit(1);
                }
            };

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&cost)?),
                "csv" => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout());
                    writer.serialize(&cost)?;
                    writer.flush()?;
                }
                _ => {
                    println!(
                        "Weight: {} {} ({} g)",
                        cost.weight, cost.unit, cost.weight_in_grams
                    );
                    println!(
                        "Total Cost: {}",
                        format_total(&pricing.base_symbol, cost.total_cost)
                    );
                    println!(
                        "Converted Amount: {}",
                        format_converted(&cost.currency, cost.converted_amount)
                    );
                }
            }
        }

        Commands::TopStates { file, n, chart } => {
            let path = file.unwrap_or_else(|| config.data.purchases_path());
            let table = load_or_exit(PurchaseTable::load(&path));
            let n = n.unwrap_or(config.pricing.top_n);
            let top = table.top_n(n);

            if chart {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&BarChartSpec::top_states(&top))?
                );
                return Ok(());
            }

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&top)?),
                "csv" => {
                    println!("State,Silver_Purchased_kg");
                    for record in &top {
                        println!("{},{}", record.state, record.purchased_kg);
                    }
                }
                _ => {
                    println!("Top {} States with Highest Silver Purchases", top.len());
                    println!();
                    println!("{:<4} {:<24} {:>14}", "#", "State", "Purchased (kg)");
                    println!("{}", "-".repeat(44));
                    for (rank, record) in top.iter().enumerate() {
                        println!(
                            "{:<4} {:<24} {:>14.2}",
                            rank + 1,
                            record.state,
                            record.purchased_kg
                        );
                    }
                }
            }
        }

        Commands::History { file } => {
            let path = file.unwrap_or_else(|| config.data.history_path());
            let history = load_or_exit(PriceHistory::load(&path));

            let Some(summary) = history.summary() else {
                println!("No price points in {:?}", path);
                return Ok(());
            };

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
                _ => {
                    println!("Price points: {}", summary.count);
                    println!("Range: {} to {}", summary.first_date, summary.last_date);
                    println!("Latest price: {:.2}", summary.latest_price);
                    println!("Min price: {:.2}", summary.min_price);
                    println!("Max price: {:.2}", summary.max_price);
                    if history.rows_skipped() > 0 {
                        println!("Skipped rows: {}", history.rows_skipped());
                    }
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Print the load error and stop; nothing partial is shown
fn load_or_exit<T>(result: silverdash::dataset::DatasetResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
