//! # Zakat CLI
//!
//! A command-line front end for the zakat-engine calculators.
//!
//! ## Usage
//! ```bash
//! zakat-cli income 100000000 --gold-price 1100000
//! zakat-cli gold 100 --price 1000000
//! zakat-cli fitrah --people 4 --food rice
//! zakat-cli --json nisab
//! ```
//!
//! Values are passed to the engine as typed, so the engine's own fallback and
//! validation rules apply to them.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use zakat_engine::format::{format_grams, format_kg, format_rupiah};
use zakat_engine::prelude::*;

mod config_loader;

use config_loader::CliConfig;

/// Zakat calculator for income, gold and Zakat Fitrah
#[derive(Parser, Debug)]
#[command(name = "zakat-cli")]
#[command(version)]
#[command(about = "Zakat calculator for income, gold and Zakat Fitrah", long_about = None)]
struct Args {
    /// Gold price per gram (overrides config and environment)
    #[arg(long, global = true)]
    gold_price: Option<String>,

    /// Output results as JSON
    #[arg(long, global = true, default_value = "false")]
    json: bool,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Zakat on professional income (nisab = 85 g of gold)
    Income {
        /// Income amount in Rupiah
        amount: String,
    },
    /// Zakat on gold holdings
    Gold {
        /// Weight in grams
        weight: String,
        /// Price per gram (defaults to --gold-price, then the configured price)
        #[arg(long)]
        price: Option<String>,
    },
    /// Zakat Fitrah for a household
    Fitrah {
        /// Number of people; anything that is not a whole number counts as one
        #[arg(long, default_value = "1")]
        people: String,
        /// Staple food: rice/beras or wheat/gandum
        #[arg(long)]
        food: Option<StapleFood>,
        /// Price per kg (defaults to the configured price of the chosen food)
        #[arg(long)]
        price: Option<String>,
    },
    /// Show the current nisab thresholds
    Nisab,
    /// Print the JSON Schema of a calculation result
    Schema,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "zakat_engine=debug,zakat_cli=debug" } else { "zakat_engine=info,zakat_cli=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let file_config = CliConfig::load(args.config.as_deref())?;
    let mut config = file_config.to_zakat_config()?;
    let json = args.json || file_config.json.unwrap_or(false);

    // A valid --gold-price also becomes the configured price.
    if let Some(raw) = &args.gold_price
        && let Ok(price) = raw.as_str().into_zakat_decimal()
        && price > rust_decimal::Decimal::ZERO
    {
        config.prices.gold_per_gram = price;
    }
    tracing::debug!(?config, "resolved configuration");

    let details = match args.command {
        Commands::Nisab => {
            let thresholds = NisabThresholds::compute(&config, config.prices.gold_per_gram)?;
            print_nisab(&thresholds, &config, json)?;
            return Ok(());
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(ZakatDetails);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            return Ok(());
        }
        command => calculate(command, args.gold_price, file_config.food, &config)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        print_details(&details);
    }
    Ok(())
}

/// Runs a calculator subcommand.
///
/// `--gold-price` feeds the income nisab, where an unusable price falls back
/// to the configured one, and stands in for `gold --price`, where it is
/// validated like any other gold price.
fn calculate(
    command: Commands,
    gold_price: Option<String>,
    file_food: Option<StapleFood>,
    config: &ZakatConfig,
) -> Result<ZakatDetails, ZakatError> {
    match command {
        Commands::Income { amount } => match gold_price {
            Some(raw) => calculate_income_zakat(amount, raw, config),
            None => calculate_income_zakat(amount, config.prices.gold_per_gram, config),
        },
        Commands::Gold { weight, price } => {
            let price = price
                .or(gold_price)
                .unwrap_or_else(|| config.prices.gold_per_gram.to_string());
            calculate_gold_zakat(weight, price, config)
        }
        Commands::Fitrah { people, food, price } => {
            let food = food.or(file_food).unwrap_or_default();
            let price = price.unwrap_or_else(|| food.default_price(config).to_string());
            calculate_fitrah_zakat(people, price, config)
        }
        Commands::Nisab | Commands::Schema => Err(ZakatError::Configuration(
            "subcommand does not produce a calculation".to_string(),
        )),
    }
}

fn print_details(details: &ZakatDetails) {
    println!("{}", format!("Zakat {}", details.wealth_type).as_str().bright_cyan().bold());
    match &details.breakdown {
        Breakdown::Income { income_amount, .. } => {
            println!("  Income:       {}", format_rupiah(*income_amount));
        }
        Breakdown::Gold { weight_grams, total_value, .. } => {
            println!("  Weight:       {}", format_grams(*weight_grams));
            println!("  Total value:  {}", format_rupiah(*total_value));
        }
        Breakdown::Fitrah { person_count, total_weight_kg, .. } => {
            println!("  People:       {} jiwa", person_count);
            println!("  Total weight: {}", format_kg(*total_weight_kg));
        }
    }
    if let Some(nisab) = details.nisab_threshold {
        let nisab = match details.wealth_type {
            WealthType::Gold => format_grams(nisab),
            _ => format_rupiah(nisab),
        };
        println!("  Nisab:        {}", nisab);
    }

    let status = if details.is_obligated {
        details.status_label().green().bold()
    } else {
        details.status_label().red().bold()
    };
    println!("  Status:       {}", status);
    println!("  Zakat due:    {}", details.format_amount().as_str().bold());
}

fn print_nisab(thresholds: &NisabThresholds, config: &ZakatConfig, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(thresholds)?);
        return Ok(());
    }
    println!("{}", "Nisab".bright_cyan().bold());
    println!("  Income: {}", format_rupiah(thresholds.income_value));
    println!("  Gold:   {}", format_grams(thresholds.gold_grams));
    println!("  Fitrah: {} per jiwa", format_kg(config.rates.fitrah_kg_per_person));
    Ok(())
}
