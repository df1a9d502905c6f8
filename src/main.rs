use anyhow::Result;
use catalog_report::AppCommand;
use catalog_report::cli::report::OutputFormat;
use catalog_report::core::log::init_logging;
use clap::{CommandFactory, Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Output format for reports
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for AppCommand {
    fn from(cmd: Commands) -> AppCommand {
        match cmd {
            Commands::CurrentProducts => AppCommand::CurrentProducts,
            Commands::MostExpensive { count } => AppCommand::MostExpensive { count },
            Commands::PriceBelow { limit } => AppCommand::PriceBelow { limit },
            Commands::PriceBetween { lower, upper } => AppCommand::PriceBetween { lower, upper },
            Commands::AboveAverage => AppCommand::AboveAverage,
            Commands::StockDeficit => AppCommand::StockDeficit,
            Commands::LocalPrices { access_key } => AppCommand::LocalPrices { access_key },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an example configuration, at --config-path when given
    Setup,
    /// List products that are not discontinued
    CurrentProducts,
    /// List the most expensive products
    MostExpensive {
        /// Number of products to show
        count: usize,
    },
    /// List products priced strictly below a limit
    PriceBelow { limit: Decimal },
    /// List products priced strictly between two bounds
    PriceBetween { lower: Decimal, upper: Decimal },
    /// List products priced above the catalog average
    AboveAverage,
    /// List products with fewer units in stock than on order
    StockDeficit,
    /// List current products with prices in their supplier's local currency
    LocalPrices {
        /// Exchange rate service access key
        #[arg(long)]
        access_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => catalog_report::cli::setup::setup_at_path(path),
            None => catalog_report::cli::setup::setup(),
        },
        Some(cmd) => {
            catalog_report::run_command(cmd.into(), cli.config_path.as_deref(), cli.format).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
