mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::charges::{BrokerageArgs, TaxArgs};
use commands::growth::{LumpsumArgs, NpsArgs, SipArgs, StepUpSipArgs, StpArgs, SwpArgs};
use commands::loan::EmiArgs;
use commands::margin::{
    CommodityMarginArgs, CurrencyMarginArgs, EquityFuturesArgs, EquityMarginArgs, FoMarginArgs,
    MtfArgs,
};
use commands::options::BlackScholesArgs;

/// Retail investment, loan, and trading calculators
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Retail investment, loan, and trading calculators",
    long_about = "Financial calculators with decimal precision: SIP and lumpsum \
                  projections, loan amortization, brokerage and income-tax charge \
                  sheets, Black-Scholes option pricing with Greeks, and simplified \
                  derivative margin models."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a monthly SIP with a year-by-year breakdown
    Sip(SipArgs),
    /// Project a SIP whose contribution steps up every year
    StepUpSip(StepUpSipArgs),
    /// Compound a one-time investment
    Lumpsum(LumpsumArgs),
    /// NPS retirement corpus, lump sum, and monthly pension
    Nps(NpsArgs),
    /// Systematic withdrawal plan drawdown
    Swp(SwpArgs),
    /// Systematic transfer plan between debt and equity funds
    Stp(StpArgs),
    /// Loan EMI with the full amortization schedule
    Emi(EmiArgs),
    /// Brokerage and regulatory charge sheet for a trade
    Brokerage(BrokerageArgs),
    /// Income tax under the old and new regimes
    Tax(TaxArgs),
    /// Black-Scholes option prices and Greeks
    BlackScholes(BlackScholesArgs),
    /// F&O short-option margin estimate
    FoMargin(FoMarginArgs),
    /// Equity option margin estimate
    EquityMargin(EquityMarginArgs),
    /// Commodity futures margin
    CommodityMargin(CommodityMarginArgs),
    /// Currency derivatives margin
    CurrencyMargin(CurrencyMarginArgs),
    /// Equity futures round-trip P&L on margin
    EquityFutures(EquityFuturesArgs),
    /// Margin trading facility funding cost
    Mtf(MtfArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Sip(args) => commands::growth::run_sip(args),
        Commands::StepUpSip(args) => commands::growth::run_step_up_sip(args),
        Commands::Lumpsum(args) => commands::growth::run_lumpsum(args),
        Commands::Nps(args) => commands::growth::run_nps(args),
        Commands::Swp(args) => commands::growth::run_swp(args),
        Commands::Stp(args) => commands::growth::run_stp(args),
        Commands::Emi(args) => commands::loan::run_emi(args),
        Commands::Brokerage(args) => commands::charges::run_brokerage(args),
        Commands::Tax(args) => commands::charges::run_tax(args),
        Commands::BlackScholes(args) => commands::options::run_black_scholes(args),
        Commands::FoMargin(args) => commands::margin::run_fo_margin(args),
        Commands::EquityMargin(args) => commands::margin::run_equity_margin(args),
        Commands::CommodityMargin(args) => commands::margin::run_commodity_margin(args),
        Commands::CurrencyMargin(args) => commands::margin::run_currency_margin(args),
        Commands::EquityFutures(args) => commands::margin::run_equity_futures(args),
        Commands::Mtf(args) => commands::margin::run_mtf(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
