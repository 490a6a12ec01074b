use clap::{Parser, Subcommand};

mod cmd;
mod disposals;
mod formatting;
mod tax;

#[derive(Parser, Debug)]
#[command(name = "taxin", version, about = "Indian Capital Gains Tax Calculator (LTCG/STCG)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate LTCG/STCG tax for a single disposal
    Calculate(cmd::calculate::CalculateCommand),
    /// Multi-asset capital gains with slab rates, indexation and cess
    CapitalGains(cmd::capital_gains::CapitalGainsCommand),
    /// Calculate tax for every disposal in a CSV or JSON file
    Report(cmd::report::ReportCommand),
    /// Show the capital gains regime table
    Regimes(cmd::regimes::RegimesCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calculate(cmd) => cmd.exec(),
        Command::CapitalGains(cmd) => cmd.exec(),
        Command::Report(cmd) => cmd.exec(),
        Command::Regimes(cmd) => cmd.exec(),
    }
}
