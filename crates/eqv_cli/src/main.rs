mod commands;
mod repl;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "eqv",
    version,
    about = "Decide whether two arithmetic expressions are algebraically equivalent"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a single expression
    Eval(commands::eval::EvalArgs),
    /// Check two expressions for equivalence
    Check(commands::check::CheckArgs),
    /// Start the interactive loop
    Repl,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Eval(args)) => commands::eval::run(args),
        Some(Command::Check(args)) => commands::check::run(args),
        Some(Command::Repl) | None => repl::run(),
    }
}
