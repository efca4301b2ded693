//! `check` subcommand: equivalence verdict with contract exit codes.
//! 0 = equivalent, 1 = not equivalent, 2 = input could not be processed.

use clap::Args;

use eqv_engine::{Limits, Normalizer};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Left-hand expression
    pub lhs: String,

    /// Right-hand expression
    pub rhs: String,

    /// Fixed-point iteration ceiling
    #[arg(long, default_value_t = Limits::default().max_iterations)]
    pub max_iterations: usize,
}

pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let normalizer = Normalizer::with_limits(Limits {
        max_iterations: args.max_iterations,
    });
    match normalizer.are_equivalent(&args.lhs, &args.rhs) {
        Ok(true) => {
            println!("equivalent");
            Ok(())
        }
        Ok(false) => {
            println!("not equivalent");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    }
}
