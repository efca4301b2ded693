//! `eval` subcommand: one-shot normalization of a single expression.

use clap::Args;
use serde::Serialize;

use eqv_engine::{Limits, Normalizer};

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Expression to normalize
    pub expr: String,

    /// Print each pass's output
    #[arg(long, default_value_t = false)]
    pub steps: bool,

    /// Output format: "text" or "json"
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Fixed-point iteration ceiling
    #[arg(long, default_value_t = Limits::default().max_iterations)]
    pub max_iterations: usize,
}

#[derive(Serialize)]
struct EvalJsonOutput {
    ok: bool,
    input: String,
    normal_form: String,
}

#[derive(Serialize)]
struct ErrorJsonOutput {
    ok: bool,
    input: String,
    error: String,
}

pub fn run(args: EvalArgs) -> anyhow::Result<()> {
    let normalizer = Normalizer::with_limits(Limits {
        max_iterations: args.max_iterations,
    });
    let json = args.format == "json";

    let result = eqv_parser::parse(&args.expr)
        .map_err(eqv_engine::Error::from)
        .and_then(|expr| {
            normalizer
                .normalize_with_steps(&expr)
                .map_err(eqv_engine::Error::from)
        });

    match result {
        Ok((normal_form, steps)) => {
            if json {
                let output = EvalJsonOutput {
                    ok: true,
                    input: args.expr,
                    normal_form: normal_form.to_string(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                if args.steps {
                    for step in &steps {
                        println!("{:>16} => {}", step.pass, step.after);
                    }
                }
                println!("{}", normal_form);
            }
            Ok(())
        }
        Err(e) => {
            if json {
                let output = ErrorJsonOutput {
                    ok: false,
                    input: args.expr,
                    error: e.to_string(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                eprintln!("error: {}", e);
            }
            std::process::exit(2);
        }
    }
}
