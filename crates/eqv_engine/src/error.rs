use eqv_parser::ParseError;
use thiserror::Error;

/// Faults raised by the rewrite machinery itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("pass '{pass}' did not converge within {limit} iterations")]
    NonConvergence { pass: &'static str, limit: usize },
}

/// Anything the equivalence entry points can fail with. Errors always
/// reach the caller typed; there is no silent fallback to a default
/// verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
