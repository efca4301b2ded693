use std::rc::Rc;

use eqv_ast::{structural_hash, Expr};
use tracing::debug;

use crate::error::EngineError;

/// Bounds on fixed-point iteration. The rewriting system is designed to
/// converge on its own; the ceiling exists so a termination bug or a
/// pathological input surfaces as a typed fault instead of a hang.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_iterations: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_iterations: 512,
        }
    }
}

/// Apply `step` until the result stops changing.
///
/// Successive results are compared by structural hash first (cheap
/// pre-filter) and confirmed with full structural equality, so a hash
/// collision can never end an iteration early.
pub fn fixed_point<F>(
    name: &'static str,
    expr: &Rc<Expr>,
    limits: &Limits,
    mut step: F,
) -> Result<Rc<Expr>, EngineError>
where
    F: FnMut(&Rc<Expr>) -> Result<Rc<Expr>, EngineError>,
{
    let mut current = Rc::clone(expr);
    let mut current_hash = structural_hash(&current);
    for iteration in 0..limits.max_iterations {
        let next = step(&current)?;
        let next_hash = structural_hash(&next);
        if next_hash == current_hash && next == current {
            debug!(pass = name, iterations = iteration + 1, "fixed point reached");
            return Ok(next);
        }
        current = next;
        current_hash = next_hash;
    }
    Err(EngineError::NonConvergence {
        pass: name,
        limit: limits.max_iterations,
    })
}
