//! The normalizer: the fixed ordered composition of passes that defines
//! the canonical form, plus the equivalence entry points built on it.

use std::rc::Rc;

use eqv_ast::Expr;
use eqv_parser::parse;
use tracing::debug;

use crate::error::{EngineError, Error};
use crate::fixed_point::Limits;
use crate::pass::Pass;
use crate::passes::{
    CleanNegOnes, CleanZerosOnes, Distributive, ExpandSub, ExpandUnary, NegOnesToUnary,
    Normalize, ReduceAddNegates,
};

/// One pipeline stage's output, for step-by-step display.
#[derive(Debug, Clone)]
pub struct NormalizeStep {
    pub pass: &'static str,
    pub after: Rc<Expr>,
}

/// Runs the canonical pass pipeline. Holds no mutable state; every call
/// is independent.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    limits: Limits,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        Normalizer { limits }
    }

    fn pipeline(&self) -> [&'static dyn Pass; 8] {
        [
            &ExpandSub,
            &ExpandUnary,
            &Distributive,
            &CleanNegOnes,
            &CleanZerosOnes,
            &NegOnesToUnary,
            &ReduceAddNegates,
            &Normalize,
        ]
    }

    /// Rewrite `expr` to its canonical normal form, recording each
    /// pass's output along the way.
    pub fn normalize_with_steps(
        &self,
        expr: &Rc<Expr>,
    ) -> Result<(Rc<Expr>, Vec<NormalizeStep>), EngineError> {
        let mut current = Rc::clone(expr);
        let mut steps = Vec::new();
        for pass in self.pipeline() {
            current = pass.run(&current, &self.limits)?;
            debug!(pass = pass.name(), after = %current, "pass applied");
            steps.push(NormalizeStep {
                pass: pass.name(),
                after: Rc::clone(&current),
            });
        }
        Ok((current, steps))
    }

    /// Rewrite `expr` to its canonical normal form.
    pub fn normalize(&self, expr: &Rc<Expr>) -> Result<Rc<Expr>, EngineError> {
        self.normalize_with_steps(expr).map(|(result, _)| result)
    }

    /// Parse and normalize both inputs; they are equivalent iff the
    /// normal forms are structurally identical. No numeric evaluation —
    /// purely syntactic after normalization.
    pub fn are_equivalent(&self, lhs: &str, rhs: &str) -> Result<bool, Error> {
        let lhs = parse(lhs)?;
        let rhs = parse(rhs)?;
        Ok(self.normalize(&lhs)? == self.normalize(&rhs)?)
    }
}

/// Normalize with default limits.
pub fn normalize(expr: &Rc<Expr>) -> Result<Rc<Expr>, EngineError> {
    Normalizer::new().normalize(expr)
}

/// Check two source strings for algebraic equivalence with default
/// limits.
pub fn equivalent(lhs: &str, rhs: &str) -> Result<bool, Error> {
    Normalizer::new().are_equivalent(lhs, rhs)
}
