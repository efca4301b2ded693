//! The rewrite pass set. Every pass is a pure function from tree to
//! tree; the normalizer composes them in a fixed order.

mod canonical;
mod cleanup;
mod distribute;
mod expand;
mod flatten;

pub use canonical::{CanonicalAdds, CanonicalMuls};
pub use cleanup::{CleanNegOnes, CleanZerosOnes, NegOnesToUnary, ReduceAddNegates};
pub use distribute::Distributive;
pub use expand::{ExpandConst, ExpandSub, ExpandUnary};
pub use flatten::{Flatten, Unflatten};

use std::rc::Rc;

use eqv_ast::Expr;

use crate::error::EngineError;
use crate::fixed_point::Limits;
use crate::pass::Pass;

/// The shared stabilizer: flatten, sort both commutative operators,
/// unflatten. Runs after every structural pass and as the pipeline's
/// final step.
pub fn normalize_core(expr: &Rc<Expr>, limits: &Limits) -> Result<Rc<Expr>, EngineError> {
    let expr = Flatten.run(expr, limits)?;
    let expr = CanonicalAdds.run(&expr, limits)?;
    let expr = CanonicalMuls.run(&expr, limits)?;
    Unflatten.run(&expr, limits)
}

/// [`normalize_core`] as a pass, for use in the pipeline table.
pub struct Normalize;

impl Pass for Normalize {
    fn name(&self) -> &'static str {
        "Normalize"
    }

    fn run(&self, expr: &Rc<Expr>, limits: &Limits) -> Result<Rc<Expr>, EngineError> {
        normalize_core(expr, limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_core_orders_commutative_chains() {
        // c + b*a + 1 → 1 + c + a*b in canonical order, back in binary form.
        let expr = Expr::add(
            Expr::add(Expr::var("c"), Expr::mul(Expr::var("b"), Expr::var("a"))),
            Expr::num(1),
        );
        let result = normalize_core(&expr, &Limits::default()).unwrap();
        assert_eq!(
            result,
            Expr::add(
                Expr::add(Expr::num(1), Expr::var("c")),
                Expr::mul(Expr::var("a"), Expr::var("b"))
            )
        );
    }
}
