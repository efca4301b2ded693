//! Distribution of multiplication over additive structure. The most
//! load-bearing pass: it is what makes `a*(b+c)` and `a*b + a*c` reach
//! the same normal form.

use std::rc::Rc;

use eqv_ast::{BinOp, Expr, NaryOp};

use crate::error::EngineError;
use crate::fixed_point::{fixed_point, Limits};
use crate::pass::{map_children, Pass};
use crate::passes::normalize_core;

/// Expand products over sums until no additive structure remains under a
/// multiplicative node. Each sweep distributes one level; the result is
/// re-flattened, re-sorted, and unflattened before the outer fixed-point
/// check, so intermediate growth collapses immediately.
///
/// `Mul` distributes on both sides. `Div` distributes its numerator only
/// — a sum in the denominator is opaque.
pub struct Distributive;

impl Pass for Distributive {
    fn name(&self) -> &'static str {
        "Distributive"
    }

    fn run(&self, expr: &Rc<Expr>, limits: &Limits) -> Result<Rc<Expr>, EngineError> {
        fixed_point(self.name(), expr, limits, |e| {
            let distributed = distribute(e);
            normalize_core(&distributed, limits)
        })
    }
}

fn distribute(expr: &Rc<Expr>) -> Rc<Expr> {
    if let Expr::Binary(op, l, r) = expr.as_ref() {
        if op.is_multiplicative() {
            if *op == BinOp::Mul {
                if let Some(expanded) = distribute_over(r, |term| Expr::mul(Rc::clone(l), term))
                {
                    return expanded;
                }
            }
            if let Some(expanded) =
                distribute_over(l, |term| Expr::binary(*op, term, Rc::clone(r)))
            {
                return expanded;
            }
        }
    }
    map_children(expr, &mut |e| distribute(e))
}

/// If `expr` has additive structure, rebuild it with `wrap` applied to
/// each term; otherwise `None`. Subtraction shape is preserved, so
/// `a*(b-c)` expands to `a*b - a*c`.
fn distribute_over<F>(expr: &Rc<Expr>, wrap: F) -> Option<Rc<Expr>>
where
    F: Fn(Rc<Expr>) -> Rc<Expr>,
{
    match expr.as_ref() {
        Expr::Binary(op, a, b) if op.is_additive() => Some(Expr::binary(
            *op,
            wrap(Rc::clone(a)),
            wrap(Rc::clone(b)),
        )),
        Expr::Nary(NaryOp::Add, args) => {
            let mut terms = args.iter().map(|a| wrap(Rc::clone(a)));
            let first = terms.next()?;
            Some(terms.fold(first, Expr::add))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> Limits {
        Limits::default()
    }

    #[test]
    fn test_distributes_right_operand() {
        // a * (b + c)  →  a*b + a*c (canonically sorted)
        let expr = Expr::mul(
            Expr::var("a"),
            Expr::add(Expr::var("b"), Expr::var("c")),
        );
        let result = Distributive.run(&expr, &limits()).unwrap();
        assert_eq!(
            result,
            Expr::add(
                Expr::mul(Expr::var("a"), Expr::var("b")),
                Expr::mul(Expr::var("a"), Expr::var("c"))
            )
        );
    }

    #[test]
    fn test_distributes_left_operand() {
        let expr = Expr::mul(
            Expr::add(Expr::var("b"), Expr::var("c")),
            Expr::var("a"),
        );
        let result = Distributive.run(&expr, &limits()).unwrap();
        assert_eq!(
            result,
            Expr::add(
                Expr::mul(Expr::var("a"), Expr::var("b")),
                Expr::mul(Expr::var("a"), Expr::var("c"))
            )
        );
    }

    #[test]
    fn test_distributes_through_sub() {
        let expr = Expr::mul(
            Expr::var("a"),
            Expr::sub(Expr::var("b"), Expr::var("c")),
        );
        let result = Distributive.run(&expr, &limits()).unwrap();
        assert_eq!(
            result,
            Expr::sub(
                Expr::mul(Expr::var("a"), Expr::var("b")),
                Expr::mul(Expr::var("a"), Expr::var("c"))
            )
        );
    }

    #[test]
    fn test_numerator_distributes_over_div() {
        let expr = Expr::div(
            Expr::add(Expr::var("a"), Expr::var("b")),
            Expr::var("c"),
        );
        let result = Distributive.run(&expr, &limits()).unwrap();
        assert_eq!(
            result,
            Expr::add(
                Expr::div(Expr::var("a"), Expr::var("c")),
                Expr::div(Expr::var("b"), Expr::var("c"))
            )
        );
    }

    #[test]
    fn test_denominator_sum_is_opaque() {
        let expr = Expr::div(
            Expr::var("c"),
            Expr::add(Expr::var("a"), Expr::var("b")),
        );
        let result = Distributive.run(&expr, &limits()).unwrap();
        assert_eq!(result, expr);
    }

    #[test]
    fn test_full_binomial_product() {
        // (a+b)*(c+d) expands completely across iterations.
        let expr = Expr::mul(
            Expr::add(Expr::var("a"), Expr::var("b")),
            Expr::add(Expr::var("c"), Expr::var("d")),
        );
        let result = Distributive.run(&expr, &limits()).unwrap();
        let expected = Distributive
            .run(
                &Expr::add(
                    Expr::add(
                        Expr::mul(Expr::var("a"), Expr::var("c")),
                        Expr::mul(Expr::var("a"), Expr::var("d")),
                    ),
                    Expr::add(
                        Expr::mul(Expr::var("b"), Expr::var("c")),
                        Expr::mul(Expr::var("b"), Expr::var("d")),
                    ),
                ),
                &limits(),
            )
            .unwrap();
        assert_eq!(result, expected);
    }
}
