//! Expansion passes: rewrite subtraction and negation into the
//! `Add`/`Mul`-only vocabulary the rest of the pipeline works in.

use std::rc::Rc;

use eqv_ast::{BinOp, Expr};

use crate::error::EngineError;
use crate::fixed_point::Limits;
use crate::pass::{map_children, Pass};

/// `a - b  →  a + (-b)`, everywhere. After this pass no `Sub` node
/// remains, so the additive structure is a pure sum.
pub struct ExpandSub;

impl Pass for ExpandSub {
    fn name(&self) -> &'static str {
        "ExpandSub"
    }

    fn run(&self, expr: &Rc<Expr>, _limits: &Limits) -> Result<Rc<Expr>, EngineError> {
        Ok(expand_sub(expr))
    }
}

fn expand_sub(expr: &Rc<Expr>) -> Rc<Expr> {
    if let Expr::Binary(BinOp::Sub, l, r) = expr.as_ref() {
        return Expr::add(expand_sub(l), Expr::neg(expand_sub(r)));
    }
    map_children(expr, &mut |e| expand_sub(e))
}

/// `-e  →  (-1) * e`, everywhere. After this pass no `Neg` node remains;
/// signs travel as `-1` factors that multiplicative canonicalization can
/// collect. Negative constant leaves hoist their sign the same way
/// (`-5  →  (-1) * 5`), so every sign in the tree is a `-1` factor
/// regardless of how the tree was built.
pub struct ExpandUnary;

impl Pass for ExpandUnary {
    fn name(&self) -> &'static str {
        "ExpandUnary"
    }

    fn run(&self, expr: &Rc<Expr>, _limits: &Limits) -> Result<Rc<Expr>, EngineError> {
        Ok(expand_unary(expr))
    }
}

fn expand_unary(expr: &Rc<Expr>) -> Rc<Expr> {
    match expr.as_ref() {
        Expr::Neg(arg) => Expr::mul(Expr::num(-1), expand_unary(arg)),
        Expr::Const(n) if *n < 0 => match n.checked_neg() {
            // i64::MIN has no positive counterpart; leave it opaque.
            Some(magnitude) => Expr::mul(Expr::num(-1), Expr::num(magnitude)),
            None => Rc::clone(expr),
        },
        _ => map_children(expr, &mut |e| expand_unary(e)),
    }
}

/// Historical variant: expand an integer constant `n` into `n` nested
/// `+1` additions so constants compare through the same structural
/// machinery as compound terms. Not part of the default pipeline —
/// canonicalization folds constants arithmetically instead — but kept
/// available for the expanded-constant normal form.
pub struct ExpandConst;

impl Pass for ExpandConst {
    fn name(&self) -> &'static str {
        "ExpandConst"
    }

    fn run(&self, expr: &Rc<Expr>, _limits: &Limits) -> Result<Rc<Expr>, EngineError> {
        Ok(expand_const(expr))
    }
}

fn expand_const(expr: &Rc<Expr>) -> Rc<Expr> {
    if let Expr::Const(n) = expr.as_ref() {
        return expand_value(*n);
    }
    map_children(expr, &mut |e| expand_const(e))
}

fn expand_value(n: i64) -> Rc<Expr> {
    if n < 0 {
        // i64::MIN has no positive counterpart; leave it opaque.
        return match n.checked_neg() {
            Some(pos) => Expr::neg(expand_value(pos)),
            None => Expr::num(n),
        };
    }
    if n == 0 {
        return Expr::num(0);
    }
    Expr::add(expand_value(n - 1), Expr::num(1))
}
