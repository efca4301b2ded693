//! Conversion between nested binary chains of one associative operator
//! and the flat n-ary form, and back.

use std::rc::Rc;

use eqv_ast::{BinOp, Expr, NaryOp};
use smallvec::SmallVec;

use crate::error::EngineError;
use crate::fixed_point::{fixed_point, Limits};
use crate::pass::{map_children, Pass};

/// Collapse a nested chain of one associative operator (`Add` or `Mul`)
/// into a single n-ary node whose args are the chain's leaves in
/// left-to-right order. Non-associative operators keep their binary
/// shape; the pass recurses into them.
pub struct Flatten;

impl Pass for Flatten {
    fn name(&self) -> &'static str {
        "Flatten"
    }

    fn run(&self, expr: &Rc<Expr>, limits: &Limits) -> Result<Rc<Expr>, EngineError> {
        fixed_point(self.name(), expr, limits, |e| Ok(flatten(e)))
    }
}

fn flatten(expr: &Rc<Expr>) -> Rc<Expr> {
    let op = match expr.as_ref() {
        Expr::Binary(bop, _, _) => NaryOp::from_bin_op(*bop),
        Expr::Nary(nop, _) => Some(*nop),
        _ => None,
    };
    match op {
        Some(op) => {
            let mut args: SmallVec<[Rc<Expr>; 8]> = SmallVec::new();
            collect_args(expr, op, &mut args);
            Expr::nary(op, args.into_vec())
        }
        None => map_children(expr, &mut |e| flatten(e)),
    }
}

fn collect_args(expr: &Rc<Expr>, op: NaryOp, out: &mut SmallVec<[Rc<Expr>; 8]>) {
    match expr.as_ref() {
        Expr::Binary(bop, l, r) if *bop == op.as_bin_op() => {
            collect_args(l, op, out);
            collect_args(r, op, out);
        }
        Expr::Nary(nop, args) if *nop == op => {
            for arg in args {
                collect_args(arg, op, out);
            }
        }
        _ => out.push(flatten(expr)),
    }
}

/// Inverse of [`Flatten`]: fold an n-ary node's args back into a nested
/// left-associated binary chain.
pub struct Unflatten;

impl Pass for Unflatten {
    fn name(&self) -> &'static str {
        "Unflatten"
    }

    fn run(&self, expr: &Rc<Expr>, limits: &Limits) -> Result<Rc<Expr>, EngineError> {
        fixed_point(self.name(), expr, limits, |e| Ok(unflatten(e)))
    }
}

fn unflatten(expr: &Rc<Expr>) -> Rc<Expr> {
    if let Expr::Nary(op, args) = expr.as_ref() {
        let args: Vec<Rc<Expr>> = args.iter().map(|a| unflatten(a)).collect();
        return unflatten_args(op.as_bin_op(), &args);
    }
    map_children(expr, &mut |e| unflatten(e))
}

fn unflatten_args(op: BinOp, args: &[Rc<Expr>]) -> Rc<Expr> {
    let mut result = Rc::clone(&args[0]);
    for arg in &args[1..] {
        result = Expr::binary(op, result, Rc::clone(arg));
    }
    result
}
