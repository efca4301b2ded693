//! Canonical ordering of commutative operands. This is the sole source
//! of commutativity in the system: without it `a+b` and `b+a` are
//! distinct trees.

use std::cmp::Ordering;
use std::rc::Rc;

use eqv_ast::{compare_expr, Expr, NaryOp};

use crate::error::EngineError;
use crate::fixed_point::{fixed_point, Limits};
use crate::pass::{map_children, Pass};

/// Sort the args of flat `Add` nodes (and swap out-of-order binary `Add`
/// operands) into the total structural order.
pub struct CanonicalAdds;

impl Pass for CanonicalAdds {
    fn name(&self) -> &'static str {
        "CanonicalAdds"
    }

    fn run(&self, expr: &Rc<Expr>, limits: &Limits) -> Result<Rc<Expr>, EngineError> {
        fixed_point(self.name(), expr, limits, |e| {
            Ok(canonicalize(e, NaryOp::Add))
        })
    }
}

/// Sort the args of flat `Mul` nodes (and swap out-of-order binary `Mul`
/// operands) into the total structural order. Constants sort to the
/// front, so any `-1` factors end up leading the arg list.
pub struct CanonicalMuls;

impl Pass for CanonicalMuls {
    fn name(&self) -> &'static str {
        "CanonicalMuls"
    }

    fn run(&self, expr: &Rc<Expr>, limits: &Limits) -> Result<Rc<Expr>, EngineError> {
        fixed_point(self.name(), expr, limits, |e| {
            Ok(canonicalize(e, NaryOp::Mul))
        })
    }
}

fn canonicalize(expr: &Rc<Expr>, target: NaryOp) -> Rc<Expr> {
    match expr.as_ref() {
        Expr::Binary(op, l, r) if *op == target.as_bin_op() => {
            let l = canonicalize(l, target);
            let r = canonicalize(r, target);
            if let (Expr::Const(a), Expr::Const(b)) = (l.as_ref(), r.as_ref()) {
                if let Some(folded) = fold_binary(target, *a, *b) {
                    return folded;
                }
            }
            if compare_expr(&l, &r) == Ordering::Greater {
                Expr::binary(*op, r, l)
            } else {
                Expr::binary(*op, l, r)
            }
        }
        Expr::Nary(nop, args) if *nop == target => {
            let mut args: Vec<Rc<Expr>> =
                args.iter().map(|a| canonicalize(a, target)).collect();
            args.sort_by(|a, b| compare_expr(a, b));
            let args = fold_constant_run(target, args);
            if args.len() == 1 {
                return Rc::clone(&args[0]);
            }
            Expr::nary(target, args)
        }
        _ => map_children(expr, &mut |e| canonicalize(e, target)),
    }
}

fn fold_pair(op: NaryOp, a: i64, b: i64) -> Option<i64> {
    match op {
        NaryOp::Add => a.checked_add(b),
        NaryOp::Mul => a.checked_mul(b),
    }
}

/// Fold two constant operands of a binary node. A negative product keeps
/// its sign as an explicit `-1` factor (see [`fold_constant_run`]).
fn fold_binary(op: NaryOp, a: i64, b: i64) -> Option<Rc<Expr>> {
    let value = fold_pair(op, a, b)?;
    if op == NaryOp::Mul && value < 0 {
        let magnitude = value.checked_neg()?;
        if magnitude == 1 {
            return Some(Expr::num(-1));
        }
        return Some(Expr::mul(Expr::num(-1), Expr::num(magnitude)));
    }
    Some(Expr::num(value))
}

/// Merge the leading run of constants in a sorted arg list with direct
/// integer arithmetic. On overflow the run is left unfolded — both sides
/// of a comparison then either fold or don't, so verdicts stay sound.
///
/// A negative product is emitted as `-1` times its magnitude: the `-1`
/// stays an explicit factor so the negation-cleanup passes can collapse
/// it into unary form and cancellation can match the term against its
/// positive twin.
fn fold_constant_run(op: NaryOp, args: Vec<Rc<Expr>>) -> Vec<Rc<Expr>> {
    let run = args
        .iter()
        .take_while(|a| matches!(a.as_ref(), Expr::Const(_)))
        .count();
    if run < 2 {
        return args;
    }
    let mut acc = match args[0].as_ref() {
        Expr::Const(n) => *n,
        _ => unreachable!(),
    };
    for arg in &args[1..run] {
        let Expr::Const(n) = arg.as_ref() else {
            unreachable!()
        };
        match fold_pair(op, acc, *n) {
            Some(value) => acc = value,
            None => return args,
        }
    }
    let mut folded = Vec::with_capacity(args.len() - run + 2);
    if op == NaryOp::Mul && acc < 0 {
        let Some(magnitude) = acc.checked_neg() else {
            return args;
        };
        folded.push(Expr::num(-1));
        if magnitude != 1 {
            folded.push(Expr::num(magnitude));
        }
    } else {
        folded.push(Expr::num(acc));
    }
    folded.extend(args[run..].iter().cloned());
    folded
}
