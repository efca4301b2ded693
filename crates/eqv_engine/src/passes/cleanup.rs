//! Cleanup passes: identity elimination, sign compaction, and term
//! cancellation.

use std::rc::Rc;

use eqv_ast::{structural_hash, BinOp, Expr, NaryOp};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::EngineError;
use crate::fixed_point::{fixed_point, Limits};
use crate::pass::{map_children, Pass};
use crate::passes::{CanonicalMuls, Flatten, Unflatten};

/// Remove multiplicative and additive identities: `x*0 → 0`, `x*1 → x`,
/// `1*x → x`, `x+0 → x`, `0+x → x`, `x-0 → x`. Operates on binary form
/// only and must run after unflattening; hitting a flat node is a
/// programming fault.
pub struct CleanZerosOnes;

impl Pass for CleanZerosOnes {
    fn name(&self) -> &'static str {
        "CleanZerosOnes"
    }

    fn run(&self, expr: &Rc<Expr>, limits: &Limits) -> Result<Rc<Expr>, EngineError> {
        fixed_point(self.name(), expr, limits, |e| Ok(clean_zeros_ones(e)))
    }
}

fn clean_zeros_ones(expr: &Rc<Expr>) -> Rc<Expr> {
    match expr.as_ref() {
        Expr::Binary(BinOp::Mul, l, r) => {
            if l.is_const(0) || r.is_const(0) {
                Expr::num(0)
            } else if l.is_const(1) {
                clean_zeros_ones(r)
            } else if r.is_const(1) {
                clean_zeros_ones(l)
            } else {
                Expr::mul(clean_zeros_ones(l), clean_zeros_ones(r))
            }
        }
        Expr::Binary(BinOp::Add, l, r) => {
            if l.is_const(0) {
                clean_zeros_ones(r)
            } else if r.is_const(0) {
                clean_zeros_ones(l)
            } else {
                Expr::add(clean_zeros_ones(l), clean_zeros_ones(r))
            }
        }
        Expr::Binary(BinOp::Sub, l, r) => {
            if r.is_const(0) {
                clean_zeros_ones(l)
            } else {
                Expr::sub(clean_zeros_ones(l), clean_zeros_ones(r))
            }
        }
        Expr::Nary(..) => unreachable!("CleanZerosOnes runs on unflattened trees"),
        _ => map_children(expr, &mut |e| clean_zeros_ones(e)),
    }
}

/// Collapse the leading run of `-1` factors in a canonically sorted flat
/// product: an even count becomes two `1` placeholders, an odd count a
/// `-1` and a `1`. The placeholders keep the arg count at two or more
/// even when nothing else remains; identity cleanup removes them later.
pub struct CleanNegOnes;

impl Pass for CleanNegOnes {
    fn name(&self) -> &'static str {
        "CleanNegOnes"
    }

    fn run(&self, expr: &Rc<Expr>, limits: &Limits) -> Result<Rc<Expr>, EngineError> {
        let flat = Flatten.run(expr, limits)?;
        let sorted = CanonicalMuls.run(&flat, limits)?;
        let cleaned = clean_neg_ones(&sorted);
        Unflatten.run(&cleaned, limits)
    }
}

fn clean_neg_ones(expr: &Rc<Expr>) -> Rc<Expr> {
    if let Expr::Nary(NaryOp::Mul, args) = expr.as_ref() {
        let run = args.iter().take_while(|a| a.is_const(-1)).count();
        if run > 0 {
            let mut new_args = Vec::with_capacity(args.len() - run + 2);
            if run % 2 != 0 {
                new_args.push(Expr::num(-1));
            } else {
                new_args.push(Expr::num(1));
            }
            new_args.push(Expr::num(1));
            new_args.extend(args[run..].iter().map(clean_neg_ones));
            return Expr::nary(NaryOp::Mul, new_args);
        }
    }
    map_children(expr, &mut |e| clean_neg_ones(e))
}

/// Turn a flat product led by a single `-1` factor back into unary
/// negation: the compaction stage inverse of unary expansion.
pub struct NegOnesToUnary;

impl Pass for NegOnesToUnary {
    fn name(&self) -> &'static str {
        "NegOnesToUnary"
    }

    fn run(&self, expr: &Rc<Expr>, limits: &Limits) -> Result<Rc<Expr>, EngineError> {
        let flat = Flatten.run(expr, limits)?;
        fixed_point(self.name(), &flat, limits, |e| Ok(neg_ones_to_unary(e)))
    }
}

fn neg_ones_to_unary(expr: &Rc<Expr>) -> Rc<Expr> {
    if let Expr::Nary(NaryOp::Mul, args) = expr.as_ref() {
        if args[0].is_const(-1) {
            if args.len() == 2 {
                return Expr::neg(neg_ones_to_unary(&args[1]));
            }
            let rest: Vec<Rc<Expr>> = args[1..].iter().map(neg_ones_to_unary).collect();
            return Expr::neg(Expr::nary(NaryOp::Mul, rest));
        }
    }
    map_children(expr, &mut |e| neg_ones_to_unary(e))
}

/// Cancel matching negated/plain terms inside a flattened sum:
/// `x + (-x)` cancels to nothing. The only pass that deletes
/// information rather than reshaping it. An empty result is `0`; a
/// singleton is unwrapped.
pub struct ReduceAddNegates;

impl Pass for ReduceAddNegates {
    fn name(&self) -> &'static str {
        "ReduceAddNegates"
    }

    fn run(&self, expr: &Rc<Expr>, limits: &Limits) -> Result<Rc<Expr>, EngineError> {
        let flat = Flatten.run(expr, limits)?;
        Ok(reduce_add_negates(&flat))
    }
}

fn reduce_add_negates(expr: &Rc<Expr>) -> Rc<Expr> {
    match expr.as_ref() {
        Expr::Nary(op, args) => {
            let args: Vec<Rc<Expr>> = args.iter().map(reduce_add_negates).collect();
            match op {
                NaryOp::Add => cancel_terms(args),
                NaryOp::Mul => Expr::nary(*op, args),
            }
        }
        _ => map_children(expr, &mut |e| reduce_add_negates(e)),
    }
}

struct TermCounts {
    term: Rc<Expr>,
    neg: usize,
    pos: usize,
}

/// The underlying term and whether it is negated.
fn split_negation(arg: &Rc<Expr>) -> (&Rc<Expr>, bool) {
    match arg.as_ref() {
        Expr::Neg(inner) => (inner, true),
        _ => (arg, false),
    }
}

fn cancel_terms(args: Vec<Rc<Expr>>) -> Rc<Expr> {
    // Group terms by structural hash; equality is re-checked inside each
    // bucket, so a collision cannot cancel distinct terms.
    let mut groups: FxHashMap<u64, SmallVec<[TermCounts; 1]>> = FxHashMap::default();
    for arg in &args {
        let (term, negated) = split_negation(arg);
        let bucket = groups.entry(structural_hash(term)).or_default();
        match bucket.iter_mut().find(|counts| &counts.term == term) {
            Some(counts) => {
                if negated {
                    counts.neg += 1;
                } else {
                    counts.pos += 1;
                }
            }
            None => bucket.push(TermCounts {
                term: Rc::clone(term),
                neg: negated as usize,
                pos: !negated as usize,
            }),
        }
    }

    for bucket in groups.values_mut() {
        for counts in bucket.iter_mut() {
            let cancelled = counts.neg.min(counts.pos);
            counts.neg -= cancelled;
            counts.pos -= cancelled;
        }
    }

    // Rebuild in original arg order; each surviving occurrence consumes
    // one remaining count, so the pass is deterministic.
    let mut out: Vec<Rc<Expr>> = Vec::new();
    for arg in &args {
        let (term, negated) = split_negation(arg);
        if let Some(bucket) = groups.get_mut(&structural_hash(term)) {
            if let Some(counts) = bucket.iter_mut().find(|counts| &counts.term == term) {
                let remaining = if negated {
                    &mut counts.neg
                } else {
                    &mut counts.pos
                };
                if *remaining > 0 {
                    *remaining -= 1;
                    out.push(Rc::clone(arg));
                }
            }
        }
    }

    match out.len() {
        0 => Expr::num(0),
        1 => out.swap_remove(0),
        _ => Expr::nary(NaryOp::Add, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::ExpandUnary;

    fn limits() -> Limits {
        Limits::default()
    }

    #[test]
    fn test_clean_mul_identities() {
        let expr = Expr::mul(Expr::num(1), Expr::mul(Expr::var("x"), Expr::num(1)));
        let result = CleanZerosOnes.run(&expr, &limits()).unwrap();
        assert_eq!(result, Expr::var("x"));
    }

    #[test]
    fn test_clean_mul_zero_annihilates() {
        let expr = Expr::mul(Expr::add(Expr::var("x"), Expr::var("y")), Expr::num(0));
        let result = CleanZerosOnes.run(&expr, &limits()).unwrap();
        assert_eq!(result, Expr::num(0));
    }

    #[test]
    fn test_clean_add_zero() {
        let expr = Expr::add(Expr::num(0), Expr::sub(Expr::var("x"), Expr::num(0)));
        let result = CleanZerosOnes.run(&expr, &limits()).unwrap();
        assert_eq!(result, Expr::var("x"));
    }

    #[test]
    fn test_clean_needs_second_sweep() {
        // The inner product only becomes visible as 0 after one sweep.
        let expr = Expr::mul(Expr::var("a"), Expr::mul(Expr::var("b"), Expr::num(0)));
        let result = CleanZerosOnes.run(&expr, &limits()).unwrap();
        assert_eq!(result, Expr::num(0));
    }

    #[test]
    fn test_clean_neg_ones_even_run() {
        let expr = Expr::nary(
            NaryOp::Mul,
            vec![Expr::num(-1), Expr::num(-1), Expr::var("x")],
        );
        // Canonicalization folds the pair first; either way the sign is gone.
        let result = CleanNegOnes.run(&expr, &limits()).unwrap();
        let cleaned = CleanZerosOnes.run(&result, &limits()).unwrap();
        assert_eq!(cleaned, Expr::var("x"));
    }

    #[test]
    fn test_clean_neg_ones_odd_run_keeps_sign() {
        let expr = Expr::nary(NaryOp::Mul, vec![Expr::num(-1), Expr::var("x")]);
        let result = CleanNegOnes.run(&expr, &limits()).unwrap();
        let cleaned = CleanZerosOnes.run(&result, &limits()).unwrap();
        assert_eq!(cleaned, Expr::mul(Expr::num(-1), Expr::var("x")));
    }

    #[test]
    fn test_neg_ones_to_unary_pair() {
        let expr = Expr::nary(NaryOp::Mul, vec![Expr::num(-1), Expr::var("x")]);
        let result = NegOnesToUnary.run(&expr, &limits()).unwrap();
        assert_eq!(result, Expr::neg(Expr::var("x")));
    }

    #[test]
    fn test_neg_ones_to_unary_longer_product() {
        let expr = Expr::nary(
            NaryOp::Mul,
            vec![Expr::num(-1), Expr::var("x"), Expr::var("y")],
        );
        let result = NegOnesToUnary.run(&expr, &limits()).unwrap();
        assert_eq!(
            result,
            Expr::neg(Expr::nary(NaryOp::Mul, vec![Expr::var("x"), Expr::var("y")]))
        );
    }

    #[test]
    fn test_expand_then_compact_roundtrip() {
        // Expanding a negation and re-collapsing it returns the original
        // unary form.
        let original = Expr::neg(Expr::var("x"));
        let expanded = ExpandUnary.run(&original, &limits()).unwrap();
        assert_eq!(expanded, Expr::mul(Expr::num(-1), Expr::var("x")));
        let compacted = NegOnesToUnary.run(&expanded, &limits()).unwrap();
        assert_eq!(compacted, original);
    }

    #[test]
    fn test_cancellation_to_zero() {
        let expr = Expr::add(Expr::var("x"), Expr::neg(Expr::var("x")));
        let result = ReduceAddNegates.run(&expr, &limits()).unwrap();
        assert_eq!(result, Expr::num(0));
    }

    #[test]
    fn test_partial_cancellation_unwraps_singleton() {
        // x + y + (-x) leaves just y.
        let expr = Expr::add(
            Expr::add(Expr::var("x"), Expr::var("y")),
            Expr::neg(Expr::var("x")),
        );
        let result = ReduceAddNegates.run(&expr, &limits()).unwrap();
        assert_eq!(result, Expr::var("y"));
    }

    #[test]
    fn test_cancellation_is_pairwise() {
        // Two negatives, one positive: one negative survives.
        let expr = Expr::nary(
            NaryOp::Add,
            vec![
                Expr::neg(Expr::var("x")),
                Expr::neg(Expr::var("x")),
                Expr::var("x"),
            ],
        );
        let result = ReduceAddNegates.run(&expr, &limits()).unwrap();
        assert_eq!(result, Expr::neg(Expr::var("x")));
    }

    #[test]
    fn test_unrelated_terms_survive() {
        let expr = Expr::add(Expr::var("x"), Expr::neg(Expr::var("y")));
        let result = ReduceAddNegates.run(&expr, &limits()).unwrap();
        assert_eq!(
            result,
            Expr::nary(NaryOp::Add, vec![Expr::var("x"), Expr::neg(Expr::var("y"))])
        );
    }
}
