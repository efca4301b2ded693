use crate::{BinOp, Expr, NaryOp};
use std::cmp::Ordering;
use std::rc::Rc;

/// Total, deterministic structural order over expressions.
///
/// Variant rank decides first; within a rank, contents compare
/// recursively. Constants rank below everything else (and compare by
/// value), so in a canonically sorted product a leading `-1` is always at
/// the front — the negation-cleanup passes rely on this.
pub fn compare_expr(a: &Expr, b: &Expr) -> Ordering {
    let rank_a = get_rank(a);
    let rank_b = get_rank(b);
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }

    use Expr::*;
    match (a, b) {
        (Const(n1), Const(n2)) => n1.cmp(n2),
        (Var(v1), Var(v2)) => v1.cmp(v2),
        (Neg(e1), Neg(e2)) => compare_expr(e1, e2),
        (Binary(_, l1, r1), Binary(_, l2, r2)) => match compare_expr(l1, l2) {
            Ordering::Equal => compare_expr(r1, r2),
            ord => ord,
        },
        (Nary(_, args1), Nary(_, args2)) => compare_args(args1, args2),
        _ => Ordering::Equal, // Should be unreachable if ranks are correct
    }
}

fn get_rank(expr: &Expr) -> u8 {
    use Expr::*;
    match expr {
        Const(_) => 0,
        Var(_) => 1,
        Neg(_) => 2,
        Binary(BinOp::Mul, _, _) => 3,
        Binary(BinOp::Div, _, _) => 4,
        Binary(BinOp::Add, _, _) => 5,
        Binary(BinOp::Sub, _, _) => 6,
        Nary(NaryOp::Mul, _) => 7,
        Nary(NaryOp::Add, _) => 8,
    }
}

fn compare_args(args1: &[Rc<Expr>], args2: &[Rc<Expr>]) -> Ordering {
    for (a1, a2) in args1.iter().zip(args2.iter()) {
        match compare_expr(a1, a2) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    args1.len().cmp(&args2.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NaryOp;

    #[test]
    fn test_constants_sort_before_variables() {
        assert_eq!(
            compare_expr(&Expr::Const(-1), &Expr::Var("a".into())),
            Ordering::Less
        );
        assert_eq!(compare_expr(&Expr::Const(-1), &Expr::Const(1)), Ordering::Less);
    }

    #[test]
    fn test_variables_sort_by_name() {
        assert_eq!(
            compare_expr(&Expr::Var("a".into()), &Expr::Var("b".into())),
            Ordering::Less
        );
    }

    #[test]
    fn test_nary_args_compare_lexicographically() {
        let ab = Expr::nary(NaryOp::Mul, vec![Expr::var("a"), Expr::var("b")]);
        let ac = Expr::nary(NaryOp::Mul, vec![Expr::var("a"), Expr::var("c")]);
        assert_eq!(compare_expr(&ab, &ac), Ordering::Less);

        let abc = Expr::nary(
            NaryOp::Mul,
            vec![Expr::var("a"), Expr::var("b"), Expr::var("c")],
        );
        assert_eq!(compare_expr(&ab, &abc), Ordering::Less);
    }

    #[test]
    fn test_order_is_total_on_equal_trees() {
        let x = Expr::mul(Expr::var("x"), Expr::num(2));
        let y = Expr::mul(Expr::var("x"), Expr::num(2));
        assert_eq!(compare_expr(&x, &y), Ordering::Equal);
    }
}
