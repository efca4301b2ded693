use std::rc::Rc;

use eqv_ast::Expr;

use crate::error::EngineError;
use crate::fixed_point::Limits;

/// A rewrite pass: a pure, total function from tree to tree. Passes
/// never partially apply — `run` either returns the fully rewritten
/// tree or an error with the input left untouched.
pub trait Pass {
    fn name(&self) -> &'static str;

    fn run(&self, expr: &Rc<Expr>, limits: &Limits) -> Result<Rc<Expr>, EngineError>;
}

/// Rebuild a node with `f` applied to each direct child. The recursion
/// scaffold shared by every structural pass.
pub(crate) fn map_children<F>(expr: &Rc<Expr>, f: &mut F) -> Rc<Expr>
where
    F: FnMut(&Rc<Expr>) -> Rc<Expr>,
{
    match expr.as_ref() {
        Expr::Const(_) | Expr::Var(_) => Rc::clone(expr),
        Expr::Neg(arg) => Expr::neg(f(arg)),
        Expr::Binary(op, l, r) => Expr::binary(*op, f(l), f(r)),
        Expr::Nary(op, args) => Expr::nary(*op, args.iter().map(|a| f(a)).collect()),
    }
}
