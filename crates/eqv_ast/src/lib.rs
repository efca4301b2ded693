pub mod expression;
pub mod ordering;

pub use expression::{structural_hash, BinOp, Expr, NaryOp};
pub use ordering::compare_expr;
