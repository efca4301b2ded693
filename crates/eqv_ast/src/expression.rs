use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use rustc_hash::FxHasher;

/// Binary operators as they appear in source text and in raw parse trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// `Add` and `Sub` — the operators of the additive precedence tier.
    pub fn is_additive(self) -> bool {
        matches!(self, BinOp::Add | BinOp::Sub)
    }

    /// `Mul` and `Div` — the operators of the multiplicative precedence tier.
    pub fn is_multiplicative(self) -> bool {
        matches!(self, BinOp::Mul | BinOp::Div)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinOp::Add => write!(f, "+"),
            BinOp::Sub => write!(f, "-"),
            BinOp::Mul => write!(f, "*"),
            BinOp::Div => write!(f, "/"),
        }
    }
}

/// Operators allowed in a flattened n-ary node. Keeping this separate from
/// [`BinOp`] makes "only `Add` and `Mul` flatten" a type-level fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NaryOp {
    Add,
    Mul,
}

impl NaryOp {
    pub fn as_bin_op(self) -> BinOp {
        match self {
            NaryOp::Add => BinOp::Add,
            NaryOp::Mul => BinOp::Mul,
        }
    }

    pub fn from_bin_op(op: BinOp) -> Option<NaryOp> {
        match op {
            BinOp::Add => Some(NaryOp::Add),
            BinOp::Mul => Some(NaryOp::Mul),
            BinOp::Sub | BinOp::Div => None,
        }
    }
}

impl fmt::Display for NaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_bin_op().fmt(f)
    }
}

/// An arithmetic expression tree. Immutable: passes build new trees and
/// share unchanged subtrees through `Rc`.
///
/// `Nary` is the flattened intermediate representation produced by the
/// flatten pass; it never appears in parser output and never survives a
/// full normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Const(i64),
    Var(String),
    Neg(Rc<Expr>),
    Binary(BinOp, Rc<Expr>, Rc<Expr>),
    Nary(NaryOp, Vec<Rc<Expr>>),
}

impl Expr {
    pub fn num(n: i64) -> Rc<Self> {
        Rc::new(Expr::Const(n))
    }

    pub fn var(name: &str) -> Rc<Self> {
        Rc::new(Expr::Var(name.to_string()))
    }

    pub fn neg(expr: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Neg(expr))
    }

    pub fn binary(op: BinOp, lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Rc::new(Expr::Binary(op, lhs, rhs))
    }

    pub fn add(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Self::binary(BinOp::Add, lhs, rhs)
    }

    pub fn sub(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Self::binary(BinOp::Sub, lhs, rhs)
    }

    pub fn mul(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Self::binary(BinOp::Mul, lhs, rhs)
    }

    pub fn div(lhs: Rc<Expr>, rhs: Rc<Expr>) -> Rc<Self> {
        Self::binary(BinOp::Div, lhs, rhs)
    }

    /// Build a flattened n-ary node.
    ///
    /// # Panics
    /// A flat node with fewer than two args has no meaning; constructing
    /// one is a programming fault, not a recoverable condition.
    pub fn nary(op: NaryOp, args: Vec<Rc<Expr>>) -> Rc<Self> {
        assert!(
            args.len() >= 2,
            "n-ary {} node requires at least two args, got {}",
            op,
            args.len()
        );
        Rc::new(Expr::Nary(op, args))
    }

    /// True iff this node is the integer constant `value`.
    pub fn is_const(&self, value: i64) -> bool {
        matches!(self, Expr::Const(v) if *v == value)
    }
}

/// Deterministic content hash of a tree.
///
/// Structurally equal trees always hash equal; the hash is a function of
/// the structure alone (FxHasher carries no per-process seed), so it is
/// stable across runs. Used as a fast pre-filter for fixed-point
/// detection and as a grouping key — never as the equality verdict
/// itself, so a collision can cost time but not correctness.
pub fn structural_hash(expr: &Expr) -> u64 {
    let mut hasher = FxHasher::default();
    expr.hash(&mut hasher);
    hasher.finish()
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(n) => write!(f, "{}", n),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Neg(e) => write!(f, "-({})", e),
            Expr::Binary(op, l, r) => write!(f, "({} {} {})", l, op, r),
            Expr::Nary(op, args) => {
                write!(f, "(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", op)?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
