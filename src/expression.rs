use crate::operators::{BinOp, Operator};
use num::Float;
use std::fmt::{self, Display, Formatter};

/// A parsed expression: a numeric leaf or a binary operator applied to two
/// sub-trees. Trees are built by [`parse`](crate::parse) and only read
/// afterwards; evaluation does not consume or change them.
#[derive(Clone, Debug)]
pub enum ExprNode<'a, T: Copy> {
    /// Operand leaf holding a literal value.
    Num(T),
    /// Binary operation; `op` is always an entry of the registry, never the
    /// unknown-operator sentinel.
    Bin {
        op: Operator<'a, T>,
        left: Box<ExprNode<'a, T>>,
        right: Box<ExprNode<'a, T>>,
    },
}

fn unpack_binop<T: Copy>(op: &Operator<T>) -> BinOp<T> {
    match op.bin_op {
        Some(bin_op) => bin_op,
        None => panic!("This is probably a bug. A tree node holds the unknown operator."),
    }
}

/// Reduces a tree to a single value by recursively applying the node
/// operators. An undefined division somewhere in the tree surfaces as a NaN
/// final result, it does not abort the evaluation.
pub fn eval_tree<T: Float>(node: &ExprNode<T>) -> T {
    match node {
        ExprNode::Num(n) => *n,
        ExprNode::Bin { op, left, right } => {
            (unpack_binop(op).apply)(eval_tree(left), eval_tree(right))
        }
    }
}

impl<'a, T: Copy + Display> Display for ExprNode<'a, T> {
    /// Renders the tree as fully parenthesized text that parses back to an
    /// equivalent tree, e.g., `((1 add 2) mul 3)`.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ExprNode::Num(n) => write!(f, "{}", n),
            ExprNode::Bin { op, left, right } => {
                write!(f, "({} {} {})", left, op.repr, right)
            }
        }
    }
}
