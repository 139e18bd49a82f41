use num::Float;
use smallvec::{smallvec, SmallVec};
use std::marker::PhantomData;

/// Divisors whose magnitude does not exceed this threshold make a division
/// undefined. The value is a fixed design constant of the evaluator, not a
/// derived machine epsilon.
pub const NEAR_ZERO_DIVISOR: f64 = 1e-10;

/// Operator tables are tiny and live on the stack.
pub const N_OPERATORS_ON_STACK: usize = 8;

/// Container of the operators of one registry.
pub type OpVec<'a, T> = SmallVec<[Operator<'a, T>; N_OPERATORS_ON_STACK]>;

/// A binary operator that consists of a function pointer and a priority.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct BinOp<T> {
    /// Implementation of the binary operation, e.g., `|a, b| a - b` for `sub`.
    pub apply: fn(T, T) -> T,
    /// Priority of the binary operation. An operation with a higher number
    /// binds tighter, e.g., `mul` binds tighter than `add`.
    pub prio: i32,
}

/// An operator as resolved by the registry, i.e., a word with a binary
/// reduction attached. The unknown-operator sentinel has no reduction.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Operator<'a, T: Copy> {
    /// Word that represents the operator in the string to be parsed, e.g., `add`.
    pub repr: &'a str,
    /// Binary function with priority, absent for the sentinel.
    pub bin_op: Option<BinOp<T>>,
}

impl<'a, T: Copy> Operator<'a, T> {
    /// The registry's "not found" value. Its absent reduction plays the role
    /// of the zero priority: it binds nowhere.
    pub fn unknown() -> Operator<'a, T> {
        Operator {
            repr: "unknown",
            bin_op: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.bin_op.is_none()
    }
}

/// Factory of an operator table. Implement this to parse with a table other
/// than the one of [`WordOpsFactory`](WordOpsFactory).
pub trait MakeOperators<T: Copy>: Clone {
    /// Function that creates the table of operators.
    fn make<'a>() -> OpVec<'a, T>;
}

/// Factory of the five word operators for floating point values.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct WordOpsFactory<T: Float> {
    dummy: PhantomData<T>,
}

impl<T: Float> MakeOperators<T> for WordOpsFactory<T> {
    fn make<'a>() -> OpVec<'a, T> {
        smallvec![
            Operator {
                repr: "add",
                bin_op: Some(BinOp {
                    apply: |a, b| a + b,
                    prio: 1,
                }),
            },
            Operator {
                repr: "sub",
                bin_op: Some(BinOp {
                    apply: |a, b| a - b,
                    prio: 1,
                }),
            },
            Operator {
                repr: "mul",
                bin_op: Some(BinOp {
                    apply: |a, b| a * b,
                    prio: 2,
                }),
            },
            Operator {
                repr: "div",
                bin_op: Some(BinOp {
                    apply: checked_div,
                    prio: 2,
                }),
            },
            Operator {
                repr: "mod",
                bin_op: Some(BinOp {
                    // IEEE remainder, the sign follows the dividend
                    apply: |a, b| a % b,
                    prio: 2,
                }),
            },
        ]
    }
}

/// Divides unless the divisor is closer to zero than allowed by
/// [`NEAR_ZERO_DIVISOR`](NEAR_ZERO_DIVISOR). An undefined division does not
/// abort anything, it turns the result of the enclosing evaluation into NaN.
fn checked_div<T: Float>(a: T, b: T) -> T {
    if b.abs() <= T::from(NEAR_ZERO_DIVISOR).unwrap() {
        T::nan()
    } else {
        a / b
    }
}

/// Looks up an operator by exact, case-sensitive name. A miss yields the
/// sentinel of [`Operator::unknown`](Operator::unknown) rather than an error;
/// whether that is worth reporting is the caller's business.
pub fn find_operator<'a, T: Copy>(name: &str, ops: &[Operator<'a, T>]) -> Operator<'a, T> {
    ops.iter()
        .find(|op| op.repr == name)
        .copied()
        .unwrap_or_else(Operator::unknown)
}
