//! Wordcalc evaluates arithmetic expressions whose binary operators are
//! spelled as words.
//!
//! ```rust
//! assert_eq!(wordcalc::eval_str::<f64>("2 add 3 mul 4")?, 14.0);
//! # Ok::<(), wordcalc::ParseError>(())
//! ```
//!
//! The five operators are `add`, `sub`, `mul`, `div`, and `mod`, where `mul`,
//! `div`, and `mod` bind tighter than `add` and `sub`, and chains of equal
//! priority associate to the right. Parentheses group sub-expressions, and a
//! literal may carry a leading `-`. A division by a value closer to zero than
//! [`NEAR_ZERO_DIVISOR`](NEAR_ZERO_DIVISOR) is undefined and turns the whole
//! result into NaN instead of failing the parse.
//!
//! [`parse`](parse) and [`eval_tree`](eval_tree) split the pipeline if the
//! tree itself is of interest.

mod expression;
mod operators;
mod parse;
mod parser;
mod result;
mod util;

pub use expression::{eval_tree, ExprNode};
pub use operators::{
    find_operator, BinOp, MakeOperators, OpVec, Operator, WordOpsFactory, NEAR_ZERO_DIVISOR,
    N_OPERATORS_ON_STACK,
};
pub use parse::{parse, parse_with_default_ops};
pub use result::{ParseError, ParseResult};

use num::Float;

/// Parses a line of text with the word operators and evaluates it in one go.
///
/// # Errors
///
/// An error is returned in case [`parse`](parse) returns one.
pub fn eval_str<T: Float>(text: &str) -> ParseResult<T> {
    Ok(eval_tree(&parse_with_default_ops::<T>(text)?))
}

#[cfg(test)]
mod tests {
    use crate::util::assert_float_eq_f64;
    use crate::{eval_str, ParseError};

    #[test]
    fn test_eval_str() {
        assert_float_eq_f64(eval_str("1 add 2").unwrap(), 3.0);
        assert_float_eq_f64(eval_str("1 add 2 mul 3").unwrap(), 7.0);
        assert_float_eq_f64(eval_str("(1 add 2) mul 3").unwrap(), 9.0);
        assert_float_eq_f64(eval_str("10 sub 3 sub 2").unwrap(), 9.0);
        assert_float_eq_f64(eval_str("19.5 mod 4").unwrap(), 3.5);
        assert!(eval_str::<f64>("").is_err());
        assert!(eval_str::<f64>("1 add").is_err());
        assert!(eval_str::<f64>("1.3 add 0.7 mul").is_err());
    }

    #[test]
    fn test_undefined_division_is_nan() {
        assert!(eval_str::<f64>("5 div 0").unwrap().is_nan());
        assert!(eval_str::<f64>("5 div 0.0000000001").unwrap().is_nan());
        assert!(eval_str::<f64>("1 add 5 div 0 mul 3").unwrap().is_nan());
    }

    #[test]
    fn test_error_values() {
        assert_eq!(
            eval_str::<f64>("1 xor 2").unwrap_err(),
            ParseError::UnknownOperator("xor".to_string())
        );
        assert_eq!(
            eval_str::<f64>("1 @ 2").unwrap_err(),
            ParseError::UnexpectedCharacter('@')
        );
        assert_eq!(
            eval_str::<f64>("(1 add 2").unwrap_err(),
            ParseError::UnbalancedParentheses
        );
    }
}
