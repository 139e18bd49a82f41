use crate::expression::ExprNode;
use crate::operators::{MakeOperators, Operator, WordOpsFactory};
use crate::parser::{parse_operand, parse_operator, peek_word, Cursor};
use crate::result::{ParseError, ParseResult};
use num::Float;

/// A factor is a parenthesized sub-expression or a numeric literal.
fn parse_factor<'a, T: Float>(
    cur: &mut Cursor,
    ops: &[Operator<'a, T>],
) -> ParseResult<ExprNode<'a, T>> {
    cur.skip_whitespace();
    match cur.peek() {
        Some('(') => {
            cur.bump();
            let inner = parse_expression(cur, ops, 0)?;
            cur.skip_whitespace();
            match cur.peek() {
                Some(')') => {
                    cur.bump();
                    Ok(inner)
                }
                // The climb inside the parentheses stopped early. A word it
                // could not consume explains the missing parenthesis better
                // than the parenthesis itself.
                _ => Err(match peek_word(cur) {
                    Some(word) => ParseError::UnknownOperator(word.to_string()),
                    None => ParseError::UnbalancedParentheses,
                }),
            }
        }
        Some(c) if c.is_ascii_digit() || c == '-' => parse_operand(cur),
        Some(c) => Err(ParseError::UnexpectedCharacter(c)),
        None => Err(ParseError::UnexpectedEnd),
    }
}

/// The precedence climb of the parser. `min_prio` is the binding floor:
/// operators with a priority below it belong to an enclosing call. The
/// right-hand recursion climbs with the consumed operator's own priority as
/// the new floor, so chains of equal priority lean to the right:
/// `10 sub 3 sub 2` is `10 sub (3 sub 2)`.
fn parse_expression<'a, T: Float>(
    cur: &mut Cursor,
    ops: &[Operator<'a, T>],
    min_prio: i32,
) -> ParseResult<ExprNode<'a, T>> {
    let mut left = parse_factor(cur, ops)?;
    loop {
        cur.skip_whitespace();
        let snapshot = cur.pos();
        let op = parse_operator(cur, ops);
        let prio = match op.bin_op {
            Some(bin_op) => bin_op.prio,
            // end of the input, a closing parenthesis, or a word that the
            // entry point will report; not ours to consume
            None => {
                cur.set_pos(snapshot);
                break;
            }
        };
        if prio < min_prio {
            cur.set_pos(snapshot);
            break;
        }
        let right = parse_expression(cur, ops, prio)?;
        left = ExprNode::Bin {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
    }
    Ok(left)
}

/// Parses a line of text into an expression tree using the given operator
/// table.
///
/// The whole input must be consumed: content after a structurally complete
/// expression is an error, not ignored.
///
/// # Errors
///
/// A [`ParseError`](ParseError) is returned, if
///
/// * an alphabetic word matches no registered operator, e.g., `1 xor 2`,
/// * a numeric literal is followed by a character that may not follow it,
///   e.g., `5#`,
/// * a parenthesis has no counterpart, e.g., `(1 add 2` or `1 add 2)`,
/// * a factor position holds neither a digit nor `-` nor `(`, e.g., `1 add @`,
/// * the input ends although a factor is still required, e.g., `1 add`.
pub fn parse<'a, T: Float>(text: &str, ops: &[Operator<'a, T>]) -> ParseResult<ExprNode<'a, T>> {
    let mut cur = Cursor::new(text);
    let root = parse_expression(&mut cur, ops, 0)?;
    cur.skip_whitespace();
    match cur.peek() {
        None => Ok(root),
        Some(')') => Err(ParseError::UnbalancedParentheses),
        Some(c) => Err(match peek_word(&cur) {
            Some(word) => ParseError::UnknownOperator(word.to_string()),
            None => ParseError::UnexpectedCharacter(c),
        }),
    }
}

/// Parses a line of text into an expression tree using the word operators of
/// [`WordOpsFactory`](WordOpsFactory).
///
/// # Errors
///
/// An error is returned in case [`parse`](parse) returns one.
pub fn parse_with_default_ops<T: Float>(text: &str) -> ParseResult<ExprNode<'static, T>> {
    let ops = WordOpsFactory::<T>::make();
    parse(text, &ops)
}

#[cfg(test)]
mod tests {
    use super::parse_with_default_ops;
    use crate::expression::eval_tree;
    use crate::result::ParseError;
    use crate::util::assert_float_eq_f64;

    fn eval(text: &str) -> f64 {
        eval_tree(&parse_with_default_ops::<f64>(text).unwrap())
    }

    fn parse_err(text: &str) -> ParseError {
        parse_with_default_ops::<f64>(text).unwrap_err()
    }

    #[test]
    fn test_single_operations() {
        assert_float_eq_f64(eval("1 add 2"), 3.0);
        assert_float_eq_f64(eval("1.3 add 0.7"), 2.0);
        assert_float_eq_f64(eval("10 sub 3"), 7.0);
        assert_float_eq_f64(eval("1.5 mul 6"), 9.0);
        assert_float_eq_f64(eval("7 div 4"), 1.75);
        assert_float_eq_f64(eval("7 mod 4"), 3.0);
    }

    #[test]
    fn test_precedence() {
        assert_float_eq_f64(eval("1 add 2 mul 3"), 7.0);
        assert_float_eq_f64(eval("(1 add 2) mul 3"), 9.0);
        assert_float_eq_f64(eval("2 mul 3 add 4 mul 5"), 26.0);
        assert_float_eq_f64(eval("100 sub 10 mul 9"), 10.0);
    }

    #[test]
    fn test_right_associativity() {
        assert_float_eq_f64(eval("10 sub 3 sub 2"), 9.0);
        assert_float_eq_f64(eval("8 div 4 div 2"), 4.0);
        assert_float_eq_f64(eval("2 add 3 add 4"), 9.0);
    }

    #[test]
    fn test_parentheses() {
        assert_float_eq_f64(eval("((((7))))"), 7.0);
        assert_float_eq_f64(eval("(2 add 3) mul (4 sub 2)"), 10.0);
        assert_float_eq_f64(eval("( 1 add ( 2 mul ( 3 add 4 ) ) )"), 15.0);
    }

    #[test]
    fn test_whitespace_and_fused_words() {
        assert_float_eq_f64(eval("   1 add 2   "), 3.0);
        assert_float_eq_f64(eval("1add2"), 3.0);
        assert_float_eq_f64(eval("(1add2)mul3"), 9.0);
    }

    #[test]
    fn test_negative_literals() {
        assert_float_eq_f64(eval("-5 add 3"), -2.0);
        assert_float_eq_f64(eval("3 add -5"), -2.0);
        assert_float_eq_f64(eval("-2 mul -3"), 6.0);
        assert!(matches!(parse_err("-"), ParseError::MalformedLiteral(_)));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(parse_err("1 xor 2"), ParseError::UnknownOperator("xor".to_string()));
        assert_eq!(parse_err("1 @ 2"), ParseError::UnexpectedCharacter('@'));
        assert_eq!(parse_err("(1 add 2"), ParseError::UnbalancedParentheses);
        assert_eq!(parse_err("(1 xor 2)"), ParseError::UnknownOperator("xor".to_string()));
        assert_eq!(parse_err("1 add"), ParseError::UnexpectedEnd);
        assert_eq!(parse_err(""), ParseError::UnexpectedEnd);
        assert_eq!(parse_err("   "), ParseError::UnexpectedEnd);
    }

    #[test]
    fn test_trailing_content_is_an_error() {
        assert_eq!(parse_err("1 add 2 ) 3"), ParseError::UnbalancedParentheses);
        assert_eq!(parse_err("1 add 2 5"), ParseError::UnexpectedCharacter('5'));
        assert_eq!(parse_err("1 add 2 oops"), ParseError::UnknownOperator("oops".to_string()));
    }
}
