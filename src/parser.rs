use crate::expression::ExprNode;
use crate::operators::{find_operator, Operator};
use crate::result::{ParseError, ParseResult};
use lazy_static::lazy_static;
use num::Float;
use regex::Regex;

/// Read position within one line of input. The parsing functions advance the
/// position; callers snapshot and restore it to backtrack.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Cursor<'a> {
        Cursor { text, pos: 0 }
    }

    /// Next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Unconsumed rest of the input.
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Restores a position previously obtained from [`pos`](Cursor::pos).
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Consumes the next character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes `n` bytes; `n` must end on a character boundary.
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, |c| c.is_whitespace()) {
            self.bump();
        }
    }
}

lazy_static! {
    static ref RE_WORD: Regex = Regex::new(r"^[a-zA-Z]+").unwrap();
}

/// Maximal alphabetic word at the current position, if any.
pub fn peek_word<'t>(cur: &Cursor<'t>) -> Option<&'t str> {
    RE_WORD.find(cur.rest()).map(|m| m.as_str())
}

/// Converts the numeric literal at the current position into an operand leaf.
///
/// A literal is an optional `-` followed by a run of decimal digits and dots.
/// The digits before the first dot are the integer part, the digits between
/// the first and a possible second dot the fractional part. Further dots and
/// anything after them are consumed without affecting the value, as in
/// `1.2.3` scanning as the value `1.2`. Tolerating them keeps inputs like
/// `5.` working, the trailing-character check below catches real garbage.
pub fn parse_operand<'a, T: Float>(cur: &mut Cursor) -> ParseResult<ExprNode<'a, T>> {
    let negative = cur.peek() == Some('-');
    if negative {
        cur.bump();
    }
    let rest = cur.rest();
    let n_num_chars = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .count();
    if n_num_chars == 0 {
        return Err(ParseError::MalformedLiteral(rest.to_string()));
    }
    let num_str = &rest[0..n_num_chars];
    cur.advance(n_num_chars);

    // A literal directly followed by an opening parenthesis that never closes
    // is reported as the parenthesis problem it is. Lookahead only, the
    // parenthesis stays unconsumed.
    if cur.peek() == Some('(') && !cur.rest().contains(')') {
        return Err(ParseError::UnbalancedParentheses);
    }
    // After a literal only the end of the input, whitespace, a closing
    // parenthesis, or the first letter of an operator word may follow.
    match cur.peek() {
        None => {}
        Some(c) if c.is_whitespace() || c == ')' || c.is_ascii_alphabetic() => {}
        Some(_) => return Err(ParseError::MalformedLiteral(cur.rest().to_string())),
    }
    Ok(ExprNode::Num(literal_value(num_str, negative)))
}

/// Resolves the operator word at the current position against the registry.
///
/// If no alphabetic word starts at the position, the sentinel is returned and
/// nothing is consumed, so that the caller can tell the end of an expression
/// or a closing parenthesis apart from a genuine error. A word that misses
/// the registry is consumed in full and also yields the sentinel.
pub fn parse_operator<'a, T: Copy>(cur: &mut Cursor, ops: &[Operator<'a, T>]) -> Operator<'a, T> {
    cur.skip_whitespace();
    match peek_word(cur) {
        None => Operator::unknown(),
        Some(word) => {
            cur.advance(word.len());
            find_operator(word, ops)
        }
    }
}

fn literal_value<T: Float>(num_str: &str, negative: bool) -> T {
    let mut parts = num_str.split('.');
    let int_part = digits_value::<T>(parts.next().unwrap_or(""));
    let frac_str = parts.next().unwrap_or("");
    let ten = T::from(10).unwrap();
    let value = int_part + digits_value::<T>(frac_str) / ten.powi(frac_str.len() as i32);
    if negative {
        -value
    } else {
        value
    }
}

fn digits_value<T: Float>(digits: &str) -> T {
    let ten = T::from(10).unwrap();
    digits.chars().fold(T::zero(), |acc, c| {
        acc * ten + T::from(c.to_digit(10).unwrap()).unwrap()
    })
}

#[cfg(test)]
use crate::operators::{MakeOperators, WordOpsFactory};
#[cfg(test)]
use crate::util::assert_float_eq_f64;

#[cfg(test)]
fn operand_value(text: &str) -> ParseResult<f64> {
    let mut cur = Cursor::new(text);
    parse_operand(&mut cur).map(|node| match node {
        ExprNode::Num(n) => n,
        _ => unreachable!(),
    })
}

#[test]
fn test_parse_operand() {
    assert_float_eq_f64(operand_value("42").unwrap(), 42.0);
    assert_float_eq_f64(operand_value("-17 add 3").unwrap(), -17.0);
    assert_float_eq_f64(operand_value("23.414)").unwrap(), 23.414);
    assert_float_eq_f64(operand_value("4.").unwrap(), 4.0);
    assert_float_eq_f64(operand_value("-.5").unwrap(), -0.5);
    assert_float_eq_f64(operand_value("1.2.3").unwrap(), 1.2);
    assert_float_eq_f64(operand_value("0.125mul8").unwrap(), 0.125);
    assert!(operand_value("-").is_err());
    assert!(operand_value("- 5").is_err());
    assert_eq!(
        operand_value("5#"),
        Err(ParseError::MalformedLiteral("#".to_string()))
    );
    assert_eq!(operand_value("2(3"), Err(ParseError::UnbalancedParentheses));
    assert_eq!(
        operand_value("2(3)"),
        Err(ParseError::MalformedLiteral("(3)".to_string()))
    );
}

#[test]
fn test_parse_operator() {
    let ops = WordOpsFactory::<f64>::make();

    let mut cur = Cursor::new("  div 7");
    let op = parse_operator(&mut cur, &ops);
    assert_eq!(op.repr, "div");
    assert_eq!(cur.rest(), " 7");

    // no word means no consumption
    let mut cur = Cursor::new(") add 1");
    assert!(parse_operator(&mut cur, &ops).is_unknown());
    assert_eq!(cur.rest(), ") add 1");

    // an unknown word is consumed in full
    let mut cur = Cursor::new("divide 7");
    assert!(parse_operator(&mut cur, &ops).is_unknown());
    assert_eq!(cur.rest(), " 7");

    // lookup is case-sensitive
    let mut cur = Cursor::new("MOD 7");
    assert!(parse_operator(&mut cur, &ops).is_unknown());
}
