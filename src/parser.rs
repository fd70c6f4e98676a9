//! The recursive parser for filter expressions.
//!
//! ## Parse flow
//!
//! ```text
//! parse(expr)
//!   └─ classify(expr)            single scan, validates bracket balance
//!        ├─ has ','  at level 0 → split on ',' → parse each fragment → OR node
//!        ├─ has ';'  at level 0 → split on ';' → parse each fragment → AND node
//!        ├─ has '!'  at level 0 → expr must start with '!' → parse rest → NOT node
//!        ├─ starts with '('     → strip outermost pair → parse inner
//!        └─ otherwise           → scan_comparison → Comparison leaf
//! ```
//!
//! ## Precedence (loosest-binding first)
//!
//! 1. **OR** `,`
//! 2. **AND** `;`
//! 3. **NOT** `!`
//! 4. **Grouping** `(expression)` and comparison leaves
//!
//! Precedence is resolved structurally, once per recursion level: every
//! recursive call re-runs the classifier on its own sub-expression rather
//! than consuming a global token stream.
//!
//! ## Collapse rule
//!
//! When a connective split yields exactly one non-degenerate fragment
//! (e.g. `",,a==1"`), the fragment's node is returned directly; a logical
//! node never wraps a single operand. A split yielding no fragment at all
//! is rejected as an empty expression.

use crate::ast::{LogicalOp, Node};
use crate::lexer::{classify, scan_comparison, split_fragments};
use std::fmt;

/// Upper bound on recursion depth, so adversarial input such as a long
/// run of nested brackets fails cleanly instead of exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 64;

/// A terminal parse failure. Nothing is retried or recovered; the first
/// failure bubbles to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `)` with no matching open bracket, at the given 0-based byte
    /// offset within the scanned sub-expression.
    UnbalancedClosingBracket { position: usize },
    /// End of input reached with open brackets unclosed.
    UnbalancedOpeningBracket { expression: String },
    /// A leaf fragment does not start with `selector operator`.
    NotAComparison { text: String },
    /// A top-level `!` that is not the first character of its
    /// sub-expression; negation is only valid in prefix position.
    MisplacedNegation { text: String },
    /// A connective split left no parseable fragment.
    EmptyExpression { text: String },
    /// Recursion exceeded [`MAX_NESTING_DEPTH`].
    DepthLimitExceeded { limit: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnbalancedClosingBracket { position } => {
                write!(f, "unexpected closing bracket at position {}", position)
            }
            ParseError::UnbalancedOpeningBracket { expression } => {
                write!(f, "unexpected opening bracket in expression '{}'", expression)
            }
            ParseError::NotAComparison { text } => {
                write!(f, "not a comparison expression: '{}'", text)
            }
            ParseError::MisplacedNegation { text } => {
                write!(f, "negation must prefix its expression: '{}'", text)
            }
            ParseError::EmptyExpression { text } => {
                write!(f, "no parseable fragment in expression: '{}'", text)
            }
            ParseError::DepthLimitExceeded { limit } => {
                write!(f, "expression nesting exceeds the maximum depth of {}", limit)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a filter expression into its [`Node`] tree.
pub fn parse(expression: &str) -> Result<Node, ParseError> {
    parse_at(expression, 0)
}

fn parse_at(expr: &str, depth: usize) -> Result<Node, ParseError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ParseError::DepthLimitExceeded {
            limit: MAX_NESTING_DEPTH,
        });
    }

    let class = classify(expr)?;

    if class.has_or {
        parse_logical(expr, LogicalOp::Or, ',', depth)
    } else if class.has_and {
        parse_logical(expr, LogicalOp::And, ';', depth)
    } else if class.has_not {
        // The classifier only says a top-level '!' exists somewhere; it is
        // a prefix operator, so anywhere but the first character is
        // malformed input.
        let Some(rest) = expr.strip_prefix('!') else {
            return Err(ParseError::MisplacedNegation {
                text: expr.to_string(),
            });
        };
        let operand = parse_at(rest, depth + 1)?;
        Ok(Node::Not(Box::new(operand)))
    } else if expr.starts_with('(') && expr.ends_with(')') {
        // Balance was validated by classify and no connective occurs at
        // level 0, so the leading '(' pairs with the final ')'.
        parse_at(&expr[1..expr.len() - 1], depth + 1)
    } else {
        let (selector, op, value) = scan_comparison(expr)?;
        Ok(Node::Comparison {
            selector: selector.to_string(),
            op,
            value: value.to_string(),
        })
    }
}

fn parse_logical(
    expr: &str,
    op: LogicalOp,
    delimiter: char,
    depth: usize,
) -> Result<Node, ParseError> {
    let mut operands = Vec::new();
    for fragment in split_fragments(expr, delimiter) {
        operands.push(parse_at(fragment, depth + 1)?);
    }
    match operands.len() {
        0 => Err(ParseError::EmptyExpression {
            text: expr.to_string(),
        }),
        // All but one fragment was degenerate; no connective is left to
        // represent, so the sole operand stands on its own.
        1 => Ok(operands.into_iter().next().unwrap()),
        _ => Ok(Node::Logical { op, operands }),
    }
}
