//! filterql: a compact filter-query front end for APIs that accept
//! query-string filters and translate them into SQL predicate fragments.
//!
//! An expression is parsed into an immutable tree of [`Node`]s and can
//! then be rendered as a SQL-style predicate ([`Node::render_sql`]) or as
//! a prefix-notation debug string ([`Node::render_debug`]).
//!
//! ## Grammar
//!
//! ```text
//! expr       := or-expr
//! or-expr    := and-expr ( ',' and-expr )*
//! and-expr   := not-expr ( ';' not-expr )*
//! not-expr   := '!' not-expr | group
//! group      := '(' expr ')' | comparison
//! comparison := selector operator value
//! selector   := [A-Za-z0-9\-._~]+
//! operator   := '==' | '=ne=' | '=lt=' | '=le=' | '=gt=' | '=ge='
//!             | '=in=' | '=out='
//! value      := any remaining text (opaque)
//! ```
//!
//! OR binds loosest, AND tighter, NOT tighter still; grouping and
//! comparisons are tightest. Values are carried verbatim: no type
//! coercion, no schema validation, and no quoting or escaping of the
//! rendered SQL — parameterization is the caller's responsibility.
//!
//! ## Example
//!
//! ```
//! let sql = filterql::parse_and_render_sql("(a==1,b==2);c==3").unwrap();
//! assert_eq!(sql, "(a = 1 OR b = 2) AND c = 3");
//! ```

pub mod ast;
pub mod config;
pub mod lexer;
pub mod parser;
pub mod sql_compiler;
pub mod token;

pub use ast::{LogicalOp, Node};
pub use parser::{parse, ParseError, MAX_NESTING_DEPTH};
pub use sql_compiler::SqlRenderer;
pub use token::ComparisonOp;

use std::fmt;

/// A parse failure wrapped with the offending top-level expression, as
/// returned by [`parse_and_render_sql`]. The underlying [`ParseError`] is
/// preserved as the error source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterError {
    pub expression: String,
    pub source: ParseError,
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parsing expression '{}' failed: {}",
            self.expression, self.source
        )
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Parse a filter expression and render it as a SQL predicate in one
/// step. On failure the error carries both the top-level input and the
/// underlying cause.
pub fn parse_and_render_sql(expression: &str) -> Result<String, FilterError> {
    match parser::parse(expression) {
        Ok(node) => Ok(node.render_sql()),
        Err(source) => Err(FilterError {
            expression: expression.to_string(),
            source,
        }),
    }
}
