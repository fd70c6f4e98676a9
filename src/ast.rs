//! The expression tree produced by the parser.

use crate::token::ComparisonOp;
use std::fmt;

/// A boolean connective joining sibling sub-expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn name(&self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

/// A node of the parsed filter expression.
///
/// The tree is immutable once built: each node exclusively owns its
/// children, equality is structural, and a constructed tree can be read
/// from any number of threads without synchronization.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A chain of two or more sub-expressions joined by one connective.
    /// The parser never builds this variant with fewer than two operands;
    /// a degenerate split collapses to the single operand instead.
    Logical { op: LogicalOp, operands: Vec<Node> },
    /// Logical negation of a single sub-expression.
    Not(Box<Node>),
    /// A leaf comparison. The value is the raw, unparsed remainder of the
    /// leaf text; for `=in=`/`=out=` it is expected to be a parenthesized
    /// literal list, and it may carry `*` wildcard markers.
    Comparison {
        selector: String,
        op: ComparisonOp,
        value: String,
    },
}

impl Node {
    /// Render the tree as a prefix-notation debug string, e.g.
    /// `AND(EQ(sel1,arg1),NEQ(sel2,arg2))`.
    pub fn render_debug(&self) -> String {
        match self {
            Node::Logical { op, operands } => {
                let children: Vec<String> =
                    operands.iter().map(Node::render_debug).collect();
                format!("{}({})", op.name(), children.join(","))
            }
            Node::Not(operand) => format!("NOT({})", operand.render_debug()),
            Node::Comparison {
                selector,
                op,
                value,
            } => format!("{}({},{})", op.debug_tag(), selector, value),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_debug())
    }
}
