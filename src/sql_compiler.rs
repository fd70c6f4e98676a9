//! SQL rendering: converts a parsed [`Node`] tree into a SQL-style
//! predicate string.
//!
//! Values are emitted verbatim (no quoting, no parameter binding); the
//! caller owns escaping and parameterization of the resulting fragment.

use crate::ast::{LogicalOp, Node};
use crate::token::ComparisonOp;
use std::collections::HashMap;

/// Renders a node tree as a SQL predicate, optionally translating
/// selectors to backend column names through a mapping.
#[derive(Debug, Clone, Default)]
pub struct SqlRenderer {
    /// Maps selector names to column names; unmapped selectors pass
    /// through unchanged.
    mapping: HashMap<String, String>,
}

impl SqlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapping(mapping: HashMap<String, String>) -> Self {
        Self { mapping }
    }

    /// The column name a selector renders as.
    fn column_for<'a>(&'a self, selector: &'a str) -> &'a str {
        self.mapping.get(selector).map(String::as_str).unwrap_or(selector)
    }

    /// Render the tree rooted at `node` as a SQL predicate string.
    pub fn render(&self, node: &Node) -> String {
        match node {
            Node::Logical { op, operands } => self.render_logical(*op, operands),
            Node::Not(operand) => format!("NOT ({})", self.render(operand)),
            Node::Comparison {
                selector,
                op,
                value,
            } => self.render_comparison(selector, *op, value),
        }
    }

    fn render_logical(&self, op: LogicalOp, operands: &[Node]) -> String {
        let rendered: Vec<String> = operands
            .iter()
            .map(|operand| {
                // Only a nested logical chain needs brackets to survive
                // mixed AND/OR precedence; a NOT operand brings its own
                // and a comparison needs none.
                if matches!(operand, Node::Logical { .. }) {
                    format!("({})", self.render(operand))
                } else {
                    self.render(operand)
                }
            })
            .collect();
        rendered.join(&format!(" {} ", op.name()))
    }

    fn render_comparison(&self, selector: &str, op: ComparisonOp, value: &str) -> String {
        let column = self.column_for(selector);
        match op {
            ComparisonOp::Eq => {
                if value.contains('*') {
                    format!("{} LIKE {}", column, value.replace('*', "%"))
                } else {
                    format!("{} = {}", column, value)
                }
            }
            ComparisonOp::Ne => {
                if value.contains('*') {
                    format!("{} NOT LIKE {}", column, value.replace('*', "%"))
                } else {
                    format!("{} <> {}", column, value)
                }
            }
            ComparisonOp::Lt => format!("{} < {}", column, value),
            ComparisonOp::Le => format!("{} <= {}", column, value),
            ComparisonOp::Gt => format!("{} > {}", column, value),
            ComparisonOp::Ge => format!("{} >= {}", column, value),
            // List values arrive pre-parenthesized in the raw value and
            // pass through verbatim.
            ComparisonOp::In => format!("{} IN {}", column, value),
            ComparisonOp::Out => format!("{} NOT IN {}", column, value),
        }
    }
}

impl Node {
    /// Render this tree as a SQL predicate string with selectors emitted
    /// as-is. See [`SqlRenderer`] for mapped rendering.
    pub fn render_sql(&self) -> String {
        SqlRenderer::new().render(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn render(expression: &str) -> String {
        parse(expression).unwrap().render_sql()
    }

    // Mirrors the expression/SQL table the library has always been
    // verified against.
    #[test]
    fn test_sql_rendering_table() {
        let cases = [
            ("!(sel1==arg1)", "NOT (sel1 = arg1)"),
            ("sel1=out=(arg1,arg2)", "sel1 NOT IN (arg1,arg2)"),
            (";,;,((sel1==arg1))", "sel1 = arg1"),
            (",,sel1==*arg1*", "sel1 LIKE %arg1%"),
            ("sel1==arg1;sel2=ne=arg3", "sel1 = arg1 AND sel2 <> arg3"),
            (
                "(sel1==arg1,sel2=le=arg2);(sel3=ge=arg3)",
                "(sel1 = arg1 OR sel2 <= arg2) AND sel3 >= arg3",
            ),
            (
                "sel1==*arg1*,sel2=ne=arg2*",
                "sel1 LIKE %arg1% OR sel2 NOT LIKE arg2%",
            ),
            (
                "(sel1==arg1,sel2=lt=arg2);sel3=gt=arg3",
                "(sel1 = arg1 OR sel2 < arg2) AND sel3 > arg3",
            ),
            (
                "(sel1==arg1;sel2=ne=arg2);(sel3=le=arg3,sel4=out=(1,2,3),sel5=ge=arg3)",
                "(sel1 = arg1 AND sel2 <> arg2) AND (sel3 <= arg3 OR sel4 NOT IN (1,2,3) OR sel5 >= arg3)",
            ),
        ];
        for (expression, expected) in cases {
            assert_eq!(render(expression), expected, "input: {expression}");
        }
    }

    #[test]
    fn test_wildcard_mapping() {
        assert_eq!(render("sel==*x*"), "sel LIKE %x%");
        assert_eq!(render("sel==x"), "sel = x");
        assert_eq!(render("sel=ne=x*"), "sel NOT LIKE x%");
        assert_eq!(render("sel=ne=x"), "sel <> x");
    }

    #[test]
    fn test_ordering_operators_ignore_wildcards() {
        // Only EQ/NE get LIKE treatment; ordering comparisons pass the
        // value through untouched.
        assert_eq!(render("sel=gt=x*"), "sel > x*");
        assert_eq!(render("sel=le=*x"), "sel <= *x");
    }

    #[test]
    fn test_grouping_minimality() {
        // Brackets appear only around nested logical chains, never around
        // comparison or NOT operands.
        assert_eq!(
            render("(a==1,b==2);c==3"),
            "(a = 1 OR b = 2) AND c = 3"
        );
        assert_eq!(
            render("!(a==1);b==2"),
            "NOT (a = 1) AND b = 2"
        );
    }

    #[test]
    fn test_membership_passthrough() {
        assert_eq!(render("a=in=(1,2,3)"), "a IN (1,2,3)");
        assert_eq!(render("a=out=(1,2,3)"), "a NOT IN (1,2,3)");
    }

    #[test]
    fn test_selector_mapping() {
        let mut mapping = HashMap::new();
        mapping.insert("sel1".to_string(), "t.first_column".to_string());
        let renderer = SqlRenderer::with_mapping(mapping);

        let node = parse("sel1==arg1;sel2=ne=arg2").unwrap();
        assert_eq!(
            renderer.render(&node),
            "t.first_column = arg1 AND sel2 <> arg2"
        );
    }

    #[test]
    fn test_unmapped_renderer_matches_render_sql() {
        let node = parse("(a==1,b==2);c=in=(x,y)").unwrap();
        assert_eq!(SqlRenderer::new().render(&node), node.render_sql());
    }
}
