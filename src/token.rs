//! The comparison operator tokens of the filter language.

/// A comparison operator, the fixed vocabulary of a leaf expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,  // ==
    Ne,  // =ne=
    Lt,  // =lt=
    Le,  // =le=
    Gt,  // =gt=
    Ge,  // =ge=
    In,  // =in=
    Out, // =out=
}

impl ComparisonOp {
    /// All operators, longest token first so that a shorter token never
    /// shadows a longer one during prefix matching.
    pub const LONGEST_FIRST: [ComparisonOp; 8] = [
        ComparisonOp::Out,
        ComparisonOp::Ne,
        ComparisonOp::Lt,
        ComparisonOp::Le,
        ComparisonOp::Gt,
        ComparisonOp::Ge,
        ComparisonOp::In,
        ComparisonOp::Eq,
    ];

    /// The textual token as it appears in a filter expression.
    pub fn token(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "==",
            ComparisonOp::Ne => "=ne=",
            ComparisonOp::Lt => "=lt=",
            ComparisonOp::Le => "=le=",
            ComparisonOp::Gt => "=gt=",
            ComparisonOp::Ge => "=ge=",
            ComparisonOp::In => "=in=",
            ComparisonOp::Out => "=out=",
        }
    }

    /// The tag used by the prefix-notation debug rendering.
    pub fn debug_tag(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "EQ",
            ComparisonOp::Ne => "NEQ",
            ComparisonOp::Lt => "LT",
            ComparisonOp::Le => "LE",
            ComparisonOp::Gt => "GT",
            ComparisonOp::Ge => "GE",
            ComparisonOp::In => "IN",
            ComparisonOp::Out => "OUT",
        }
    }
}

/// Selector characters: letters, digits, `-`, `.`, `_` and `~`.
pub(crate) fn is_selector_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}
