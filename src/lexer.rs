//! Character-level scanning for the filter language.
//!
//! Three scans live here, all single-pass over the raw expression text:
//!
//! - [`scan_comparison`]: matches `selector operator value` at the start
//!   of a leaf fragment.
//! - [`split_fragments`]: splits an expression on a connective character,
//!   honoring bracket nesting.
//! - [`classify`]: decides which connective (if any) governs an
//!   expression at its outermost level, and validates bracket balance.

use crate::parser::ParseError;
use crate::token::{is_selector_char, ComparisonOp};

/// The outcome of a [`classify`] scan: which connectives occur at
/// bracket-nesting level 0. The markers are not mutually exclusive; the
/// parser consumes them in strict OR > AND > NOT priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub has_or: bool,
    pub has_and: bool,
    pub has_not: bool,
}

/// Match a `selector operator` prefix at the start of a leaf fragment.
///
/// The selector is a maximal run of selector characters; the operator is
/// matched longest-alternative-first and case-insensitively. Returns the
/// selector, the operator, and the raw remainder as the value. The value
/// may be empty and is otherwise opaque: it may carry literal parentheses
/// and commas (list values for `=in=`/`=out=`) or `*` wildcard markers.
pub(crate) fn scan_comparison(text: &str) -> Result<(&str, ComparisonOp, &str), ParseError> {
    let selector_end = text
        .find(|c: char| !is_selector_char(c))
        .unwrap_or(text.len());
    if selector_end == 0 {
        return Err(ParseError::NotAComparison {
            text: text.to_string(),
        });
    }

    let rest = &text[selector_end..];
    for op in ComparisonOp::LONGEST_FIRST {
        let token = op.token();
        // get() avoids slicing mid-character when the remainder holds
        // multi-byte text shorter than the token.
        if let Some(prefix) = rest.get(..token.len()) {
            if prefix.eq_ignore_ascii_case(token) {
                let selector = &text[..selector_end];
                let value = &rest[token.len()..];
                return Ok((selector, op, value));
            }
        }
    }

    Err(ParseError::NotAComparison {
        text: text.to_string(),
    })
}

/// Split `text` on `delimiter`, counting occurrences only at bracket
/// nesting level 0.
///
/// Fragments of length 0 or 1 are silently dropped. This tolerates stray
/// leading or doubled delimiters (`",,a==b"` yields one fragment), but it
/// also discards a genuine single-character fragment; the behavior is
/// kept as-is for compatibility with existing filter inputs.
pub(crate) fn split_fragments(text: &str, delimiter: char) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut level: i32 = 0;
    let mut last = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' => level += 1,
            ')' => level -= 1,
            _ => {}
        }
        if level == 0 && c == delimiter {
            let fragment = &text[last..i];
            if fragment.len() > 1 {
                fragments.push(fragment);
            }
            last = i + c.len_utf8();
        }
    }

    let tail = &text[last..];
    if tail.len() > 1 {
        fragments.push(tail);
    }
    fragments
}

/// Scan `expr` once, marking which connectives occur at bracket-nesting
/// level 0, and validate bracket balance along the way.
///
/// A `)` that drives the nesting level negative fails immediately with
/// the 0-based byte offset of the offending bracket; unclosed `(` at the
/// end of the scan fails with the whole expression.
pub(crate) fn classify(expr: &str) -> Result<Classification, ParseError> {
    let mut class = Classification::default();
    let mut level: i32 = 0;

    for (i, c) in expr.char_indices() {
        match c {
            '(' => level += 1,
            ')' => {
                level -= 1;
                if level < 0 {
                    return Err(ParseError::UnbalancedClosingBracket { position: i });
                }
            }
            _ => {}
        }
        if level == 0 {
            match c {
                ',' => class.has_or = true,
                ';' => class.has_and = true,
                '!' => class.has_not = true,
                _ => {}
            }
        }
    }

    if level > 0 {
        return Err(ParseError::UnbalancedOpeningBracket {
            expression: expr.to_string(),
        });
    }
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_simple_comparison() {
        let (selector, op, value) = scan_comparison("status==open").unwrap();
        assert_eq!(selector, "status");
        assert_eq!(op, ComparisonOp::Eq);
        assert_eq!(value, "open");
    }

    #[test]
    fn test_scan_all_operators() {
        let cases = [
            ("a==1", ComparisonOp::Eq, "1"),
            ("a=ne=1", ComparisonOp::Ne, "1"),
            ("a=lt=1", ComparisonOp::Lt, "1"),
            ("a=le=1", ComparisonOp::Le, "1"),
            ("a=gt=1", ComparisonOp::Gt, "1"),
            ("a=ge=1", ComparisonOp::Ge, "1"),
            ("a=in=(1,2)", ComparisonOp::In, "(1,2)"),
            ("a=out=(1,2)", ComparisonOp::Out, "(1,2)"),
        ];
        for (input, expected_op, expected_value) in cases {
            let (selector, op, value) = scan_comparison(input).unwrap();
            assert_eq!(selector, "a", "input: {input}");
            assert_eq!(op, expected_op, "input: {input}");
            assert_eq!(value, expected_value, "input: {input}");
        }
    }

    #[test]
    fn test_scan_operator_case_insensitive() {
        let (_, op, value) = scan_comparison("a=NE=x").unwrap();
        assert_eq!(op, ComparisonOp::Ne);
        assert_eq!(value, "x");

        let (_, op, _) = scan_comparison("a=OUT=(1)").unwrap();
        assert_eq!(op, ComparisonOp::Out);
    }

    #[test]
    fn test_scan_selector_character_class() {
        let (selector, _, _) = scan_comparison("a-b.c_d~e==x").unwrap();
        assert_eq!(selector, "a-b.c_d~e");
    }

    #[test]
    fn test_scan_empty_value_is_accepted() {
        let (selector, op, value) = scan_comparison("a==").unwrap();
        assert_eq!(selector, "a");
        assert_eq!(op, ComparisonOp::Eq);
        assert_eq!(value, "");
    }

    #[test]
    fn test_scan_rejects_non_comparison() {
        assert!(matches!(
            scan_comparison("a%%b"),
            Err(ParseError::NotAComparison { .. })
        ));
        assert!(matches!(
            scan_comparison("==x"),
            Err(ParseError::NotAComparison { .. })
        ));
        assert!(matches!(
            scan_comparison(""),
            Err(ParseError::NotAComparison { .. })
        ));
    }

    #[test]
    fn test_split_at_top_level_only() {
        assert_eq!(
            split_fragments("a==1,b==2,(c==3,d==4)", ','),
            vec!["a==1", "b==2", "(c==3,d==4)"]
        );
    }

    #[test]
    fn test_split_no_delimiter_yields_whole_string() {
        assert_eq!(split_fragments("a==1", ';'), vec!["a==1"]);
    }

    #[test]
    fn test_split_drops_short_fragments() {
        // Leading and doubled delimiters produce fragments of length 0
        // which are dropped. Documented quirk: a single-character
        // fragment like "a" is dropped too.
        assert_eq!(split_fragments(",,a==1", ','), vec!["a==1"]);
        assert_eq!(split_fragments("a,b==2", ','), vec!["b==2"]);
        assert_eq!(split_fragments(",,", ','), Vec::<&str>::new());
    }

    #[test]
    fn test_classify_markers() {
        let class = classify("a==1,b==2").unwrap();
        assert!(class.has_or && !class.has_and && !class.has_not);

        let class = classify("a==1;b==2").unwrap();
        assert!(!class.has_or && class.has_and && !class.has_not);

        let class = classify("!(a==1)").unwrap();
        assert!(!class.has_or && !class.has_and && class.has_not);
    }

    #[test]
    fn test_classify_markers_not_exclusive() {
        let class = classify("a==1,b==2;!(c==3)").unwrap();
        assert!(class.has_or && class.has_and && class.has_not);
    }

    #[test]
    fn test_classify_ignores_nested_connectives() {
        let class = classify("(a==1,b==2)").unwrap();
        assert_eq!(class, Classification::default());
    }

    #[test]
    fn test_classify_unbalanced_closing_bracket() {
        assert_eq!(
            classify("a==b)"),
            Err(ParseError::UnbalancedClosingBracket { position: 4 })
        );
        assert_eq!(
            classify(")"),
            Err(ParseError::UnbalancedClosingBracket { position: 0 })
        );
    }

    #[test]
    fn test_classify_unbalanced_opening_bracket() {
        assert_eq!(
            classify("(a==b"),
            Err(ParseError::UnbalancedOpeningBracket {
                expression: "(a==b".to_string()
            })
        );
    }
}
