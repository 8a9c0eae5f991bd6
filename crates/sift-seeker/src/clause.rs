//! Clause types for query predicates.
//!
//! A [`Clause`] is a single column comparison. Rendering it through a
//! [`Quoter`] produces the predicate string that goes into the WHERE clause.

use crate::dialect::Quoter;

/// A single column comparison.
///
/// # Example
///
/// ```
/// use sift_seeker::{Clause, Dialect};
///
/// let clause = Clause::flag("a.published", true);
/// assert_eq!(clause.render(&Dialect::Ansi), r#""a"."published" = 1"#);
///
/// let clause = Clause::like("a.title", "%foo%");
/// assert_eq!(clause.render(&Dialect::Ansi), r#""a"."title" LIKE '%foo%'"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// The column to compare, optionally table-qualified.
    pub column: String,
    /// The comparison and its operand.
    pub value: ClauseValue,
}

/// Comparison operand of a [`Clause`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseValue {
    /// `column = n`.
    Equals(i64),
    /// `column LIKE 'pattern'`. The pattern is already escaped for the
    /// target dialect.
    Like(String),
}

impl Clause {
    /// Creates an integer equality clause.
    pub fn equals(column: impl Into<String>, value: i64) -> Self {
        Clause {
            column: column.into(),
            value: ClauseValue::Equals(value),
        }
    }

    /// Creates a boolean clause, rendered as `= 1` or `= 0`.
    pub fn flag(column: impl Into<String>, value: bool) -> Self {
        Clause::equals(column, i64::from(value))
    }

    /// Creates a `LIKE` clause from an escaped pattern.
    pub fn like(column: impl Into<String>, escaped_pattern: impl Into<String>) -> Self {
        Clause {
            column: column.into(),
            value: ClauseValue::Like(escaped_pattern.into()),
        }
    }

    /// Renders the clause as a SQL predicate.
    pub fn render(&self, quoter: &dyn Quoter) -> String {
        let column = quoter.qn(&self.column);
        match &self.value {
            ClauseValue::Equals(n) => format!("{column} = {n}"),
            ClauseValue::Like(pattern) => {
                format!("{column} LIKE {}", quoter.quote_escaped(pattern))
            }
        }
    }
}

/// Joins predicates with `OR` inside parentheses.
///
/// Returns `None` when there is nothing to join, so that an empty group adds
/// no WHERE clause at all.
pub fn any_of(predicates: &[String]) -> Option<String> {
    if predicates.is_empty() {
        None
    } else {
        Some(format!("({})", predicates.join(" OR ")))
    }
}
