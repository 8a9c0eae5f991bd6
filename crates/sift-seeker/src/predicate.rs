//! Field predicates built from criteria.
//!
//! [`Predicates`] turns one criterion into one WHERE fragment. The criterion
//! key is the column name. Every builder follows the same skip rules:
//!
//! 1. the table has no such column → no predicate
//! 2. the criterion is absent or null → no predicate
//! 3. the coerced value is "empty" (`false`, `0`, `""`) and `force` is off →
//!    no predicate
//!
//! Otherwise a [`Clause`] is built and rendered through the backend's
//! [`Quoter`].

use sift_criteria::{Criteria, Value};
use tracing::trace;

use crate::clause::Clause;
use crate::dialect::Quoter;
use crate::mode::MatchMode;
use crate::table::TableDescriptor;

/// Predicate builder bound to one table, one criteria store and one quoter.
///
/// # Example
///
/// ```
/// use sift_criteria::Criteria;
/// use sift_seeker::{Dialect, Predicates, Table};
///
/// let table = Table::new("items", "id").fields(["title", "catid"]);
/// let criteria = Criteria::from([("title", "red shoes"), ("catid", "0")]);
/// let predicates = Predicates::new(&table, &criteria, &Dialect::Ansi);
///
/// assert_eq!(
///     predicates.text("title", "a.", false).as_deref(),
///     Some(r#""a"."title" LIKE '%red%shoes%'"#)
/// );
/// assert_eq!(predicates.integer("catid", "a.", false), None);
/// assert_eq!(
///     predicates.integer("catid", "a.", true).as_deref(),
///     Some(r#""a"."catid" = 0"#)
/// );
/// ```
pub struct Predicates<'a> {
    table: &'a dyn TableDescriptor,
    criteria: &'a Criteria,
    quoter: &'a dyn Quoter,
}

impl<'a> Predicates<'a> {
    pub fn new(
        table: &'a dyn TableDescriptor,
        criteria: &'a Criteria,
        quoter: &'a dyn Quoter,
    ) -> Self {
        Predicates {
            table,
            criteria,
            quoter,
        }
    }

    /// Returns the criterion for a column, or `None` when the table has no
    /// such column or the criterion is absent or null.
    fn lookup(&self, field: &str) -> Option<&'a Value> {
        if !self.table.has_field(field) {
            trace!(field, table = self.table.name(), "no such column, predicate skipped");
            return None;
        }
        let value = self.criteria.value(field);
        if value.is_none() {
            trace!(field, "criterion absent or null, predicate skipped");
        }
        value
    }

    // ========================================================================
    // Clause builders
    // ========================================================================

    /// Builds `prefix.field = 1|0` from a boolean criterion.
    pub fn boolean_clause(&self, field: &str, prefix: &str, force: bool) -> Option<Clause> {
        let value = self.lookup(field)?.to_bool();
        if !force && !value {
            return None;
        }
        Some(Clause::flag(format!("{prefix}{field}"), value))
    }

    /// Builds `prefix.field = n` from an integer criterion.
    pub fn integer_clause(&self, field: &str, prefix: &str, force: bool) -> Option<Clause> {
        let value = self.lookup(field)?.to_int();
        if !force && value == 0 {
            return None;
        }
        Some(Clause::equals(format!("{prefix}{field}"), value))
    }

    /// Builds `prefix.field LIKE pattern` from a text criterion, using the
    /// `stype` criterion to pick the [`MatchMode`].
    pub fn text_clause(&self, field: &str, prefix: &str, force: bool) -> Option<Clause> {
        let text = self.lookup(field)?.to_text();
        if !force && text.is_empty() {
            return None;
        }

        let mode = self.match_mode();
        let escaped = self.quoter.escape(&text);
        Some(Clause::like(format!("{prefix}{field}"), mode.pattern(&escaped)))
    }

    /// The match mode selected by the `stype` criterion.
    pub fn match_mode(&self) -> MatchMode {
        let stype = self.criteria.get("stype", MatchMode::default().as_str());
        MatchMode::parse(&stype.to_text())
    }

    // ========================================================================
    // Rendered predicates
    // ========================================================================

    /// Renders [`Predicates::boolean_clause`].
    pub fn boolean(&self, field: &str, prefix: &str, force: bool) -> Option<String> {
        self.boolean_clause(field, prefix, force)
            .map(|clause| clause.render(self.quoter))
    }

    /// Renders [`Predicates::integer_clause`].
    pub fn integer(&self, field: &str, prefix: &str, force: bool) -> Option<String> {
        self.integer_clause(field, prefix, force)
            .map(|clause| clause.render(self.quoter))
    }

    /// Renders [`Predicates::text_clause`].
    pub fn text(&self, field: &str, prefix: &str, force: bool) -> Option<String> {
        self.text_clause(field, prefix, force)
            .map(|clause| clause.render(self.quoter))
    }
}
