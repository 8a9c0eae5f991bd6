//! Accumulating SELECT query.
//!
//! [`SelectQuery`] collects the parts of a SELECT statement as already
//! rendered fragments and joins them in SQL order on demand. The seeker
//! owns one and clears it before building each of its two queries.

use std::fmt;

/// An accumulating SELECT statement.
///
/// Each part can be appended to independently. WHERE predicates are joined
/// with `AND`; every other part is comma-separated.
///
/// # Example
///
/// ```
/// use sift_seeker::SelectQuery;
///
/// let mut query = SelectQuery::new();
/// query
///     .select("a.*")
///     .from(r#""items" AS a"#)
///     .and_where(r#""a"."published" = 1"#)
///     .order(r#""a"."id" ASC"#);
///
/// assert_eq!(
///     query.to_sql(),
///     r#"SELECT a.* FROM "items" AS a WHERE "a"."published" = 1 ORDER BY "a"."id" ASC"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    select: Vec<String>,
    from: Vec<String>,
    wheres: Vec<String>,
    group: Vec<String>,
    order: Vec<String>,
}

impl SelectQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        SelectQuery::default()
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Adds a projected column or expression.
    pub fn select(&mut self, column: impl Into<String>) -> &mut Self {
        self.select.push(column.into());
        self
    }

    /// Adds a source table expression.
    pub fn from(&mut self, source: impl Into<String>) -> &mut Self {
        self.from.push(source.into());
        self
    }

    /// Adds a predicate, combined with the others using `AND`.
    pub fn and_where(&mut self, predicate: impl Into<String>) -> &mut Self {
        self.wheres.push(predicate.into());
        self
    }

    /// Adds a GROUP BY term.
    pub fn group(&mut self, column: impl Into<String>) -> &mut Self {
        self.group.push(column.into());
        self
    }

    /// Adds an ORDER BY term.
    pub fn order(&mut self, term: impl Into<String>) -> &mut Self {
        self.order.push(term.into());
        self
    }

    /// Removes every part.
    pub fn clear(&mut self) {
        self.select.clear();
        self.from.clear();
        self.wheres.clear();
        self.group.clear();
        self.order.clear();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns `true` if no part has been set.
    pub fn is_empty(&self) -> bool {
        self.select.is_empty()
            && self.from.is_empty()
            && self.wheres.is_empty()
            && self.group.is_empty()
            && self.order.is_empty()
    }

    pub fn selects(&self) -> &[String] {
        &self.select
    }

    pub fn sources(&self) -> &[String] {
        &self.from
    }

    /// Returns the WHERE predicates in insertion order.
    pub fn wheres(&self) -> &[String] {
        &self.wheres
    }

    pub fn groups(&self) -> &[String] {
        &self.group
    }

    pub fn orders(&self) -> &[String] {
        &self.order
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Renders the statement.
    ///
    /// An empty projection renders as `*`. Empty clauses are omitted.
    pub fn to_sql(&self) -> String {
        let mut sql = String::from("SELECT ");
        if self.select.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.select.join(", "));
        }

        if !self.from.is_empty() {
            sql.push_str(" FROM ");
            sql.push_str(&self.from.join(", "));
        }
        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.wheres.join(" AND "));
        }
        if !self.group.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group.join(", "));
        }
        if !self.order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order.join(", "));
        }

        sql
    }
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
