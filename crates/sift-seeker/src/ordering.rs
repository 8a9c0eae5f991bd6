//! Ordering types for the list query.
//!
//! Provides [`Dir`] for sort direction and [`OrderBy`] for a single
//! `ORDER BY` term.

use crate::dialect::Quoter;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Parses a direction, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything other than `asc` or `desc`.
    pub fn parse(text: &str) -> Option<Dir> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("asc") {
            Some(Dir::Asc)
        } else if text.eq_ignore_ascii_case("desc") {
            Some(Dir::Desc)
        } else {
            None
        }
    }

    /// Returns the SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            Dir::Asc => "ASC",
            Dir::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_sql())
    }
}

/// A single ordering term: a column and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The column to sort by, optionally table-qualified.
    pub column: String,
    /// The sort direction.
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given column.
    pub fn asc(column: impl Into<String>) -> Self {
        OrderBy::new(column, Dir::Asc)
    }

    /// Creates a new descending ordering for the given column.
    pub fn desc(column: impl Into<String>) -> Self {
        OrderBy::new(column, Dir::Desc)
    }

    /// Creates a new ordering with the given direction.
    pub fn new(column: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            column: column.into(),
            dir,
        }
    }

    /// Renders the term, quoting the column.
    pub fn render(&self, quoter: &dyn Quoter) -> String {
        format!("{} {}", quoter.qn(&self.column), self.dir.as_sql())
    }
}
