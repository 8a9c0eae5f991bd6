//! Execution backend traits.
//!
//! The seeker builds queries; a [`Backend`] runs them. Implementations wrap
//! a database connection, render the [`SelectQuery`] (usually with
//! [`SelectQuery::to_sql`] and [`Dialect::paginate`](crate::Dialect::paginate)),
//! and convert driver rows into [`Row`]s.
//!
//! Driver failures are returned as [`SeekerError::Backend`](crate::SeekerError::Backend)
//! and reach the caller unchanged.

use std::collections::BTreeMap;

use sift_criteria::Value;

use crate::dialect::Quoter;
use crate::error::Result;
use crate::query::SelectQuery;

/// A materialized result row, keyed by column name.
pub type Row = BTreeMap<String, Value>;

/// Offset/limit window applied to a row load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page {
    /// Rows to skip.
    pub offset: u64,
    /// Maximum rows to return. Never zero.
    pub limit: u64,
}

impl Page {
    pub fn new(offset: u64, limit: u64) -> Self {
        Page { offset, limit }
    }
}

/// Executes queries built by the seeker.
///
/// # Example
///
/// ```
/// use sift_criteria::Value;
/// use sift_seeker::{Backend, Dialect, Page, Quoter, Result, Row, SelectQuery};
///
/// struct Empty;
///
/// impl Quoter for Empty {
///     fn qn(&self, name: &str) -> String {
///         Dialect::Sqlite.qn(name)
///     }
///
///     fn escape(&self, text: &str) -> String {
///         Dialect::Sqlite.escape(text)
///     }
/// }
///
/// impl Backend for Empty {
///     fn load_scalar(&mut self, _query: &SelectQuery) -> Result<Value> {
///         Ok(Value::from(0))
///     }
///
///     fn load_rows(&mut self, _query: &SelectQuery, _page: Option<Page>) -> Result<Vec<Row>> {
///         Ok(Vec::new())
///     }
/// }
/// ```
pub trait Backend: Quoter {
    /// Runs the query and returns the first column of the first row.
    ///
    /// An empty result should be reported as [`Value::Null`].
    fn load_scalar(&mut self, query: &SelectQuery) -> Result<Value>;

    /// Runs the query and returns its rows, restricted to `page` if given.
    fn load_rows(&mut self, query: &SelectQuery, page: Option<Page>) -> Result<Vec<Row>>;
}

impl<B: Backend + ?Sized> Backend for &mut B {
    fn load_scalar(&mut self, query: &SelectQuery) -> Result<Value> {
        (**self).load_scalar(query)
    }

    fn load_rows(&mut self, query: &SelectQuery, page: Option<Page>) -> Result<Vec<Row>> {
        (**self).load_rows(query, page)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn load_scalar(&mut self, query: &SelectQuery) -> Result<Value> {
        (**self).load_scalar(query)
    }

    fn load_rows(&mut self, query: &SelectQuery, page: Option<Page>) -> Result<Vec<Row>> {
        (**self).load_rows(query, page)
    }
}

impl<Q: Quoter + ?Sized> Quoter for Box<Q> {
    fn qn(&self, name: &str) -> String {
        (**self).qn(name)
    }

    fn escape(&self, text: &str) -> String {
        (**self).escape(text)
    }

    fn quote_escaped(&self, escaped: &str) -> String {
        (**self).quote_escaped(escaped)
    }
}

/// Inserts single records, used to persist search logs.
pub trait RecordWriter {
    /// Inserts `record` into `table`.
    fn insert(&mut self, table: &str, record: &Row) -> Result<()>;
}

impl<W: RecordWriter + ?Sized> RecordWriter for &mut W {
    fn insert(&mut self, table: &str, record: &Row) -> Result<()> {
        (**self).insert(table, record)
    }
}
