//! Shared fixtures for integration tests.

#![allow(dead_code)]

use sift_criteria::Value;
use sift_seeker::{Backend, Dialect, Page, Quoter, RecordWriter, Result, Row, SelectQuery, Table};

/// A backend that records every query it is asked to run and answers with
/// canned results.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    pub dialect: Dialect,
    pub scalar: Value,
    pub rows: Vec<Row>,
    pub scalar_queries: Vec<SelectQuery>,
    pub row_queries: Vec<(SelectQuery, Option<Page>)>,
    pub inserts: Vec<(String, Row)>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend {
            dialect: Dialect::Sqlite,
            ..MemoryBackend::default()
        }
    }

    pub fn with_dialect(dialect: Dialect) -> Self {
        MemoryBackend {
            dialect,
            ..MemoryBackend::default()
        }
    }

    pub fn count_sql(&self) -> String {
        self.scalar_queries
            .last()
            .map(SelectQuery::to_sql)
            .unwrap_or_default()
    }

    pub fn list_sql(&self) -> String {
        self.row_queries
            .last()
            .map(|(query, _)| query.to_sql())
            .unwrap_or_default()
    }

    /// The list query as the dialect would paginate it.
    pub fn paged_list_sql(&self) -> String {
        match self.row_queries.last() {
            Some((query, Some(page))) => self.dialect.paginate(&query.to_sql(), *page),
            Some((query, None)) => query.to_sql(),
            None => String::new(),
        }
    }
}

impl Quoter for MemoryBackend {
    fn qn(&self, name: &str) -> String {
        self.dialect.qn(name)
    }

    fn escape(&self, text: &str) -> String {
        self.dialect.escape(text)
    }
}

impl Backend for MemoryBackend {
    fn load_scalar(&mut self, query: &SelectQuery) -> Result<Value> {
        self.scalar_queries.push(query.clone());
        Ok(self.scalar.clone())
    }

    fn load_rows(&mut self, query: &SelectQuery, page: Option<Page>) -> Result<Vec<Row>> {
        self.row_queries.push((query.clone(), page));
        Ok(self.rows.clone())
    }
}

impl RecordWriter for MemoryBackend {
    fn insert(&mut self, table: &str, record: &Row) -> Result<()> {
        self.inserts.push((table.to_string(), record.clone()));
        Ok(())
    }
}

/// A table with a title and publish state.
pub fn articles() -> Table {
    Table::new("articles", "id").fields(["title", "introtext", "catid", "published"])
}

/// A table with neither a title nor publish state.
pub fn tags() -> Table {
    Table::new("tags", "tag_id").field("label")
}

pub fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}
