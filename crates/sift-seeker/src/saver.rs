//! Search log records.
//!
//! A [`SearchLog`] collects what a search was about (type, source, term,
//! filters and result count) and writes it as a single record through a
//! [`RecordWriter`]. Filters are stored as one JSON object column.

use std::collections::BTreeMap;

use sift_criteria::Value;
use tracing::debug;

use crate::backend::{RecordWriter, Row};
use crate::error::Result;

/// Table search logs are written to unless configured otherwise.
pub const DEFAULT_LOG_TABLE: &str = "search";

/// A search log record under construction.
///
/// Starts with `id_searchtype = 0`, `source = ""`, `term = ""`,
/// `filters = {}` and `nbResults = 0`.
///
/// # Example
///
/// ```
/// use sift_seeker::{RecordWriter, Result, Row, SearchLog};
///
/// #[derive(Default)]
/// struct Inserts(Vec<(String, Row)>);
///
/// impl RecordWriter for Inserts {
///     fn insert(&mut self, table: &str, record: &Row) -> Result<()> {
///         self.0.push((table.to_string(), record.clone()));
///         Ok(())
///     }
/// }
///
/// let mut writer = Inserts::default();
/// SearchLog::new()
///     .set("term", "red shoes")
///     .set("nbResults", 12)
///     .set_filter("catid", 4)
///     .save(&mut writer)?;
///
/// let (table, record) = &writer.0[0];
/// assert_eq!(table, "search");
/// assert_eq!(record["filters"].to_text(), r#"{"catid":4}"#);
/// # Ok::<(), sift_seeker::SeekerError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchLog {
    table: String,
    data: Row,
    filters: BTreeMap<String, Value>,
}

impl SearchLog {
    /// Creates a record with default values, written to [`DEFAULT_LOG_TABLE`].
    pub fn new() -> Self {
        let data = Row::from([
            ("id_searchtype".to_string(), Value::from(0)),
            ("source".to_string(), Value::from("")),
            ("term".to_string(), Value::from("")),
            ("nbResults".to_string(), Value::from(0)),
        ]);

        SearchLog {
            table: DEFAULT_LOG_TABLE.to_string(),
            data,
            filters: BTreeMap::new(),
        }
    }

    /// Creates a record from initial values merged over the defaults.
    ///
    /// A `filters` entry holding a map seeds the filters; any other
    /// `filters` value leaves them empty.
    pub fn from_values<K, V, I>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut log = SearchLog::new();
        for (key, value) in values {
            log = log.set(key, value);
        }
        log
    }

    /// Writes the record to another table.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Sets a column value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == "filters" {
            self.filters = match value {
                Value::Map(entries) => entries,
                _ => BTreeMap::new(),
            };
        } else {
            self.data.insert(key, value);
        }
        self
    }

    /// Sets one filter entry.
    pub fn set_filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// The table the record is written to.
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn filters(&self) -> &BTreeMap<String, Value> {
        &self.filters
    }

    /// Builds the record as it will be inserted, with `filters` encoded as a
    /// JSON object string.
    pub fn record(&self) -> Result<Row> {
        let mut record = self.data.clone();
        let filters = serde_json::to_string(&self.filters)?;
        record.insert("filters".to_string(), Value::from(filters));
        Ok(record)
    }

    /// Inserts the record.
    pub fn save<W: RecordWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        let record = self.record()?;
        debug!(table = %self.table, filters = self.filters.len(), "saving search log");
        writer.insert(&self.table, &record)
    }
}

impl Default for SearchLog {
    fn default() -> Self {
        SearchLog::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeekerError;

    #[derive(Default)]
    struct Inserts(Vec<(String, Row)>);

    impl RecordWriter for Inserts {
        fn insert(&mut self, table: &str, record: &Row) -> Result<()> {
            self.0.push((table.to_string(), record.clone()));
            Ok(())
        }
    }

    struct Refusing;

    impl RecordWriter for Refusing {
        fn insert(&mut self, _table: &str, _record: &Row) -> Result<()> {
            Err(SeekerError::backend("UNIQUE constraint failed"))
        }
    }

    #[test]
    fn defaults() {
        let record = SearchLog::new().record().unwrap();
        assert_eq!(record["id_searchtype"], Value::from(0));
        assert_eq!(record["source"], Value::from(""));
        assert_eq!(record["term"], Value::from(""));
        assert_eq!(record["nbResults"], Value::from(0));
        assert_eq!(record["filters"], Value::from("{}"));
    }

    #[test]
    fn values_override_defaults() {
        let log = SearchLog::from_values([
            ("term", Value::from("foo")),
            ("source", Value::from("web")),
        ]);
        let record = log.record().unwrap();
        assert_eq!(record["term"], Value::from("foo"));
        assert_eq!(record["source"], Value::from("web"));
        assert_eq!(record["nbResults"], Value::from(0));
    }

    #[test]
    fn filters_map_seeds_filters() {
        let filters = Value::Map(BTreeMap::from([(
            "published".to_string(),
            Value::from(1),
        )]));
        let log = SearchLog::from_values([("filters", filters)]).set_filter("catid", 3);
        assert_eq!(
            log.record().unwrap()["filters"],
            Value::from(r#"{"catid":3,"published":1}"#)
        );
    }

    #[test]
    fn non_map_filters_become_empty() {
        let log = SearchLog::new().set_filter("a", 1).set("filters", Value::Null);
        assert!(log.filters().is_empty());
    }

    #[test]
    fn save_inserts_into_configured_table() {
        let mut writer = Inserts::default();
        SearchLog::new()
            .with_table("search_log")
            .set("nbResults", 3)
            .save(&mut writer)
            .unwrap();

        assert_eq!(writer.0.len(), 1);
        assert_eq!(writer.0[0].0, "search_log");
        assert_eq!(writer.0[0].1["nbResults"], Value::from(3));
    }

    #[test]
    fn save_propagates_writer_errors() {
        let err = SearchLog::new().save(&mut Refusing).unwrap_err();
        assert_eq!(err.to_string(), "UNIQUE constraint failed");
    }
}
