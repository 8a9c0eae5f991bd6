//! The query compiler.
//!
//! A [`Seeker`] serves one logical search: it merges the caller's criteria
//! over table-derived defaults, then builds and runs a count query and a list
//! query that share a single filter-building step, so the two always agree on
//! which rows match.
//!
//! ```text
//! count:  SELECT COUNT(DISTINCT a.key) FROM table AS a WHERE <filters>
//! list:   SELECT a.* FROM table AS a WHERE <filters> GROUP BY a.key ORDER BY <col> <dir>
//!         [+ offset/limit when limit > 0]
//!
//! filters = published flag (if supported)
//!         ∧ each profile AND predicate
//!         ∧ (profile OR predicates joined with OR)
//! ```

use sift_criteria::{Criteria, Value};
use tracing::debug;

use crate::backend::{Backend, Page, Row};
use crate::clause::any_of;
use crate::dialect::is_identifier;
use crate::error::Result;
use crate::mode::QueryMode;
use crate::ordering::{Dir, OrderBy};
use crate::predicate::Predicates;
use crate::profile::{BasicProfile, SearchProfile};
use crate::query::SelectQuery;
use crate::table::{TableDescriptor, TABLE_ALIAS};

/// Result of [`Seeker::search`]: the total match count and one page of rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    /// Number of distinct matching rows, ignoring pagination.
    pub total: u64,
    /// The requested page of rows.
    pub rows: Vec<Row>,
}

/// Criteria-driven query compiler.
///
/// # Example
///
/// ```
/// use sift_criteria::{Criteria, Value};
/// use sift_seeker::{Backend, Dialect, Page, Quoter, Result, Row, SelectQuery, Seeker, Table};
///
/// #[derive(Default)]
/// struct Log(Vec<String>);
///
/// impl Quoter for Log {
///     fn qn(&self, name: &str) -> String {
///         Dialect::Sqlite.qn(name)
///     }
///
///     fn escape(&self, text: &str) -> String {
///         Dialect::Sqlite.escape(text)
///     }
/// }
///
/// impl Backend for Log {
///     fn load_scalar(&mut self, query: &SelectQuery) -> Result<Value> {
///         self.0.push(query.to_sql());
///         Ok(Value::from(0))
///     }
///
///     fn load_rows(&mut self, query: &SelectQuery, _page: Option<Page>) -> Result<Vec<Row>> {
///         self.0.push(query.to_sql());
///         Ok(Vec::new())
///     }
/// }
///
/// let table = Table::new("items", "id").fields(["title", "published"]);
/// let criteria = Criteria::from([("title", "foo")]);
/// let mut seeker = Seeker::new(Log::default(), table, criteria);
///
/// assert_eq!(seeker.count()?, 0);
/// assert!(seeker.list()?.is_empty());
///
/// let log = seeker.into_backend().0;
/// assert_eq!(
///     log[0],
///     r#"SELECT COUNT(DISTINCT "a"."id") FROM "items" AS a WHERE "a"."published" = 1 AND ("a"."title" LIKE '%foo%')"#
/// );
/// assert_eq!(
///     log[1],
///     r#"SELECT a.* FROM "items" AS a WHERE "a"."published" = 1 AND ("a"."title" LIKE '%foo%') GROUP BY "a"."id" ORDER BY "a"."id" ASC"#
/// );
/// # Ok::<(), sift_seeker::SeekerError>(())
/// ```
pub struct Seeker<B, T, P = BasicProfile> {
    backend: B,
    table: T,
    profile: P,
    criteria: Criteria,
    query: SelectQuery,
}

impl<B: Backend, T: TableDescriptor> Seeker<B, T, BasicProfile> {
    /// Creates a seeker with the [`BasicProfile`].
    pub fn new(backend: B, table: T, criteria: Criteria) -> Self {
        Seeker::with_profile(backend, table, BasicProfile, criteria)
    }
}

impl<B: Backend, T: TableDescriptor, P: SearchProfile> Seeker<B, T, P> {
    /// Creates a seeker with a custom profile.
    pub fn with_profile(backend: B, table: T, profile: P, criteria: Criteria) -> Self {
        let mut seeker = Seeker {
            backend,
            table,
            profile,
            criteria: Criteria::new(),
            query: SelectQuery::new(),
        };
        seeker.set_criterias(criteria);
        seeker
    }

    /// Replaces the criteria: recomputes the profile defaults and merges
    /// `values` over them.
    pub fn set_criterias(&mut self, values: Criteria) -> &mut Self {
        let defaults = self.profile.default_criteria(&self.table);
        let values = self.profile.value_criteria(values);
        self.criteria = Criteria::with_defaults(defaults, values);
        self
    }

    /// Returns a criterion, or `fallback` when it is not set.
    pub fn get_criteria(&self, key: &str, fallback: impl Into<Value>) -> Value {
        self.criteria.get(key, fallback)
    }

    /// The merged criteria.
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// The query built by the last [`count`](Seeker::count) or
    /// [`list`](Seeker::list) call.
    pub fn query(&self) -> &SelectQuery {
        &self.query
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn profile(&self) -> &P {
        &self.profile
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consumes the seeker and returns its backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Counts the distinct rows matching the criteria.
    ///
    /// A scalar that is absent, non-numeric or negative counts as zero.
    pub fn count(&mut self) -> Result<u64> {
        self.query.clear();
        self.build_count_query();
        debug!(table = self.table.name(), sql = %self.query, "counting search matches");

        let scalar = self.backend.load_scalar(&self.query)?;
        Ok(u64::try_from(scalar.to_int()).unwrap_or(0))
    }

    /// Lists the rows matching the criteria, one page at a time when `limit`
    /// is set.
    pub fn list(&mut self) -> Result<Vec<Row>> {
        self.query.clear();
        self.build_list_query();
        let page = self.page();
        debug!(table = self.table.name(), sql = %self.query, ?page, "listing search matches");

        let rows = self.backend.load_rows(&self.query, page)?;
        Ok(self.profile.format_results(rows))
    }

    /// Runs [`count`](Seeker::count) then [`list`](Seeker::list).
    pub fn search(&mut self) -> Result<SearchPage> {
        let total = self.count()?;
        let rows = self.list()?;
        Ok(SearchPage { total, rows })
    }

    // ========================================================================
    // Query building
    // ========================================================================

    /// The pagination window: `None` unless `limit` is positive.
    pub fn page(&self) -> Option<Page> {
        let limit = u64::try_from(self.criteria.get("limit", 0).to_int()).ok()?;
        if limit == 0 {
            return None;
        }
        let start = u64::try_from(self.criteria.get("start", 0).to_int()).unwrap_or(0);
        Some(Page::new(start, limit))
    }

    /// The list ordering.
    ///
    /// Falls back to the table default when the `ordering` criterion is not a
    /// column identifier, and to ascending when `orderingDir` is not a
    /// direction.
    pub fn ordering(&self) -> OrderBy {
        let requested = self.criteria.get("ordering", Value::Null).to_text();
        let column = if is_identifier(&requested) {
            requested
        } else {
            if !requested.is_empty() {
                debug!(ordering = %requested, "ignoring ordering that is not a column");
            }
            self.table.default_ordering().to_string()
        };

        let dir = Dir::parse(&self.criteria.get("orderingDir", Value::Null).to_text())
            .unwrap_or_default();
        OrderBy::new(column, dir)
    }

    fn key_column(&self) -> String {
        self.backend.qn(&format!("{TABLE_ALIAS}.{}", self.table.key()))
    }

    fn source(&self) -> String {
        format!("{} AS {TABLE_ALIAS}", self.backend.qn(self.table.name()))
    }

    /// Filters shared by the count and list queries.
    fn filters(&self, mode: QueryMode) -> Vec<String> {
        let prefix = format!("{TABLE_ALIAS}.");
        let predicates = Predicates::new(&self.table, &self.criteria, &self.backend);
        let mut filters = Vec::new();

        if self.table.publishing_able() {
            filters.extend(predicates.boolean("published", &prefix, true));
        }
        filters.extend(self.profile.and_predicates(&predicates, mode));
        filters.extend(any_of(&self.profile.or_predicates(&predicates, mode)));

        filters
    }

    fn build_count_query(&mut self) {
        let select = format!("COUNT(DISTINCT {})", self.key_column());
        let source = self.source();
        let filters = self.filters(QueryMode::Count);

        self.query.select(select).from(source);
        for filter in filters {
            self.query.and_where(filter);
        }
    }

    fn build_list_query(&mut self) {
        let source = self.source();
        let order = self.ordering().render(&self.backend);
        let group = self.key_column();
        let filters = self.filters(QueryMode::List);

        self.query
            .select(format!("{TABLE_ALIAS}.*"))
            .from(source)
            .order(order)
            .group(group);
        for filter in filters {
            self.query.and_where(filter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Dialect, Quoter};
    use crate::table::Table;
    use crate::SeekerError;

    #[derive(Default)]
    struct Recorder {
        scalar: Value,
        rows: Vec<Row>,
        pages: Vec<Option<Page>>,
        fail: bool,
    }

    impl Quoter for Recorder {
        fn qn(&self, name: &str) -> String {
            Dialect::Ansi.qn(name)
        }

        fn escape(&self, text: &str) -> String {
            Dialect::Ansi.escape(text)
        }
    }

    impl Backend for Recorder {
        fn load_scalar(&mut self, _query: &SelectQuery) -> Result<Value> {
            if self.fail {
                return Err(SeekerError::backend("database is locked"));
            }
            Ok(self.scalar.clone())
        }

        fn load_rows(&mut self, _query: &SelectQuery, page: Option<Page>) -> Result<Vec<Row>> {
            if self.fail {
                return Err(SeekerError::backend("database is locked"));
            }
            self.pages.push(page);
            Ok(self.rows.clone())
        }
    }

    fn items() -> Table {
        Table::new("items", "id").fields(["title", "published"])
    }

    #[test]
    fn overrides_win_over_defaults() {
        let criteria = Criteria::from([
            ("limit", Value::from(5)),
            ("stype", Value::from("strict")),
        ]);
        let seeker = Seeker::new(Recorder::default(), items(), criteria);

        assert_eq!(seeker.get_criteria("limit", 0), Value::from(5));
        assert_eq!(seeker.get_criteria("stype", ""), Value::from("strict"));
        assert_eq!(seeker.get_criteria("published", 0), Value::from(1));
        assert_eq!(seeker.get_criteria("missing", "fb"), Value::from("fb"));
    }

    #[test]
    fn set_criterias_recomputes_from_defaults() {
        let mut seeker = Seeker::new(
            Recorder::default(),
            items(),
            Criteria::from([("title", "first")]),
        );
        seeker.set_criterias(Criteria::from([("limit", 3)]));

        assert_eq!(seeker.get_criteria("title", "x"), Value::from(""));
        assert_eq!(seeker.get_criteria("limit", 0), Value::from(3));
    }

    #[test]
    fn count_coerces_scalar() {
        let mut backend = Recorder {
            scalar: Value::from("17"),
            ..Recorder::default()
        };
        let count = |backend: &mut Recorder| {
            Seeker::new(backend, items(), Criteria::new())
                .count()
                .unwrap()
        };
        assert_eq!(count(&mut backend), 17);

        backend.scalar = Value::Null;
        assert_eq!(count(&mut backend), 0);

        backend.scalar = Value::from("n/a");
        assert_eq!(count(&mut backend), 0);

        backend.scalar = Value::from(-4);
        assert_eq!(count(&mut backend), 0);
    }

    #[test]
    fn page_only_when_limit_positive() {
        let seeker = Seeker::new(Recorder::default(), items(), Criteria::new());
        assert_eq!(seeker.page(), None);

        let seeker = Seeker::new(
            Recorder::default(),
            items(),
            Criteria::from([("limit", 10), ("start", 5)]),
        );
        assert_eq!(seeker.page(), Some(Page::new(5, 10)));

        let seeker = Seeker::new(
            Recorder::default(),
            items(),
            Criteria::from([("limit", -1)]),
        );
        assert_eq!(seeker.page(), None);

        let seeker = Seeker::new(
            Recorder::default(),
            items(),
            Criteria::from([("limit", 10), ("start", -3)]),
        );
        assert_eq!(seeker.page(), Some(Page::new(0, 10)));
    }

    #[test]
    fn ordering_rejects_non_identifiers() {
        let seeker = Seeker::new(
            Recorder::default(),
            items(),
            Criteria::from([("ordering", "id; DROP TABLE items"), ("orderingDir", "up")]),
        );
        assert_eq!(seeker.ordering(), OrderBy::asc("a.id"));

        let seeker = Seeker::new(
            Recorder::default(),
            items(),
            Criteria::from([("ordering", "a.title"), ("orderingDir", "desc")]),
        );
        assert_eq!(seeker.ordering(), OrderBy::desc("a.title"));
    }

    #[test]
    fn query_is_cleared_between_count_and_list() {
        let mut seeker = Seeker::new(
            Recorder::default(),
            items(),
            Criteria::from([("title", "foo")]),
        );

        seeker.count().unwrap();
        assert_eq!(seeker.query().selects().len(), 1);
        assert_eq!(seeker.query().wheres().len(), 2);

        seeker.list().unwrap();
        assert_eq!(seeker.query().selects(), ["a.*"]);
        assert_eq!(seeker.query().wheres().len(), 2);

        seeker.count().unwrap();
        assert_eq!(seeker.query().wheres().len(), 2);
        assert!(seeker.query().orders().is_empty());
    }

    #[test]
    fn backend_errors_propagate_verbatim() {
        let backend = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut seeker = Seeker::new(backend, items(), Criteria::new());

        assert_eq!(seeker.count().unwrap_err().to_string(), "database is locked");
        assert_eq!(seeker.list().unwrap_err().to_string(), "database is locked");
    }

    #[test]
    fn search_returns_total_and_rows() {
        let backend = Recorder {
            scalar: Value::from(2),
            rows: vec![Row::new(), Row::new()],
            ..Recorder::default()
        };
        let mut seeker = Seeker::new(backend, items(), Criteria::from([("limit", 2)]));

        let page = seeker.search().unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(seeker.backend().pages, vec![Some(Page::new(0, 2))]);
    }
}
