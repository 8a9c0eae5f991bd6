//! Seeker - Criteria-driven SQL query compiler.
//!
//! Seeker turns a loosely typed bag of search parameters into a filtering
//! query against one table and runs it in two modes that always agree on
//! which rows match:
//!
//! - **count**: `COUNT(DISTINCT key)` over the matching rows
//! - **list**: the matching rows, ordered, grouped by key and optionally
//!   paginated
//!
//! The table is described by a [`TableDescriptor`], queries run on a
//! [`Backend`], and a [`SearchProfile`] decides which criteria become which
//! predicates.
//!
//! # Quick Start
//!
//! ```rust
//! use sift_criteria::{Criteria, Value};
//! use sift_seeker::{Backend, Dialect, Page, Quoter, Result, Row, SelectQuery, Seeker, Table};
//!
//! // A backend that returns canned results
//! struct Canned;
//!
//! impl Quoter for Canned {
//!     fn qn(&self, name: &str) -> String {
//!         Dialect::Sqlite.qn(name)
//!     }
//!
//!     fn escape(&self, text: &str) -> String {
//!         Dialect::Sqlite.escape(text)
//!     }
//! }
//!
//! impl Backend for Canned {
//!     fn load_scalar(&mut self, _query: &SelectQuery) -> Result<Value> {
//!         Ok(Value::from(1))
//!     }
//!
//!     fn load_rows(&mut self, _query: &SelectQuery, _page: Option<Page>) -> Result<Vec<Row>> {
//!         Ok(vec![Row::from([("title".to_string(), Value::from("Red shoes"))])])
//!     }
//! }
//!
//! let table = Table::new("products", "id").fields(["title", "published"]);
//! let criteria = Criteria::from_json(r#"{"title": "red shoes", "limit": 20}"#).unwrap();
//!
//! let mut seeker = Seeker::new(Canned, table, criteria);
//! let page = seeker.search()?;
//!
//! assert_eq!(page.total, 1);
//! assert_eq!(page.rows[0]["title"], Value::from("Red shoes"));
//! assert_eq!(
//!     seeker.query().wheres(),
//!     [r#""a"."published" = 1"#, r#"("a"."title" LIKE '%red%shoes%')"#]
//! );
//! # Ok::<(), sift_seeker::SeekerError>(())
//! ```
//!
//! # Criteria
//!
//! | Criterion | Default | Effect |
//! |-----------|---------|--------|
//! | `start` | `0` | Rows skipped when paginating |
//! | `limit` | `0` | Page size; `0` lists everything |
//! | `ordering` | table default | ORDER BY column |
//! | `orderingDir` | `ASC` | ORDER BY direction |
//! | `stype` | `contains` | Text matching mode, see [`MatchMode`] |
//! | `published` | `1` if supported | Publish-state filter, always applied |
//! | `title` | `""` if the column exists | Title text search |

mod backend;
mod clause;
mod dialect;
mod error;
mod mode;
mod ordering;
mod predicate;
mod profile;
mod query;
mod saver;
mod seeker;
mod table;

// Re-export public API
pub use backend::{Backend, Page, RecordWriter, Row};
pub use clause::{any_of, Clause, ClauseValue};
pub use dialect::{is_identifier, Dialect, Quoter};
pub use error::{Result, SeekerError};
pub use mode::{MatchMode, QueryMode};
pub use ordering::{Dir, OrderBy};
pub use predicate::Predicates;
pub use profile::{default_criteria, BasicProfile, SearchProfile};
pub use query::SelectQuery;
pub use saver::{SearchLog, DEFAULT_LOG_TABLE};
pub use seeker::{SearchPage, Seeker};
pub use table::{Table, TableDescriptor, TABLE_ALIAS};
