//! Search profiles.
//!
//! A [`SearchProfile`] is the strategy object a concrete search plugs into a
//! [`Seeker`](crate::Seeker). Every method has a default, so a profile only
//! overrides what its entity needs:
//!
//! | Hook | Default |
//! |------|---------|
//! | [`default_criteria`](SearchProfile::default_criteria) | [`default_criteria`] for the table |
//! | [`value_criteria`](SearchProfile::value_criteria) | caller criteria unchanged |
//! | [`and_predicates`](SearchProfile::and_predicates) | none |
//! | [`or_predicates`](SearchProfile::or_predicates) | `title` text match, unforced |
//! | [`format_results`](SearchProfile::format_results) | rows unchanged |
//!
//! # Example
//!
//! ```
//! use sift_criteria::Criteria;
//! use sift_seeker::{
//!     default_criteria, Predicates, QueryMode, SearchProfile, TableDescriptor, TABLE_ALIAS,
//! };
//!
//! /// Articles match on title or introduction, optionally within a category.
//! struct ArticleSearch;
//!
//! impl SearchProfile for ArticleSearch {
//!     fn default_criteria(&self, table: &dyn TableDescriptor) -> Criteria {
//!         let mut criteria = default_criteria(table);
//!         criteria.set("catid", 0);
//!         criteria
//!     }
//!
//!     fn and_predicates(&self, predicates: &Predicates<'_>, _mode: QueryMode) -> Vec<String> {
//!         let prefix = format!("{TABLE_ALIAS}.");
//!         predicates.integer("catid", &prefix, false).into_iter().collect()
//!     }
//!
//!     fn or_predicates(&self, predicates: &Predicates<'_>, _mode: QueryMode) -> Vec<String> {
//!         let prefix = format!("{TABLE_ALIAS}.");
//!         ["title", "introtext"]
//!             .into_iter()
//!             .filter_map(|field| predicates.text(field, &prefix, false))
//!             .collect()
//!     }
//! }
//! ```

use sift_criteria::{Criteria, Value};

use crate::backend::Row;
use crate::mode::{MatchMode, QueryMode};
use crate::ordering::Dir;
use crate::predicate::Predicates;
use crate::table::{TableDescriptor, TABLE_ALIAS};

/// Computes the base default criteria for a table.
///
/// `start=0`, `limit=0`, `ordering=<table default>`, `orderingDir=ASC`,
/// `stype=contains`, plus `published=1` when the table supports publish
/// state and `title=""` when it has a `title` column.
pub fn default_criteria(table: &dyn TableDescriptor) -> Criteria {
    let mut criteria = Criteria::from([
        ("start", Value::from(0)),
        ("limit", Value::from(0)),
        ("ordering", Value::from(table.default_ordering())),
        ("orderingDir", Value::from(Dir::Asc.as_sql())),
        ("stype", Value::from(MatchMode::Contains.as_str())),
    ]);

    if table.publishing_able() {
        criteria.set("published", 1);
    }
    if table.has_field("title") {
        criteria.set("title", "");
    }

    criteria
}

/// Strategy hooks for a concrete search.
pub trait SearchProfile {
    /// Defaults merged under the caller's criteria.
    fn default_criteria(&self, table: &dyn TableDescriptor) -> Criteria {
        default_criteria(table)
    }

    /// Adjusts the caller's criteria before they are merged over the defaults.
    fn value_criteria(&self, values: Criteria) -> Criteria {
        values
    }

    /// Predicates added as independent `AND` clauses, after the publish
    /// filter.
    fn and_predicates(&self, _predicates: &Predicates<'_>, _mode: QueryMode) -> Vec<String> {
        Vec::new()
    }

    /// Predicates combined into a single parenthesized `OR` group.
    fn or_predicates(&self, predicates: &Predicates<'_>, _mode: QueryMode) -> Vec<String> {
        let prefix = format!("{TABLE_ALIAS}.");
        predicates.text("title", &prefix, false).into_iter().collect()
    }

    /// Post-processes listed rows.
    fn format_results(&self, rows: Vec<Row>) -> Vec<Row> {
        rows
    }
}

/// The profile with every default: title search over the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasicProfile;

impl SearchProfile for BasicProfile {}

impl<P: SearchProfile + ?Sized> SearchProfile for &P {
    fn default_criteria(&self, table: &dyn TableDescriptor) -> Criteria {
        (**self).default_criteria(table)
    }

    fn value_criteria(&self, values: Criteria) -> Criteria {
        (**self).value_criteria(values)
    }

    fn and_predicates(&self, predicates: &Predicates<'_>, mode: QueryMode) -> Vec<String> {
        (**self).and_predicates(predicates, mode)
    }

    fn or_predicates(&self, predicates: &Predicates<'_>, mode: QueryMode) -> Vec<String> {
        (**self).or_predicates(predicates, mode)
    }

    fn format_results(&self, rows: Vec<Row>) -> Vec<Row> {
        (**self).format_results(rows)
    }
}

impl<P: SearchProfile + ?Sized> SearchProfile for Box<P> {
    fn default_criteria(&self, table: &dyn TableDescriptor) -> Criteria {
        (**self).default_criteria(table)
    }

    fn value_criteria(&self, values: Criteria) -> Criteria {
        (**self).value_criteria(values)
    }

    fn and_predicates(&self, predicates: &Predicates<'_>, mode: QueryMode) -> Vec<String> {
        (**self).and_predicates(predicates, mode)
    }

    fn or_predicates(&self, predicates: &Predicates<'_>, mode: QueryMode) -> Vec<String> {
        (**self).or_predicates(predicates, mode)
    }

    fn format_results(&self, rows: Vec<Row>) -> Vec<Row> {
        (**self).format_results(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use crate::Dialect;

    #[test]
    fn defaults_for_plain_table() {
        let table = Table::new("tags", "id");
        let criteria = default_criteria(&table);

        assert_eq!(criteria.get("start", -1), Value::from(0));
        assert_eq!(criteria.get("limit", -1), Value::from(0));
        assert_eq!(criteria.get("ordering", ""), Value::from("a.id"));
        assert_eq!(criteria.get("orderingDir", ""), Value::from("ASC"));
        assert_eq!(criteria.get("stype", ""), Value::from("contains"));
        assert!(!criteria.has("published"));
        assert!(!criteria.has("title"));
    }

    #[test]
    fn defaults_follow_table_capabilities() {
        let table = Table::new("items", "id").fields(["title", "published"]);
        let criteria = default_criteria(&table);

        assert_eq!(criteria.get("published", 0), Value::from(1));
        assert_eq!(criteria.get("title", "x"), Value::from(""));
    }

    #[test]
    fn basic_profile_searches_title_only() {
        let table = Table::new("items", "id").fields(["title", "summary"]);
        let criteria = Criteria::from([("title", "foo"), ("summary", "bar")]);
        let predicates = Predicates::new(&table, &criteria, &Dialect::Ansi);

        assert_eq!(
            BasicProfile.or_predicates(&predicates, QueryMode::List),
            vec![r#""a"."title" LIKE '%foo%'"#.to_string()]
        );
        assert!(BasicProfile
            .and_predicates(&predicates, QueryMode::List)
            .is_empty());
    }

    #[test]
    fn basic_profile_passes_rows_through() {
        let rows = vec![Row::from([("id".to_string(), Value::from(2))]), Row::new()];
        assert_eq!(BasicProfile.format_results(rows.clone()), rows);
    }
}
