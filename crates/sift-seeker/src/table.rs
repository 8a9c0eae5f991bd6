//! Table descriptors.
//!
//! The seeker never assumes a column exists: every field-specific predicate
//! first asks the [`TableDescriptor`]. [`Table`] is a ready-made descriptor
//! configured with a builder; schema layers can implement the trait
//! directly instead.

use std::collections::BTreeSet;

/// Alias the searched table is bound to in generated queries.
pub const TABLE_ALIAS: &str = "a";

/// Read-only description of the searched table.
///
/// # Manual Implementation
///
/// ```
/// use sift_seeker::TableDescriptor;
///
/// struct Articles;
///
/// impl TableDescriptor for Articles {
///     fn has_field(&self, name: &str) -> bool {
///         matches!(name, "id" | "title" | "published")
///     }
///
///     fn publishing_able(&self) -> bool {
///         true
///     }
///
///     fn key(&self) -> &str {
///         "id"
///     }
///
///     fn name(&self) -> &str {
///         "articles"
///     }
///
///     fn default_ordering(&self) -> &str {
///         "a.id"
///     }
/// }
/// ```
pub trait TableDescriptor {
    /// Returns `true` if the table has a column with this name.
    fn has_field(&self, name: &str) -> bool;

    /// Returns `true` if rows carry a `published` flag that searches filter on.
    fn publishing_able(&self) -> bool;

    /// Returns the primary key column.
    fn key(&self) -> &str;

    /// Returns the storage name of the table.
    fn name(&self) -> &str;

    /// Returns the column lists are ordered by when the caller names none.
    fn default_ordering(&self) -> &str;
}

impl<T: TableDescriptor + ?Sized> TableDescriptor for &T {
    fn has_field(&self, name: &str) -> bool {
        (**self).has_field(name)
    }

    fn publishing_able(&self) -> bool {
        (**self).publishing_able()
    }

    fn key(&self) -> &str {
        (**self).key()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn default_ordering(&self) -> &str {
        (**self).default_ordering()
    }
}

/// A table descriptor built from a list of columns.
///
/// Publishing support is on when the table has a `published` column, unless
/// set explicitly. The default ordering is the key column under
/// [`TABLE_ALIAS`].
///
/// # Example
///
/// ```
/// use sift_seeker::{Table, TableDescriptor};
///
/// let table = Table::new("articles", "id").fields(["title", "published"]);
///
/// assert!(table.has_field("id"));
/// assert!(table.has_field("title"));
/// assert!(table.publishing_able());
/// assert_eq!(table.default_ordering(), "a.id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    key: String,
    fields: BTreeSet<String>,
    publishing: Option<bool>,
    default_ordering: String,
}

impl Table {
    /// Creates a descriptor with only the key column.
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        let key = key.into();
        let default_ordering = format!("{TABLE_ALIAS}.{key}");
        Table {
            name: name.into(),
            fields: BTreeSet::from([key.clone()]),
            key,
            publishing: None,
            default_ordering,
        }
    }

    /// Adds a column.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into());
        self
    }

    /// Adds several columns.
    pub fn fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Overrides publish-state support.
    pub fn publishing(mut self, enabled: bool) -> Self {
        self.publishing = Some(enabled);
        self
    }

    /// Overrides the default ordering column.
    pub fn ordered_by(mut self, column: impl Into<String>) -> Self {
        self.default_ordering = column.into();
        self
    }
}

impl TableDescriptor for Table {
    fn has_field(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    fn publishing_able(&self) -> bool {
        self.publishing.unwrap_or_else(|| self.fields.contains("published"))
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn default_ordering(&self) -> &str {
        &self.default_ordering
    }
}
