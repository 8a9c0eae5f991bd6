//! Text matching modes and query modes.
//!
//! [`MatchMode`] is the value of the `stype` criterion and decides how a text
//! criterion becomes a `LIKE` pattern. [`QueryMode`] tells predicate hooks
//! whether they are building the count or the list query.

/// How a text criterion is matched against a column.
///
/// | Mode | `stype` | Pattern for `a b` |
/// |------|---------|-------------------|
/// | `Contains` | `contains` (default) | `%a%b%` |
/// | `Strict` | `strict` | `a b` |
/// | `StartsWith` | `startswith` | `a b%` |
/// | `EndsWith` | `endswith` | `%a b` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Substring match; every space in the search text becomes a wildcard.
    #[default]
    Contains,
    /// Whole-value match.
    Strict,
    /// Prefix match.
    StartsWith,
    /// Suffix match.
    EndsWith,
}

impl MatchMode {
    /// Parses an `stype` value. Unknown values fall back to `Contains`.
    pub fn parse(text: &str) -> MatchMode {
        match text {
            "strict" => MatchMode::Strict,
            "startswith" => MatchMode::StartsWith,
            "endswith" => MatchMode::EndsWith,
            _ => MatchMode::Contains,
        }
    }

    /// Returns the `stype` name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::Contains => "contains",
            MatchMode::Strict => "strict",
            MatchMode::StartsWith => "startswith",
            MatchMode::EndsWith => "endswith",
        }
    }

    /// Builds the `LIKE` pattern for text that has already been escaped.
    pub fn pattern(self, escaped: &str) -> String {
        match self {
            MatchMode::Strict => escaped.to_string(),
            MatchMode::StartsWith => format!("{escaped}%"),
            MatchMode::EndsWith => format!("%{escaped}"),
            MatchMode::Contains => format!("%{}%", escaped.replace(' ', "%")),
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which of the two queries is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryMode {
    /// `COUNT(DISTINCT key)` query, no projection, no ordering.
    Count,
    /// Row query with projection, grouping, ordering and pagination.
    List,
}
