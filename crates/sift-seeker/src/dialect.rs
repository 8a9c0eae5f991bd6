//! Identifier and literal quoting.
//!
//! The compiler never concatenates user text into SQL directly: columns go
//! through [`Quoter::qn`] and values through [`Quoter::escape`] followed by
//! [`Quoter::quote_escaped`]. Backends implement [`Quoter`] themselves or
//! delegate to one of the built-in [`Dialect`]s.
//!
//! | Dialect | Identifiers | Quote in literal | Pagination |
//! |---------|-------------|------------------|------------|
//! | `Ansi`, `Sqlite`, `Postgres` | `"name"` | `''` | `LIMIT n OFFSET m` |
//! | `MySql` | `` `name` `` | `\'` | `LIMIT m, n` |

use once_cell::sync::Lazy;
use regex::Regex;

use crate::backend::Page;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
        .expect("identifier pattern compiles")
});

/// Returns `true` if `name` is a plain or table-qualified identifier
/// (`title`, `a.title`).
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Quoting facility used to render predicates.
pub trait Quoter {
    /// Quotes an identifier. Dotted names are quoted part by part and a `*`
    /// part is left bare.
    fn qn(&self, name: &str) -> String;

    /// Escapes text so it can sit between literal quotes.
    fn escape(&self, text: &str) -> String;

    /// Wraps text that has already been through [`Quoter::escape`].
    fn quote_escaped(&self, escaped: &str) -> String {
        format!("'{escaped}'")
    }

    /// Escapes and wraps text as a string literal.
    fn quote(&self, text: &str) -> String {
        self.quote_escaped(&self.escape(text))
    }
}

impl<Q: Quoter + ?Sized> Quoter for &Q {
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

impl<Q: Quoter + ?Sized> Quoter for &mut Q {
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

/// Built-in SQL dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Standard SQL quoting.
    #[default]
    Ansi,
    /// SQLite (standard quoting).
    Sqlite,
    /// PostgreSQL (standard quoting).
    Postgres,
    /// MySQL / MariaDB (backtick identifiers, backslash escapes).
    MySql,
}

impl Dialect {
    fn identifier_quote(self) -> char {
        match self {
            Dialect::MySql => '`',
            Dialect::Ansi | Dialect::Sqlite | Dialect::Postgres => '"',
        }
    }

    /// Appends pagination to a rendered query.
    pub fn paginate(self, sql: &str, page: Page) -> String {
        match self {
            Dialect::MySql => format!("{sql} LIMIT {}, {}", page.offset, page.limit),
            Dialect::Ansi | Dialect::Sqlite | Dialect::Postgres => {
                format!("{sql} LIMIT {} OFFSET {}", page.limit, page.offset)
            }
        }
    }

    /// Returns the display name of this dialect.
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Ansi => "ansi",
            Dialect::Sqlite => "sqlite",
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Quoter for Dialect {
    fn qn(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let doubled = format!("{quote}{quote}");

        name.split('.')
            .map(|part| {
                if part == "*" {
                    part.to_string()
                } else {
                    format!("{quote}{}{quote}", part.replace(quote, &doubled))
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    fn escape(&self, text: &str) -> String {
        match self {
            Dialect::MySql => text.replace('\\', "\\\\").replace('\'', "\\'"),
            Dialect::Ansi | Dialect::Sqlite | Dialect::Postgres => text.replace('\'', "''"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("title"));
        assert!(is_identifier("a.title"));
        assert!(is_identifier("_private2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a.b.c"));
        assert!(!is_identifier("title; DROP TABLE items"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("a.*"));
    }

    #[test]
    fn qn_quotes_each_part() {
        assert_eq!(Dialect::Ansi.qn("title"), r#""title""#);
        assert_eq!(Dialect::Sqlite.qn("a.title"), r#""a"."title""#);
        assert_eq!(Dialect::MySql.qn("a.title"), "`a`.`title`");
    }

    #[test]
    fn qn_leaves_star_bare() {
        assert_eq!(Dialect::Postgres.qn("a.*"), r#""a".*"#);
    }

    #[test]
    fn qn_doubles_embedded_quotes() {
        assert_eq!(Dialect::Ansi.qn(r#"we"ird"#), r#""we""ird""#);
        assert_eq!(Dialect::MySql.qn("we`ird"), "`we``ird`");
    }

    #[test]
    fn escape_per_dialect() {
        assert_eq!(Dialect::Ansi.escape("O'Brien"), "O''Brien");
        assert_eq!(Dialect::MySql.escape("O'Brien"), r"O\'Brien");
        assert_eq!(Dialect::MySql.escape(r"C:\dir"), r"C:\\dir");
        assert_eq!(Dialect::Sqlite.escape(r"C:\dir"), r"C:\dir");
    }

    #[test]
    fn quote_escapes_once() {
        assert_eq!(Dialect::Ansi.quote("it's"), "'it''s'");
        assert_eq!(Dialect::MySql.quote("it's"), r"'it\'s'");
        assert_eq!(Dialect::Ansi.quote_escaped("it''s"), "'it''s'");
    }

    #[test]
    fn paginate_per_dialect() {
        let page = Page::new(5, 10);
        assert_eq!(
            Dialect::Sqlite.paginate("SELECT 1", page),
            "SELECT 1 LIMIT 10 OFFSET 5"
        );
        assert_eq!(Dialect::MySql.paginate("SELECT 1", page), "SELECT 1 LIMIT 5, 10");
    }

    #[test]
    fn quoter_through_reference() {
        fn render(q: &dyn Quoter) -> String {
            q.qn("a.id")
        }
        let dialect = Dialect::Ansi;
        assert_eq!(render(&&dialect), r#""a"."id""#);
    }
}
