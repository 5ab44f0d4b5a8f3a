//! Clause-level statement assembly shared by the resource builders.

use std::fmt;

use crate::identifier::ObjectIdentifier;
use crate::quoting::quote_literal;

/// Operation a statement performs, used for logging and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Create,
    Alter,
    Drop,
    Show,
    Describe,
    /// System function or session command.
    Other,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Create => "create",
            OperationKind::Alter => "alter",
            OperationKind::Drop => "drop",
            OperationKind::Show => "show",
            OperationKind::Describe => "describe",
            OperationKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Values that can sit on the right-hand side of `KEY = value`.
pub(crate) enum SqlValue<'a> {
    Int(i64),
    Bool(bool),
    /// Quoted as a string literal.
    Text(&'a str),
    /// Fixed keyword, never caller-controlled.
    Keyword(&'static str),
    Ident(String),
}

impl fmt::Display for SqlValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Int(v) => write!(f, "{v}"),
            SqlValue::Bool(true) => f.write_str("TRUE"),
            SqlValue::Bool(false) => f.write_str("FALSE"),
            SqlValue::Text(v) => f.write_str(&quote_literal(v)),
            SqlValue::Keyword(v) => f.write_str(v),
            SqlValue::Ident(v) => f.write_str(v),
        }
    }
}

/// Appends space-separated clauses, skipping every absent optional.
///
/// ```ignore
/// let sql = SqlBuilder::new("DROP WAREHOUSE")
///     .flag(Some(true), "IF EXISTS")
///     .ident(&id)
///     .finish();
/// assert_eq!(sql, "DROP WAREHOUSE IF EXISTS \"WH\"");
/// ```
pub(crate) struct SqlBuilder {
    sql: String,
}

impl SqlBuilder {
    pub(crate) fn new(head: &str) -> Self {
        Self {
            sql: head.to_string(),
        }
    }

    pub(crate) fn keyword(mut self, keyword: &str) -> Self {
        self.sql.push(' ');
        self.sql.push_str(keyword);
        self
    }

    /// Emit `keyword` only when the flag is explicitly `Some(true)`.
    pub(crate) fn flag(self, flag: Option<bool>, keyword: &str) -> Self {
        if flag == Some(true) {
            self.keyword(keyword)
        } else {
            self
        }
    }

    pub(crate) fn ident(self, id: &impl ObjectIdentifier) -> Self {
        let rendered = id.fully_qualified_name();
        self.keyword(&rendered)
    }

    /// Emit `KEY = value` when present.
    pub(crate) fn param(self, key: &str, value: Option<SqlValue<'_>>) -> Self {
        match value {
            Some(value) => {
                let rendered = format!("{key} = {value}");
                self.keyword(&rendered)
            }
            None => self,
        }
    }

    /// Emit `LIKE '<pattern>'` when a pattern is given.
    pub(crate) fn like(self, pattern: Option<&str>) -> Self {
        match pattern {
            Some(pattern) => {
                let rendered = format!("LIKE {}", quote_literal(pattern));
                self.keyword(&rendered)
            }
            None => self,
        }
    }

    /// Emit `keyword <items joined by ", ">` when the list is non-empty.
    pub(crate) fn list(self, keyword: &str, items: &[String]) -> Self {
        if items.is_empty() {
            return self;
        }
        let rendered = format!("{keyword} {}", items.join(", "));
        self.keyword(&rendered)
    }

    /// Emit `keyword (<items joined by ", ">)` when the list is non-empty.
    pub(crate) fn parenthesized(self, keyword: &str, items: &[String]) -> Self {
        if items.is_empty() {
            return self;
        }
        let rendered = format!("{keyword} ({})", items.join(", "));
        self.keyword(&rendered)
    }

    pub(crate) fn finish(self) -> String {
        self.sql
    }
}
