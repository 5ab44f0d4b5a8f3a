//! Object identifiers.
//!
//! Names passed to [`AccountObjectIdentifier::new`] (and the other `new` constructors) are
//! taken verbatim and always rendered quoted, so their case is preserved on the service.
//! [`AccountObjectIdentifier::parse`] follows the service's rules for user-typed names:
//! unquoted input folds to upper case, quoted input keeps its case.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::quoting::{quote_identifier, unquote_identifier};

/// Anything that can be rendered as a (possibly qualified) object name in a statement.
pub trait ObjectIdentifier {
    /// Fully qualified, quoted form, e.g. `"db"."schema"."tag"`.
    fn fully_qualified_name(&self) -> String;
}

fn parse_part(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') {
        let name = unquote_identifier(trimmed)
            .ok_or_else(|| Error::InvalidIdentifier(format!("malformed quoted name {raw}")))?;
        if name.is_empty() {
            return Err(Error::InvalidIdentifier("empty quoted name".into()));
        }
        Ok(name)
    } else if trimmed.is_empty() {
        Err(Error::InvalidIdentifier("empty name".into()))
    } else {
        Ok(trimmed.to_ascii_uppercase())
    }
}

/// Split on dots that are not inside double quotes.
fn split_parts(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (idx, ch) in raw.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '.' if !in_quotes => {
                parts.push(&raw[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&raw[start..]);
    parts
}

fn parse_qualified<const N: usize>(raw: &str) -> Result<[String; N]> {
    let parts = split_parts(raw);
    if parts.len() != N {
        return Err(Error::InvalidIdentifier(format!(
            "expected {N} dot-separated parts in {raw}, found {}",
            parts.len()
        )));
    }
    let parsed = parts
        .into_iter()
        .map(parse_part)
        .collect::<Result<Vec<_>>>()?;
    parsed
        .try_into()
        .map_err(|_| Error::InvalidIdentifier(raw.to_string()))
}

/// Identifier of an account-level object such as a warehouse, role or database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountObjectIdentifier {
    name: String,
}

impl AccountObjectIdentifier {
    /// Exact name, case preserved.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Parse a user-typed name. Unquoted names fold to upper case.
    ///
    /// # Errors
    /// Returns `Error::InvalidIdentifier` for empty or malformed input.
    pub fn parse(raw: &str) -> Result<Self> {
        let [name] = parse_qualified::<1>(raw)?;
        Ok(Self { name })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ObjectIdentifier for AccountObjectIdentifier {
    fn fully_qualified_name(&self) -> String {
        quote_identifier(&self.name)
    }
}

/// Identifier of an object living in a database, e.g. a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatabaseObjectIdentifier {
    database: String,
    name: String,
}

impl DatabaseObjectIdentifier {
    pub fn new(database: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            name: name.into(),
        }
    }

    /// # Errors
    /// Returns `Error::InvalidIdentifier` unless the input has exactly two parts.
    pub fn parse(raw: &str) -> Result<Self> {
        let [database, name] = parse_qualified::<2>(raw)?;
        Ok(Self { database, name })
    }

    #[must_use]
    pub fn database_name(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ObjectIdentifier for DatabaseObjectIdentifier {
    fn fully_qualified_name(&self) -> String {
        format!(
            "{}.{}",
            quote_identifier(&self.database),
            quote_identifier(&self.name)
        )
    }
}

/// Identifier of an object living in a schema, e.g. a tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaObjectIdentifier {
    database: String,
    schema: String,
    name: String,
}

impl SchemaObjectIdentifier {
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// # Errors
    /// Returns `Error::InvalidIdentifier` unless the input has exactly three parts.
    pub fn parse(raw: &str) -> Result<Self> {
        let [database, schema, name] = parse_qualified::<3>(raw)?;
        Ok(Self {
            database,
            schema,
            name,
        })
    }

    #[must_use]
    pub fn database_name(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ObjectIdentifier for SchemaObjectIdentifier {
    fn fully_qualified_name(&self) -> String {
        format!(
            "{}.{}.{}",
            quote_identifier(&self.database),
            quote_identifier(&self.schema),
            quote_identifier(&self.name)
        )
    }
}

macro_rules! display_as_fqn {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.fully_qualified_name())
                }
            }
        )+
    };
}

display_as_fqn!(
    AccountObjectIdentifier,
    DatabaseObjectIdentifier,
    SchemaObjectIdentifier
);
