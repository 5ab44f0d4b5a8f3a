use serde::{Deserialize, Serialize};

use crate::identifier::{ObjectIdentifier, SchemaObjectIdentifier};
use crate::quoting::quote_literal;

/// A tag attached to an object, as used in `TAG (...)` and `SET TAG ...` clauses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagAssociation {
    pub name: SchemaObjectIdentifier,
    pub value: String,
}

impl TagAssociation {
    pub fn new(name: SchemaObjectIdentifier, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    pub(crate) fn render(&self) -> String {
        format!(
            "{} = {}",
            self.name.fully_qualified_name(),
            quote_literal(&self.value)
        )
    }
}
