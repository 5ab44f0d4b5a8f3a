//! Calls to `SYSTEM$` functions.

use crate::ddl::OperationKind;
use crate::error::{Error, Result};
use crate::executor::CommandExecutor;
use crate::identifier::{ObjectIdentifier, SchemaObjectIdentifier};
use crate::quoting::quote_literal;
use crate::session::Context;
use crate::types::ObjectType;

#[derive(Debug, Clone, Copy)]
pub struct SystemFunctions<'c> {
    executor: &'c CommandExecutor,
}

impl<'c> SystemFunctions<'c> {
    pub(crate) fn new(executor: &'c CommandExecutor) -> Self {
        Self { executor }
    }

    /// Value of `tag` on `object`, via `SYSTEM$GET_TAG`.
    ///
    /// # Errors
    /// `Error::ObjectNotFound` when the tag is not set on the object.
    pub async fn get_tag(
        &self,
        ctx: &Context,
        tag: &SchemaObjectIdentifier,
        object: &impl ObjectIdentifier,
        object_type: ObjectType,
    ) -> Result<String> {
        let sql = get_tag_sql(tag, object, object_type);
        let rows = self.executor.query(ctx, OperationKind::Other, &sql).await?;
        let value = rows
            .results
            .first()
            .and_then(|row| row.get_by_index(0))
            .filter(|v| !v.is_null());
        match value {
            Some(v) => v.as_text().map(str::to_string).ok_or_else(|| {
                Error::Decode(format!("SYSTEM$GET_TAG returned a non-text value: {v:?}"))
            }),
            None => Err(Error::ObjectNotFound(format!(
                "tag {tag} on {object_type} {}",
                object.fully_qualified_name()
            ))),
        }
    }
}

fn get_tag_sql(
    tag: &SchemaObjectIdentifier,
    object: &impl ObjectIdentifier,
    object_type: ObjectType,
) -> String {
    format!(
        "SELECT SYSTEM$GET_TAG({}, {}, {})",
        quote_literal(&tag.fully_qualified_name()),
        quote_literal(&object.fully_qualified_name()),
        quote_literal(object_type.as_sql()),
    )
}
