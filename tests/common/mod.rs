#![allow(dead_code)]

use std::sync::Arc;

use warehouse_client::identifier::SchemaObjectIdentifier;
use warehouse_client::quoting::{escape_like, quote_literal};
use warehouse_client::test_utils::{ScriptedSession, init_tracing};
use warehouse_client::{Client, ClientConfig};

/// A client over a fresh scripted session; the session handle stays with the test.
pub fn scripted_client() -> (Arc<ScriptedSession>, Client) {
    init_tracing();
    let session = Arc::new(ScriptedSession::new());
    let client = Client::new(session.clone(), ClientConfig::default()).expect("default config");
    (session, client)
}

pub fn test_tag(name: &str) -> SchemaObjectIdentifier {
    SchemaObjectIdentifier::new("TEST_DB", "TEST_SCHEMA", name)
}

pub fn show_like(name: &str) -> String {
    format!("SHOW WAREHOUSES LIKE '{name}'")
}

/// The SHOW statement `show_by_id` sends for `name`.
pub fn show_by_id_sql(name: &str) -> String {
    format!("SHOW WAREHOUSES LIKE {}", quote_literal(&escape_like(name)))
}

pub fn get_tag_sql(tag: &str, warehouse: &str) -> String {
    format!(
        "SELECT SYSTEM$GET_TAG('\"TEST_DB\".\"TEST_SCHEMA\".\"{tag}\"', '\"{warehouse}\"', 'WAREHOUSE')"
    )
}
