use std::sync::Arc;

use warehouse_client::prelude::*;
use warehouse_client::test_utils::{ScriptedSession, init_tracing, scalar_result};

#[test]
fn test07_connect_applies_session_settings() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let session = Arc::new(ScriptedSession::new());
        session
            .expect_exec("USE ROLE \"SYSADMIN\"", Ok(()))
            .expect_exec("USE WAREHOUSE \"Mixed Case\"", Ok(()))
            .expect_exec("ALTER SESSION SET QUERY_TAG = 'nightly''s load'", Ok(()))
            .expect_query(
                "SELECT CURRENT_WAREHOUSE()",
                Ok(scalar_result(
                    "CURRENT_WAREHOUSE()",
                    RowValues::Text("Mixed Case".into()),
                )),
            );

        let config = ClientConfig::from_json_str(
            r#"{
                "role": "sysadmin",
                "warehouse": "\"Mixed Case\"",
                "query_tag": "nightly's load",
                "log_statements": true
            }"#,
        )?;
        let ctx = Context::background();
        let client = Client::connect(session.clone(), config, &ctx).await?;
        assert!(client.config().log_statements);

        let current = client.session_commands().current_warehouse(&ctx).await?;
        assert_eq!(current.as_deref(), Some("Mixed Case"));
        session.assert_done();
        Ok::<(), Error>(())
    })?;
    Ok(())
}

#[test]
fn test07_connect_stops_at_first_failure() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let session = Arc::new(ScriptedSession::new());
        session.expect_exec(
            "USE ROLE \"NOBODY\"",
            Err(Error::service(
                Some("002003"),
                "Role 'NOBODY' does not exist or not authorized.",
            )),
        );
        let config = ClientConfig {
            role: Some("NOBODY".into()),
            warehouse: Some("WH".into()),
            ..Default::default()
        };

        let err = Client::connect(session.clone(), config, &Context::background())
            .await
            .unwrap_err();
        assert!(err.is_not_exist_or_authorized());
        assert_eq!(session.statements(), vec!["USE ROLE \"NOBODY\""]);
        Ok::<(), Error>(())
    })?;
    Ok(())
}

#[test]
fn test07_current_warehouse_null() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let session = Arc::new(ScriptedSession::new());
        session.expect_query(
            "SELECT CURRENT_WAREHOUSE()",
            Ok(scalar_result("CURRENT_WAREHOUSE()", RowValues::Null)),
        );
        let client = Client::new(session.clone(), ClientConfig::default())?;
        let current = client
            .session_commands()
            .current_warehouse(&Context::background())
            .await?;
        assert_eq!(current, None);
        Ok::<(), Error>(())
    })?;
    Ok(())
}

#[test]
fn test07_invalid_config_is_rejected() {
    let config = ClientConfig {
        warehouse: Some("  ".into()),
        ..Default::default()
    };
    let err = Client::new(ScriptedSession::new(), config).unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));

    let err = ClientConfig::from_json_str(r#"{"statement_timeout_secs": 0}"#).unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));

    let err = ClientConfig::from_json_str(r#"{"warehouse_name": "WH"}"#).unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
}
