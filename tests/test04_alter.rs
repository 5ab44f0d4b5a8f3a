mod common;

use std::time::Duration;

use common::{get_tag_sql, scripted_client, show_by_id_sql, show_like, test_tag};
use warehouse_client::prelude::*;
use warehouse_client::test_utils::{
    WarehouseRowBuilder, describe_result, not_exist_error, random_account_object_identifier,
    scalar_result, show_result,
};

#[test]
fn test04_alter_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (session, client) = scripted_client();
        let ctx = Context::background();
        let id = random_account_object_identifier();
        let name = id.name().to_string();
        let new_id = random_account_object_identifier();
        let new_name = new_id.name().to_string();

        session.expect_exec(
            &format!(
                "CREATE WAREHOUSE \"{name}\" WAREHOUSE_SIZE = XSMALL MAX_CLUSTER_COUNT = 1 \
                 MIN_CLUSTER_COUNT = 1 SCALING_POLICY = STANDARD AUTO_SUSPEND = 60 \
                 AUTO_RESUME = TRUE INITIALLY_SUSPENDED = TRUE COMMENT = 'test comment'"
            ),
            Ok(()),
        );
        let created = WarehouseRowBuilder::new(name.clone())
            .auto_suspend(60)
            .comment("test comment")
            .state(WarehouseState::Suspended);
        session.expect_query(&show_by_id_sql(&name), Ok(show_result(&[&created])));
        session.expect_exec(
            &format!("ALTER WAREHOUSE \"{name}\" RENAME TO \"{new_name}\""),
            Ok(()),
        );
        let renamed = WarehouseRowBuilder::new(new_name.clone()).comment("test comment");
        session.expect_query(&show_by_id_sql(&new_name), Ok(show_result(&[&renamed])));
        session.expect_exec(
            &format!(
                "ALTER WAREHOUSE \"{new_name}\" SET WAREHOUSE_SIZE = SMALL COMMENT = 'test comment2'"
            ),
            Ok(()),
        );
        let resized = WarehouseRowBuilder::new(new_name.clone())
            .size(WarehouseSize::Small)
            .comment("test comment2");
        session.expect_query(&show_by_id_sql(&new_name), Ok(show_result(&[&resized])));

        let warehouses = client.warehouses();
        let opts = CreateWarehouseOptions {
            comment: Some("test comment".into()),
            warehouse_size: Some(WarehouseSize::XSmall),
            auto_suspend: Some(60),
            max_cluster_count: Some(1),
            min_cluster_count: Some(1),
            scaling_policy: Some(ScalingPolicy::Standard),
            auto_resume: Some(true),
            initially_suspended: Some(true),
            ..Default::default()
        };
        warehouses.create(&ctx, &id, Some(&opts)).await?;

        let wh = warehouses.show_by_id(&ctx, &id).await?;
        assert_eq!(wh.max_cluster_count, 1);
        assert_eq!(wh.min_cluster_count, 1);
        assert_eq!(wh.scaling_policy, ScalingPolicy::Standard);
        assert_eq!(wh.auto_suspend, 60);
        assert!(wh.auto_resume);
        assert_eq!(wh.comment, "test comment");
        assert_eq!(wh.state, WarehouseState::Suspended);
        assert_eq!(wh.size, WarehouseSize::XSmall);

        let rename = AlterWarehouseOptions {
            new_name: Some(new_id.clone()),
            ..Default::default()
        };
        warehouses.alter(&ctx, &wh.id(), &rename).await?;
        let wh = warehouses.show_by_id(&ctx, &new_id).await?;
        assert_eq!(wh.name, new_name);

        let set = AlterWarehouseOptions {
            set: Some(WarehouseSet {
                warehouse_size: Some(WarehouseSize::Small),
                comment: Some("test comment2".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        warehouses.alter(&ctx, &wh.id(), &set).await?;
        let wh = warehouses.show_by_id(&ctx, &new_id).await?;
        assert_eq!(wh.comment, "test comment2");
        assert_eq!(wh.size, WarehouseSize::Small);

        session.assert_done();
        Ok::<(), Error>(())
    })?;
    Ok(())
}

#[test]
fn test04_alter_set_properties() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (session, client) = scripted_client();
        let ctx = Context::background();
        session.expect_exec(
            "ALTER WAREHOUSE \"WH\" SET WAREHOUSE_SIZE = MEDIUM AUTO_SUSPEND = 1234 \
             ENABLE_QUERY_ACCELERATION = TRUE",
            Ok(()),
        );
        let row = WarehouseRowBuilder::new("WH")
            .size(WarehouseSize::Medium)
            .auto_suspend(1234)
            .query_acceleration(true, 8);
        session.expect_query(&show_like("WH"), Ok(show_result(&[&row])));

        let opts = AlterWarehouseOptions {
            set: Some(WarehouseSet {
                warehouse_size: Some(WarehouseSize::Medium),
                auto_suspend: Some(1234),
                enable_query_acceleration: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };
        let id = AccountObjectIdentifier::new("WH");
        client.warehouses().alter(&ctx, &id, &opts).await?;

        let found = client
            .warehouses()
            .show(&ctx, Some(&ShowWarehouseOptions::like("WH")))
            .await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].size, WarehouseSize::Medium);
        assert!(found[0].enable_query_acceleration);
        assert_eq!(found[0].auto_suspend, 1234);
        Ok::<(), Error>(())
    })?;
    Ok(())
}

#[test]
fn test04_alter_rename_and_back() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (session, client) = scripted_client();
        let ctx = Context::background();
        let old_id = AccountObjectIdentifier::new("OLD_WH");
        let new_id = AccountObjectIdentifier::new("NEW_WH");
        session
            .expect_exec("ALTER WAREHOUSE \"OLD_WH\" RENAME TO \"NEW_WH\"", Ok(()))
            .expect_query(
                "DESCRIBE WAREHOUSE \"NEW_WH\"",
                Ok(describe_result("NEW_WH", chrono::Utc::now().naive_utc())),
            )
            .expect_query(
                "DESCRIBE WAREHOUSE \"OLD_WH\"",
                Err(not_exist_error("OLD_WH")),
            )
            .expect_exec("ALTER WAREHOUSE \"NEW_WH\" RENAME TO \"OLD_WH\"", Ok(()));

        let warehouses = client.warehouses();
        let rename = |to: &AccountObjectIdentifier| AlterWarehouseOptions {
            new_name: Some(to.clone()),
            ..Default::default()
        };
        warehouses.alter(&ctx, &old_id, &rename(&new_id)).await?;
        let details = warehouses.describe(&ctx, &new_id).await?;
        assert_eq!(details.name, "NEW_WH");
        let err = warehouses.describe(&ctx, &old_id).await.unwrap_err();
        assert!(err.is_not_exist_or_authorized());
        warehouses.alter(&ctx, &new_id, &rename(&old_id)).await?;
        session.assert_done();
        Ok::<(), Error>(())
    })?;
    Ok(())
}

#[test]
fn test04_alter_unset() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (session, client) = scripted_client();
        let ctx = Context::background();
        session.expect_exec("ALTER WAREHOUSE \"WH\" UNSET MAX_CLUSTER_COUNT, COMMENT", Ok(()));
        let row = WarehouseRowBuilder::new("WH");
        session.expect_query(&show_like("WH"), Ok(show_result(&[&row])));

        let opts = AlterWarehouseOptions {
            unset: Some(WarehouseUnset {
                comment: Some(true),
                max_cluster_count: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };
        let id = AccountObjectIdentifier::new("WH");
        client.warehouses().alter(&ctx, &id, &opts).await?;
        let found = client
            .warehouses()
            .show(&ctx, Some(&ShowWarehouseOptions::like("WH")))
            .await?;
        assert_eq!(found[0].comment, "");
        assert_eq!(found[0].max_cluster_count, 1);
        Ok::<(), Error>(())
    })?;
    Ok(())
}

#[test]
fn test04_alter_suspend_and_resume() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (session, client) = scripted_client();
        let ctx = Context::background();
        let suspended = WarehouseRowBuilder::new("WH").state(WarehouseState::Suspending);
        let resumed = WarehouseRowBuilder::new("WH").state(WarehouseState::Resuming);
        session
            .expect_exec("ALTER WAREHOUSE \"WH\" SUSPEND", Ok(()))
            .expect_query(&show_by_id_sql("WH"), Ok(show_result(&[&suspended])))
            .expect_exec("ALTER WAREHOUSE \"WH\" RESUME", Ok(()))
            .expect_query(&show_by_id_sql("WH"), Ok(show_result(&[&resumed])))
            .expect_exec("ALTER WAREHOUSE \"WH\" RESUME IF SUSPENDED", Ok(()));

        let warehouses = client.warehouses();
        let id = AccountObjectIdentifier::new("WH");

        let suspend = AlterWarehouseOptions {
            suspend: Some(true),
            ..Default::default()
        };
        warehouses.alter(&ctx, &id, &suspend).await?;
        let wh = warehouses.show_by_id(&ctx, &id).await?;
        assert!(matches!(
            wh.state,
            WarehouseState::Suspended | WarehouseState::Suspending
        ));

        let resume = AlterWarehouseOptions {
            resume: Some(true),
            ..Default::default()
        };
        warehouses.alter(&ctx, &id, &resume).await?;
        let wh = warehouses.show_by_id(&ctx, &id).await?;
        assert!(wh.state.is_running());

        let resume_if_suspended = AlterWarehouseOptions {
            resume: Some(true),
            if_suspended: Some(true),
            ..Default::default()
        };
        warehouses.alter(&ctx, &id, &resume_if_suspended).await?;
        session.assert_done();
        Ok::<(), Error>(())
    })?;
    Ok(())
}

#[test]
fn test04_alter_abort_all_queries() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (session, client) = scripted_client();
        let ctx = Context::background();
        let id = AccountObjectIdentifier::new("WH");
        let busy = WarehouseRowBuilder::new("WH").load(1, 0);
        let idle = WarehouseRowBuilder::new("WH").load(0, 0);
        session
            .expect_exec("USE WAREHOUSE \"WH\"", Ok(()))
            .expect_exec_delayed(
                "CALL SYSTEM$WAIT(30)",
                Duration::from_millis(200),
                Err(Error::service(Some("000604"), "SQL execution was cancelled")),
            )
            .expect_query(&show_by_id_sql("WH"), Ok(show_result(&[&busy])))
            .expect_exec("ALTER WAREHOUSE \"WH\" ABORT ALL QUERIES", Ok(()))
            .expect_query(&show_by_id_sql("WH"), Ok(show_result(&[&idle])));

        client.session_commands().use_warehouse(&ctx, &id).await?;

        let background = {
            let client = client.clone();
            let ctx = ctx.clone();
            tokio::spawn(async move {
                client
                    .session_commands()
                    .exec_raw(&ctx, "CALL SYSTEM$WAIT(30)")
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let wh = client.warehouses().show_by_id(&ctx, &id).await?;
        assert_eq!(wh.running, 1);
        assert_eq!(wh.queued, 0);

        let abort = AlterWarehouseOptions {
            abort_all_queries: Some(true),
            ..Default::default()
        };
        client.warehouses().alter(&ctx, &id, &abort).await?;

        let outcome = background.await.expect("background task panicked");
        assert!(matches!(outcome, Err(Error::Service { .. })));

        let wh = client.warehouses().show_by_id(&ctx, &id).await?;
        assert_eq!(wh.running, 0);
        assert_eq!(wh.queued, 0);
        session.assert_done();
        Ok::<(), Error>(())
    })?;
    Ok(())
}

#[test]
fn test04_alter_set_and_unset_tags() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (session, client) = scripted_client();
        let ctx = Context::background();
        let id = AccountObjectIdentifier::new("WH");
        let tag_value = |v: &str| -> warehouse_client::Result<ResultSet> {
            Ok(scalar_result("SYSTEM$GET_TAG", RowValues::Text(v.into())))
        };
        session
            .expect_exec(
                "ALTER WAREHOUSE \"WH\" SET TAG \"TEST_DB\".\"TEST_SCHEMA\".\"TAG1\" = 'val1', \
                 \"TEST_DB\".\"TEST_SCHEMA\".\"TAG2\" = 'val2'",
                Ok(()),
            )
            .expect_query(&get_tag_sql("TAG1", "WH"), tag_value("val1"))
            .expect_query(&get_tag_sql("TAG2", "WH"), tag_value("val2"))
            .expect_exec(
                "ALTER WAREHOUSE \"WH\" UNSET TAG \"TEST_DB\".\"TEST_SCHEMA\".\"TAG1\", \
                 \"TEST_DB\".\"TEST_SCHEMA\".\"TAG2\"",
                Ok(()),
            )
            .expect_query(
                &get_tag_sql("TAG1", "WH"),
                Ok(scalar_result("SYSTEM$GET_TAG", RowValues::Null)),
            )
            .expect_query(
                &get_tag_sql("TAG2", "WH"),
                Ok(scalar_result("SYSTEM$GET_TAG", RowValues::Null)),
            );

        let warehouses = client.warehouses();
        let functions = client.system_functions();

        let set = AlterWarehouseOptions {
            set: Some(WarehouseSet {
                tag: vec![
                    TagAssociation::new(test_tag("TAG1"), "val1"),
                    TagAssociation::new(test_tag("TAG2"), "val2"),
                ],
                ..Default::default()
            }),
            ..Default::default()
        };
        warehouses.alter(&ctx, &id, &set).await?;
        let v1 = functions
            .get_tag(&ctx, &test_tag("TAG1"), &id, ObjectType::Warehouse)
            .await?;
        let v2 = functions
            .get_tag(&ctx, &test_tag("TAG2"), &id, ObjectType::Warehouse)
            .await?;
        assert_eq!(v1, "val1");
        assert_eq!(v2, "val2");

        let unset = AlterWarehouseOptions {
            unset: Some(WarehouseUnset {
                tag: vec![test_tag("TAG1"), test_tag("TAG2")],
                ..Default::default()
            }),
            ..Default::default()
        };
        warehouses.alter(&ctx, &id, &unset).await?;
        for tag in ["TAG1", "TAG2"] {
            let err = functions
                .get_tag(&ctx, &test_tag(tag), &id, ObjectType::Warehouse)
                .await
                .unwrap_err();
            assert!(matches!(err, Error::ObjectNotFound(_)));
        }
        session.assert_done();
        Ok::<(), Error>(())
    })?;
    Ok(())
}

#[test]
fn test04_alter_rejects_ambiguous_actions() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (session, client) = scripted_client();
        let ctx = Context::background();
        let id = AccountObjectIdentifier::new("WH");
        let warehouses = client.warehouses();

        let both = AlterWarehouseOptions {
            suspend: Some(true),
            resume: Some(true),
            ..Default::default()
        };
        let err = warehouses.alter(&ctx, &id, &both).await.unwrap_err();
        assert!(matches!(err, Error::ConflictingOptions(_)));

        let none = AlterWarehouseOptions::default();
        let err = warehouses.alter(&ctx, &id, &none).await.unwrap_err();
        assert!(matches!(err, Error::InvalidOptions(_)));

        let dangling = AlterWarehouseOptions {
            if_suspended: Some(true),
            ..Default::default()
        };
        let err = warehouses.alter(&ctx, &id, &dangling).await.unwrap_err();
        assert!(matches!(err, Error::InvalidOptions(_)));

        let mixed = AlterWarehouseOptions {
            set: Some(WarehouseSet {
                comment: Some("c".into()),
                tag: vec![TagAssociation::new(test_tag("TAG1"), "v")],
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = warehouses.alter(&ctx, &id, &mixed).await.unwrap_err();
        assert!(matches!(err, Error::ConflictingOptions(_)));

        assert!(session.statements().is_empty());
        Ok::<(), Error>(())
    })?;
    Ok(())
}
