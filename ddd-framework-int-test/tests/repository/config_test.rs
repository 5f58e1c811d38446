use ddd_framework::errors::{ErrorKind, FrameworkError};
use ddd_framework::index::{IndexKey, IndexSpec, SortOrder};
use ddd_framework::repository::RepositoryConfig;
use ddd_framework::store::ConnectionConfig;
use ddd_framework_int_test::test_util::{cleanup, create_test_context, run_test};

const SHOP_CONFIG: &str = r#"{
    "connection": {"uri": "memory://shop", "database_name": "shop"},
    "repositories": [
        {
            "collection_name": "users",
            "indexes": [
                {"keys": "email", "unique": true},
                {"keys": [["status", 1], ["createdAt", -1]]}
            ]
        },
        {
            "collection_name": "articles",
            "indexes": [{"keys": [["body", "text"]]}]
        },
        {"collection_name": "audit", "indexes": []},
        {"collection_name": "events"}
    ]
}"#;

#[derive(serde::Deserialize)]
struct ShopConfig {
    connection: ConnectionConfig,
    repositories: Vec<RepositoryConfig>,
}

#[test]
fn test_load_repositories_from_json() {
    let config: ShopConfig = serde_json::from_str(SHOP_CONFIG).unwrap();
    assert!(config.connection.validate().is_ok());
    assert_eq!(config.repositories.len(), 4);

    let users = &config.repositories[0];
    assert_eq!(
        users.indexes().unwrap(),
        &[
            IndexSpec::field("email").unique(true),
            IndexSpec::new(vec![IndexKey::ascending("status"), IndexKey::descending("createdAt")]),
        ]
    );

    let articles = &config.repositories[1];
    assert_eq!(
        articles.indexes().unwrap()[0].keys()[0].order(),
        &SortOrder::named("text")
    );

    assert_eq!(config.repositories[2].indexes(), Some(&[][..]));
    assert!(!config.repositories[3].manages_indexes());
}

#[test]
fn test_invalid_declarations_fail_to_load() {
    let invalid = [
        r#"{"collection_name": "users", "indexes": [{"keys": [["email", 2]]}]}"#,
        r#"{"collection_name": "users", "indexes": [{"keys": [["a", 1], ["a", -1]]}]}"#,
        r#"{"collection_name": "users", "indexes": [{"keys": "_id"}]}"#,
        r#"{"collection_name": "", "indexes": []}"#,
        r#"{"collection_name": "users", "indexes": [
            {"keys": "email", "unique": true},
            {"keys": [["email", 1]]}
        ]}"#,
    ];

    for json in invalid {
        assert!(
            serde_json::from_str::<RepositoryConfig>(json).is_err(),
            "accepted invalid configuration {}",
            json
        );
    }
}

#[test]
fn test_built_config_round_trips_through_json() {
    let config = RepositoryConfig::new("users")
        .indexes(vec![IndexSpec::field("email").unique(true)])
        .build()
        .unwrap();

    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["collection_name"], "users");
    assert_eq!(json["indexes"][0]["unique"], true);

    let restored: RepositoryConfig = serde_json::from_value(json).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn test_builder_rejects_conflicting_uniqueness() {
    let err = RepositoryConfig::new("users")
        .indexes(vec![
            IndexSpec::field("email"),
            IndexSpec::field("email").unique(true),
        ])
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ConfigurationError);
}

#[test]
fn test_loaded_config_drives_reconciliation() {
    run_test(
        create_test_context,
        |ctx| {
            let config: ShopConfig = serde_json::from_str(SHOP_CONFIG).map_err(|err| {
                FrameworkError::new(&err.to_string(), ErrorKind::ConfigurationError)
            })?;

            for repository in config.repositories {
                ctx.accessor(repository).get_collection()?;
            }

            assert_eq!(
                ctx.index_names("users"),
                vec!["_id_", "email_1", "status_1_createdAt_-1"]
            );
            assert_eq!(ctx.index_names("articles"), vec!["_id_", "body_text"]);
            assert_eq!(ctx.index_names("audit"), vec!["_id_"]);
            assert_eq!(ctx.index_names("events"), vec!["_id_"]);
            Ok(())
        },
        cleanup,
    )
}
