use ddd_framework::errors::ErrorKind;
use ddd_framework::index::{ExistingIndex, IndexKey, IndexPlan, IndexReconciler, IndexSpec, SortOrder};
use ddd_framework_int_test::test_util::{cleanup, create_test_context, run_test, StoreOp};
use std::collections::HashSet;

fn user_indexes() -> Vec<IndexSpec> {
    vec![
        IndexSpec::field("email").unique(true),
        IndexSpec::new(vec![IndexKey::descending("createdAt")]),
    ]
}

#[test]
fn test_fresh_collection_gets_all_indexes_in_one_batch() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.collection("users")?;
            ctx.journal().clear();

            let plan = IndexReconciler::reconcile(&collection, &user_indexes())?;
            assert!(plan.to_drop().is_empty());
            assert_eq!(plan.to_create(), user_indexes().as_slice());

            assert_eq!(
                ctx.journal().ops(),
                vec![
                    StoreOp::ListIndexes,
                    StoreOp::CreateIndexes(vec!["email_1".to_string(), "createdAt_-1".to_string()]),
                ]
            );
            assert_eq!(ctx.index_names("users"), vec!["_id_", "email_1", "createdAt_-1"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_matching_collection_is_left_alone() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.seed_indexes("users", &user_indexes())?;
            let collection = ctx.collection("users")?;
            ctx.journal().clear();

            let plan = IndexReconciler::reconcile(&collection, &user_indexes())?;
            assert!(plan.is_empty());
            assert_eq!(ctx.journal().ops(), vec![StoreOp::ListIndexes]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_obsolete_and_changed_indexes_are_replaced() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.seed_indexes(
                "users",
                &[IndexSpec::field("legacy"), IndexSpec::field("email")],
            )?;
            let collection = ctx.collection("users")?;
            ctx.journal().clear();

            let desired = vec![IndexSpec::field("email").unique(true), IndexSpec::field("status")];
            IndexReconciler::reconcile(&collection, &desired)?;

            // drops always precede the creation batch
            assert_eq!(
                ctx.journal().ops(),
                vec![
                    StoreOp::ListIndexes,
                    StoreOp::DropIndex("email_1".to_string()),
                    StoreOp::DropIndex("legacy_1".to_string()),
                    StoreOp::CreateIndexes(vec!["email_1".to_string(), "status_1".to_string()]),
                ]
            );
            assert_eq!(ctx.index_shapes("users")?, desired);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_key_order_is_part_of_identity() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.seed_indexes(
                "orders",
                &[IndexSpec::new(vec![IndexKey::ascending("a"), IndexKey::ascending("b")])],
            )?;
            let collection = ctx.collection("orders")?;
            ctx.journal().clear();

            let desired = vec![IndexSpec::new(vec![IndexKey::ascending("b"), IndexKey::ascending("a")])];
            IndexReconciler::reconcile(&collection, &desired)?;

            assert_eq!(
                ctx.journal().mutations(),
                vec![
                    StoreOp::DropIndex("a_1_b_1".to_string()),
                    StoreOp::CreateIndexes(vec!["b_1_a_1".to_string()]),
                ]
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_sort_direction_is_part_of_identity() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.seed_indexes("orders", &[IndexSpec::field("placedAt")])?;
            let collection = ctx.collection("orders")?;

            let desired = vec![IndexSpec::new(vec![IndexKey::descending("placedAt")])];
            IndexReconciler::reconcile(&collection, &desired)?;

            assert_eq!(ctx.index_names("orders"), vec!["_id_", "placedAt_-1"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_empty_declaration_keeps_only_primary_key_index() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.seed_indexes("logs", &[IndexSpec::field("level"), IndexSpec::field("source")])?;
            let collection = ctx.collection("logs")?;
            ctx.journal().clear();

            IndexReconciler::reconcile(&collection, &[])?;

            assert_eq!(ctx.index_names("logs"), vec!["_id_"]);
            assert!(!ctx
                .journal()
                .mutations()
                .contains(&StoreOp::DropIndex("_id_".to_string())));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_declaring_primary_key_index_is_rejected_before_store_access() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.collection("users")?;
            ctx.journal().clear();

            let err = IndexReconciler::reconcile(&collection, &[IndexSpec::field("_id").unique(true)])
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::ConfigurationError);
            assert!(ctx.journal().is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_duplicate_declarations_create_one_index() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.collection("orders")?;
            ctx.journal().clear();

            let desired = vec![IndexSpec::field("status"), IndexSpec::field("status")];
            let plan = IndexReconciler::reconcile(&collection, &desired)?;

            assert_eq!(plan.to_create(), &[IndexSpec::field("status")]);
            assert_eq!(
                ctx.journal().mutations(),
                vec![StoreOp::CreateIndexes(vec!["status_1".to_string()])]
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_reconciliation_converges_and_is_idempotent() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.seed_indexes(
                "users",
                &[IndexSpec::field("nickname"), IndexSpec::field("email")],
            )?;
            let collection = ctx.collection("users")?;
            let desired = vec![
                IndexSpec::field("email").unique(true),
                IndexSpec::new(vec![IndexKey::ascending("status"), IndexKey::descending("createdAt")]),
                IndexSpec::field("nickname"),
            ];

            IndexReconciler::reconcile(&collection, &desired)?;
            let actual: HashSet<IndexSpec> = ctx.index_shapes("users")?.into_iter().collect();
            let expected: HashSet<IndexSpec> = desired.iter().cloned().collect();
            assert_eq!(actual, expected);

            ctx.journal().clear();
            let plan = IndexReconciler::reconcile(&collection, &desired)?;
            assert!(plan.is_empty());
            assert!(ctx.journal().mutations().is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_special_index_kinds_are_reconciled() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.collection("articles")?;
            let desired = vec![IndexSpec::new(vec![IndexKey::new("body", SortOrder::named("text"))])];

            IndexReconciler::reconcile(&collection, &desired)?;
            assert_eq!(ctx.index_names("articles"), vec!["_id_", "body_text"]);

            let plan = IndexReconciler::reconcile(&collection, &desired)?;
            assert!(plan.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_store_assigned_names_are_ignored() {
    let existing = vec![
        ExistingIndex::new("_id_", vec![IndexKey::ascending("_id")], Some(true)),
        ExistingIndex::new("by_email", vec![IndexKey::ascending("email")], Some(true)),
        ExistingIndex::new("email_1", vec![IndexKey::ascending("email")], None),
    ];

    let plan = IndexPlan::compute(&existing, &[IndexSpec::field("email").unique(true)]);
    assert_eq!(plan.to_drop().iter().collect::<Vec<_>>(), vec!["email_1"]);
    assert!(plan.to_create().is_empty());
}
