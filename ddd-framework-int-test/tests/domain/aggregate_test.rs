use chrono::{Local, TimeZone};
use ddd_framework::domain::{
    Aggregate, DomainEvent, Entity, Event, Id, Identifier, RawId, Repository, TypedId, ValueObject,
};
use ddd_framework::errors::FrameworkResult;
use ddd_framework::index::IndexSpec;
use ddd_framework::repository::{CollectionAccessor, CollectionRepository, RepositoryConfig};
use ddd_framework::store::Connection;
use ddd_framework_int_test::test_util::{cleanup, create_test_context, run_test};
use serde::Deserialize;

struct Customer;

type OrderId = TypedId<Order>;
type CustomerId = TypedId<Customer>;

#[derive(Clone, Debug, PartialEq, Deserialize)]
struct Money {
    amount: i64,
    currency: String,
}

impl ValueObject for Money {}

#[derive(Debug)]
struct OrderPlaced {
    event: Event,
    order_id: OrderId,
}

impl DomainEvent for OrderPlaced {
    fn occurred_at(&self) -> chrono::DateTime<Local> {
        self.event.occurred_at()
    }
}

#[derive(Debug, Deserialize)]
struct Order {
    #[serde(default)]
    id: Option<OrderId>,
    customer_id: CustomerId,
    total: Money,
    #[serde(skip)]
    pending_events: Vec<OrderPlaced>,
}

impl Order {
    fn place(&mut self, id: OrderId, event: Event) {
        self.id = Some(id.clone());
        self.pending_events.push(OrderPlaced { event, order_id: id });
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> Option<&OrderId> {
        self.id.as_ref()
    }
}

impl Aggregate for Order {}

struct OrderRepository {
    accessor: CollectionAccessor,
}

impl OrderRepository {
    fn new(connection: Connection) -> FrameworkResult<Self> {
        let config = RepositoryConfig::new("orders")
            .indexes(vec![IndexSpec::field("customer_id")])
            .build()?;
        Ok(OrderRepository {
            accessor: CollectionAccessor::new(connection, config),
        })
    }
}

impl Repository for OrderRepository {
    type Aggregate = Order;
}

impl CollectionRepository for OrderRepository {
    fn accessor(&self) -> &CollectionAccessor {
        &self.accessor
    }
}

#[test]
fn test_aggregate_structured_from_document() {
    let order: Order = serde_json::from_str(
        r#"{
            "id": {"id": 17},
            "customer_id": "c-1",
            "total": {"amount": 1250, "currency": "EUR"}
        }"#,
    )
    .unwrap();

    assert_eq!(order.id().map(|id| id.raw_id()), Some(&RawId::Int(17)));
    assert_eq!(order.customer_id, CustomerId::new("c-1"));
    assert_eq!(
        order.total,
        Money {
            amount: 1250,
            currency: "EUR".to_string()
        }
    );
    assert!(order.pending_events.is_empty());
}

#[test]
fn test_loaded_copies_share_identity() {
    let document = r#"{"id": 17, "customer_id": {"id": "c-1"}, "total": {"amount": 5, "currency": "EUR"}}"#;
    let first: Order = serde_json::from_str(document).unwrap();
    let second: Order = serde_json::from_str(document).unwrap();

    assert!(first.same_identity_as(&second));
    assert_eq!(first.identity_hash(), second.identity_hash());
}

#[test]
fn test_new_aggregate_gains_identity_when_placed() {
    let mut order: Order = serde_json::from_str(
        r#"{"customer_id": "c-2", "total": {"amount": 99, "currency": "USD"}}"#,
    )
    .unwrap();
    assert!(order.id().is_none());
    assert!(!order.same_identity_as(&order));

    let placed_at = Local.with_ymd_and_hms(2024, 3, 9, 10, 30, 0).unwrap();
    order.place(OrderId::from_raw_id(RawId::from("o-1")), Event::at(placed_at));

    assert_eq!(order.id(), Some(&OrderId::new("o-1")));
    assert_eq!(order.pending_events.len(), 1);
    assert_eq!(order.pending_events[0].occurred_at(), placed_at);
    assert_eq!(order.pending_events[0].order_id.id(), &Id::from_raw_id("o-1"));
    assert!(order.pending_events[0].event_name().ends_with("OrderPlaced"));
}

#[test]
fn test_domain_repository_is_backed_by_reconciled_collection() {
    run_test(
        create_test_context,
        |ctx| {
            let orders = OrderRepository::new(ctx.connection())?;
            assert_eq!(orders.aggregate_name(), "Order");
            assert_eq!(orders.collection_name(), "orders");

            orders.collection()?;
            assert_eq!(ctx.index_names("orders"), vec!["_id_", "customer_id_1"]);
            Ok(())
        },
        cleanup,
    )
}
