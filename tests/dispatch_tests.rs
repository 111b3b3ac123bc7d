//! Tests for background fetch dispatch
//!
//! Runs the real `Dispatcher` and mpsc channel against an in-memory gateway:
//! - Every effect is answered with the matching event
//! - A full startup cascade converges on a selected size
//! - Catalog failures name the first failing list

use quicklook::app::{execute, Dispatcher};
use quicklook::gateway::{
    Category, DetailQuery, FamilyQuery, Gateway, GatewayError, GatewayResult, InstanceFamily,
    InstanceProductQuery, InstanceSize, Operation, PricedProduct, Region, SizeQuery,
    VolumeProductQuery, VolumeType,
};
use quicklook::logic::cascade::{Effect, Event, SessionState};
use quicklook::types::Architecture;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

/// In-memory pricing backend
#[derive(Default)]
struct FakeGateway {
    fail_regions: bool,
    size_calls: AtomicUsize,
}

impl Gateway for FakeGateway {
    fn regions(&self) -> GatewayResult<Vec<Region>> {
        if self.fail_regions {
            return Err(GatewayError::Status { status: 503, message: "unavailable".into() });
        }
        Ok(vec![Region { code: "us-east-1".into(), name: None }])
    }

    fn operations(&self) -> GatewayResult<Vec<Operation>> {
        Ok(vec![Operation { operation: "RunInstances".into(), platform: "Linux/UNIX".into() }])
    }

    fn categories(&self) -> GatewayResult<Vec<Category>> {
        Ok(vec![Category {
            category: "general".into(),
            display_name: "General purpose".into(),
            description: String::new(),
        }])
    }

    fn volume_types(&self) -> GatewayResult<Vec<VolumeType>> {
        Ok(vec![VolumeType("gp3".into())])
    }

    fn families(&self, query: &FamilyQuery) -> GatewayResult<Vec<InstanceFamily>> {
        let names: &[&str] = match query.architecture {
            Architecture::X86_64 => &["c6i", "m5", "m6i"],
            Architecture::Arm64 => &["c7g", "m7g"],
        };
        Ok(names
            .iter()
            .map(|n| InstanceFamily {
                name: n.to_string(),
                category: "general".into(),
                note: String::new(),
            })
            .collect())
    }

    fn sizes(&self, query: &SizeQuery) -> GatewayResult<Vec<InstanceSize>> {
        self.size_calls.fetch_add(1, Ordering::SeqCst);
        Ok(["xlarge", "large", "metal"]
            .iter()
            .map(|s| InstanceSize::new(format!("{}.{}", query.family, s)))
            .collect())
    }

    fn instance_product(&self, query: &InstanceProductQuery) -> GatewayResult<PricedProduct> {
        Ok(serde_json::from_value(json!({
            "listPrice": {"pricePerUnit": {"currency": "USD", "value": 70.08}, "unit": "Month"},
            "productMeta": {"instanceFamily": "General purpose", "location": query.region},
        }))
        .unwrap())
    }

    fn volume_product(&self, query: &VolumeProductQuery) -> GatewayResult<PricedProduct> {
        Ok(serde_json::from_value(json!({
            "listPrice": {"pricePerUnit": {"currency": "USD", "value": 0.08 * query.volume_size as f64}},
            "productMeta": {"volumeType": query.volume_type},
        }))
        .unwrap())
    }

    fn instance_detail(&self, query: &DetailQuery) -> GatewayResult<Value> {
        Ok(json!({"instanceType": query.instance_type}))
    }
}

/// Apply events from the channel until nothing arrives for a while
fn settle(session: &mut SessionState, dispatcher: &Dispatcher, rx: &mpsc::Receiver<Event>) {
    while let Ok(event) = rx.recv_timeout(Duration::from_millis(500)) {
        let effects = session.apply(event);
        dispatcher.dispatch_all(effects);
    }
}

#[test]
fn test_startup_cascade_converges() {
    let gateway = Arc::new(FakeGateway::default());
    let (tx, rx) = mpsc::channel();
    let dispatcher = Dispatcher::new(gateway.clone(), tx);
    let mut session = SessionState::default();

    dispatcher.dispatch_all(session.apply(Event::CatalogRequested));
    settle(&mut session, &dispatcher, &rx);

    assert_eq!(session.selection.category, "general");
    assert_eq!(session.selection.family, "m6i");
    assert_eq!(session.selection.size, "m6i.large");
    assert_eq!(session.selection.operation, "RunInstances");
    assert_eq!(gateway.size_calls.load(Ordering::SeqCst), 1);
    assert!(session.can_query());
}

#[test]
fn test_quick_look_and_detail_round_trip() {
    let gateway = Arc::new(FakeGateway::default());
    let (tx, rx) = mpsc::channel();
    let dispatcher = Dispatcher::new(gateway, tx);
    let mut session = SessionState::default();

    dispatcher.dispatch_all(session.apply(Event::CatalogRequested));
    settle(&mut session, &dispatcher, &rx);
    dispatcher.dispatch_all(session.apply(Event::QuickLookRequested));
    settle(&mut session, &dispatcher, &rx);

    assert_eq!(session.instance.priced().and_then(|p| p.price_value()), Some(70.08));
    let volume = session.volume.priced().and_then(|p| p.price_value()).unwrap();
    assert!((volume - 4.8).abs() < 1e-9);

    dispatcher.dispatch_all(session.apply(Event::DetailRequested));
    settle(&mut session, &dispatcher, &rx);
    assert_eq!(session.detail.value, Some(json!({"instanceType": "m6i.large"})));
}

#[test]
fn test_architecture_switch_refetches() {
    let gateway = Arc::new(FakeGateway::default());
    let (tx, rx) = mpsc::channel();
    let dispatcher = Dispatcher::new(gateway, tx);
    let mut session = SessionState::default();

    dispatcher.dispatch_all(session.apply(Event::CatalogRequested));
    settle(&mut session, &dispatcher, &rx);

    assert!(session.apply(Event::ArchitectureChanged(Architecture::Arm64)).is_empty());
    dispatcher.dispatch_all(session.apply(Event::CategoryChanged("general".into())));
    settle(&mut session, &dispatcher, &rx);

    assert_eq!(session.selection.family, "m7g");
    assert_eq!(session.selection.size, "m7g.large");
}

#[test]
fn test_execute_reports_catalog_failure() {
    let gateway = FakeGateway { fail_regions: true, ..Default::default() };
    let mut session = SessionState::default();
    let effect = session.apply(Event::CatalogRequested).remove(0);
    assert!(matches!(effect, Effect::FetchCatalog { .. }));

    let event = execute(&gateway, effect);
    match &event {
        Event::CatalogLoaded { result: Err(GatewayError::Status { status, .. }), .. } => {
            assert_eq!(*status, 503);
        }
        other => panic!("expected catalog failure, got {other:?}"),
    }

    session.apply(event);
    assert!(!session.catalog_loading);
    assert!(matches!(
        session.apply(Event::RetryRequested).as_slice(),
        [Effect::FetchCatalog { .. }]
    ));
}
