use resource_controller::mock::MockTransport;
use resource_controller::{
    Dispatch, FieldKind, PayloadShape, RecordShape, ResourceController, ResourceState, Status,
    TransportError,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq, Deserialize)]
struct Product {
    id: u64,
    name: String,
}

fn products(mock: &MockTransport) -> ResourceController<Vec<Product>> {
    ResourceController::new("products", "/api/data", mock.transport()).with_shape(
        PayloadShape::Collection(
            RecordShape::new()
                .required("id", FieldKind::Unsigned)
                .required("name", FieldKind::String)
                .identified_by("id")
                .strict(),
        ),
    )
}

/// Full lifecycle of one controller: load, failed reload, submit, reset.
#[tokio::test]
async fn test_full_resource_lifecycle() {
    let mock = MockTransport::new();
    mock.expect_get("/api/data")
        .return_ok(json!([{ "id": 1, "name": "Product A" }, { "id": 2, "name": "Product B" }]));
    mock.expect_get("/api/data").return_err(TransportError::Status {
        path: "/api/data".into(),
        status: 502,
    });
    mock.expect_post("/api/data").return_ok(json!({ "id": 3 }));

    let controller = products(&mock);
    let transitions = Arc::new(Mutex::new(Vec::new()));
    let sink = transitions.clone();
    controller.on_transition(move |state| sink.lock().unwrap().push(state.status()));

    // 1. Initial load
    controller.load().settled().await.unwrap();
    let names: Vec<String> = controller
        .current_state()
        .data()
        .unwrap()
        .iter()
        .map(|p| p.name.clone())
        .collect();
    assert_eq!(names, vec!["Product A", "Product B"]);

    // 2. Reload fails; the list is still available as last-known data
    controller.load().settled().await.unwrap();
    let state = controller.current_state();
    assert_eq!(state.status(), Status::Failure);
    assert_eq!(state.data().unwrap().len(), 2);
    assert_eq!(
        state.error().unwrap().to_string(),
        "Request to /api/data failed with HTTP 502"
    );

    // 3. Submit succeeds and clears the failure
    let cleared = Arc::new(AtomicUsize::new(0));
    let effect = cleared.clone();
    controller
        .submit_with(&json!({ "name": "Product C" }), move |_| {
            effect.fetch_add(1, Ordering::SeqCst);
        })
        .settled()
        .await
        .unwrap();
    assert!(controller.current_state().is_idle());
    assert_eq!(cleared.load(Ordering::SeqCst), 1);

    // 4. Reset is a no-op from idle but still a transition
    controller.reset();

    assert_eq!(
        *transitions.lock().unwrap(),
        vec![
            Status::Pending,
            Status::Success,
            Status::Pending,
            Status::Failure,
            Status::Pending,
            Status::Idle,
            Status::Idle,
        ]
    );
    mock.verify();
}

/// Two controllers for the same endpoint never share state.
#[tokio::test]
async fn test_controllers_are_isolated() {
    let healthy = MockTransport::new();
    healthy.expect_get("/api/data").return_ok(json!([]));
    let broken = MockTransport::new();
    broken.expect_get("/api/data").return_ok(json!({ "unexpectedKey": "unexpectedValue" }));

    let first = products(&healthy);
    let second = products(&broken);

    let a = first.load();
    let b = second.load();
    assert!(a.is_started() && b.is_started());
    a.settled().await.unwrap();
    b.settled().await.unwrap();

    assert_eq!(first.current_state(), ResourceState::Success { data: vec![] });
    assert!(second.current_state().is_failure());
    healthy.verify();
    broken.verify();
}

/// Only the first of a burst of loads reaches the transport.
#[tokio::test]
async fn test_burst_of_loads_dispatches_once() {
    let mock = MockTransport::new();
    mock.expect_get("/api/data").return_ok(json!([{ "id": 1, "name": "Product A" }]));
    let controller = products(&mock);

    let dispatches: Vec<Dispatch> = (0..5).map(|_| controller.load()).collect();
    assert_eq!(dispatches.iter().filter(|d| d.is_started()).count(), 1);

    for dispatch in dispatches {
        dispatch.settled().await.unwrap();
    }
    assert_eq!(mock.call_count(), 1);
    assert!(controller.current_state().is_success());
}

/// Extra keys in a strict shape are a malformed payload, not a success.
#[tokio::test]
async fn test_unexpected_keys_fail_the_load() {
    let mock = MockTransport::new();
    mock.expect_get("/api/data").return_ok(json!([
        { "id": 1, "name": "Product A" },
        { "id": 2, "name": "Product B", "extraKey": "extraValue" }
    ]));
    let controller = products(&mock);

    controller.load().settled().await.unwrap();
    let message = controller.current_state().error().unwrap().to_string();
    assert!(message.starts_with("Unexpected data structure at $[1]"), "{message}");
}
