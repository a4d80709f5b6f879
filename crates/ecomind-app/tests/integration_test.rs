use ecomind_app::config::AppConfig;
use ecomind_app::lifecycle::EcoMindSystem;
use ecomind_app::model::RequirementsForm;
use ecomind_app::view;
use resource_controller::mock::MockTransport;
use resource_controller::TransportError;
use serde_json::json;

fn system(mock: &MockTransport) -> EcoMindSystem {
    EcoMindSystem::with_transport(mock.transport(), &AppConfig::default())
}

/// Walks through every page against one mocked backend.
#[tokio::test]
async fn test_full_site_walkthrough() {
    let mock = MockTransport::new();
    mock.expect_get("/api/business-specification").return_ok(json!({
        "id": 1,
        "name": "Green Grocer",
        "description": "Local produce",
        "requirements": [{ "id": 1, "title": "Solar", "details": "Roof panels" }]
    }));
    mock.expect_get("/api/data")
        .return_ok(json!([{ "id": 1, "name": "Product A" }, { "id": 2, "name": "Product B" }]));
    mock.expect_post("/api/requirements").return_ok(json!({}));
    mock.expect_post("/api/testimonials").return_ok(json!({}));

    let system = system(&mock);

    // 1. Specification page
    system.business_spec.load().settled().await.unwrap();
    let page = system.business_spec.render();
    assert!(page.contains("Name: Green Grocer"));
    assert!(page.contains("* Solar: Roof panels [Remove]"));

    // 2. Data list
    system.data_list.load().settled().await.unwrap();
    assert_eq!(
        system.data_list.render(),
        "- Product A\n- Product B\n[Fetch data]"
    );

    // 3. Requirements form, then navigation
    system
        .requirements
        .submit(&RequirementsForm::new("Solar: 10kW"))
        .settled()
        .await
        .unwrap();
    assert_eq!(system.history.current().as_deref(), Some("/success"));

    // 4. Testimonial
    system.testimonials.edit(|form| {
        form.name = "Ada".into();
        form.email = "ada@example.com".into();
        form.message = "Great".into();
    });
    system.testimonials.submit().settled().await.unwrap();
    assert!(system.testimonials.form().name.is_empty());

    assert_eq!(mock.call_count(), 4);
    mock.verify();
}

/// A failing page does not affect the others.
#[tokio::test]
async fn test_pages_fail_independently() {
    let mock = MockTransport::new();
    mock.expect_get("/api/business-specification")
        .return_err(TransportError::Network("connection refused".into()));
    mock.expect_get("/api/data").return_ok(json!([]));

    let system = system(&mock);
    system.business_spec.load().settled().await.unwrap();
    system.data_list.load().settled().await.unwrap();

    assert_eq!(system.business_spec.render(), "Failed to load business specification.");
    assert!(system.data_list.render().starts_with(view::NO_DATA));
    mock.verify();
}

/// The data list follows the configured endpoint.
#[tokio::test]
async fn test_configured_data_endpoint() {
    let mock = MockTransport::new();
    mock.expect_get("/api/products").return_ok(json!([]));

    let config = AppConfig {
        data_endpoint: "/api/products".into(),
        ..AppConfig::default()
    };
    let system = EcoMindSystem::with_transport(mock.transport(), &config);
    system.data_list.load().settled().await.unwrap();

    assert!(system.data_list.state().is_success());
    mock.verify();
}
