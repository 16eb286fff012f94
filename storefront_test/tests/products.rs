use std::collections::BTreeMap;

use storefront_core::{price::format_price, validation::INVALID_CATEGORY_REFERENCE_MESSAGE};
use storefront_test_util::prelude::*;


fn validation_fields(reason: ErrorReason) -> BTreeMap<String, Vec<String>> {
    match reason {
        ErrorReason::Validation { fields } => fields,
        other => panic!("expected a validation error reason, got {:?}", other),
    }
}


#[tokio::test]
async fn product_can_be_created() {
    let server = TestServer::start().await;

    let board_games = create_sample_category(&server, SampleCategory::BoardGames).await;

    let response = server
        .request(Method::POST, "/api/products")
        .with_json_body(ProductCreationRequest {
            name: "Chess set".to_string(),
            description: Some("Wooden pieces with a folding board.".to_string()),
            price_in_cents: 2599,
            category_id: board_games.id,
        })
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);
    response.assert_json_content_type();

    let body = response.json_body::<ProductCreationResponse>();
    assert!(body.success);

    let product = body.product;
    assert_eq!(product.name, "Chess set");
    assert_eq!(
        product.description.as_deref(),
        Some("Wooden pieces with a folding board.")
    );
    assert_eq!(product.price_in_cents, 2599);
    assert_eq!(product.formatted_price, "25,99 €");
    assert_eq!(product.category_id, board_games.id);
    assert_eq!(
        product.category,
        Some(CategorySummary {
            id: board_games.id,
            name: SampleCategory::BoardGames.name().to_string(),
        })
    );

    assert_eq!(server.store().product_count().await, 1);
}


#[tokio::test]
async fn formatted_prices_match_the_price_formatter() {
    let server = TestServer::start().await;

    let audio = create_sample_category(&server, SampleCategory::Audio).await;

    for price_in_cents in [1, 99, 100, 123456, 100000000] {
        let product =
            create_product_in_category(&server, audio.id, "Speaker", price_in_cents).await;

        assert_eq!(
            product.formatted_price,
            format_price(price_in_cents).unwrap()
        );
    }
}


#[tokio::test]
async fn integer_fields_may_be_sent_as_strings() {
    let server = TestServer::start().await;

    let books = create_sample_category(&server, SampleCategory::Books).await;

    let response = server
        .request(Method::POST, "/api/products")
        .with_json_body(json!({
            "name": "  Dune  ",
            "price_in_cents": "1299",
            "category_id": books.id.to_string(),
        }))
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);

    let product = response.json_body::<ProductCreationResponse>().product;
    assert_eq!(product.name, "Dune");
    assert_eq!(product.price_in_cents, 1299);
    assert_eq!(product.category_id, books.id);
    assert_eq!(product.description, None);
}


#[tokio::test]
async fn blank_description_is_stored_as_null() {
    let server = TestServer::start().await;

    let books = create_sample_category(&server, SampleCategory::Books).await;

    let response = server
        .request(Method::POST, "/api/products")
        .with_json_body(json!({
            "name": "Dune",
            "description": "   ",
            "price_in_cents": 1299,
            "category_id": books.id,
        }))
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);

    let product = response.json_body::<Value>()["product"].clone();
    assert_eq!(product["description"], Value::Null);
}


#[tokio::test]
async fn every_invalid_field_is_reported_at_once() {
    let server = TestServer::start().await;

    let response = server
        .request(Method::POST, "/api/products")
        .with_json_body(json!({
            "name": "",
            "description": "abc",
            "price_in_cents": 0,
            "category_id": "first",
        }))
        .send()
        .await;

    response.assert_status_equals(StatusCode::UNPROCESSABLE_ENTITY);

    let fields = validation_fields(response.error_reason());

    assert_eq!(
        fields.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["category_id", "description", "name", "price_in_cents"]
    );
    assert_eq!(fields["name"], vec!["The name field is required."]);
    assert_eq!(
        fields["description"],
        vec!["The description must be at least 5 characters."]
    );
    assert_eq!(
        fields["price_in_cents"],
        vec!["The price in cents must be at least 1."]
    );
    assert_eq!(
        fields["category_id"],
        vec!["The category id must be an integer."]
    );

    assert_eq!(server.store().product_count().await, 0);
}


#[tokio::test]
async fn missing_fields_are_required() {
    let server = TestServer::start().await;

    let response = server
        .request(Method::POST, "/api/products")
        .with_json_body(json!({}))
        .send()
        .await;

    response.assert_status_equals(StatusCode::UNPROCESSABLE_ENTITY);

    let fields = validation_fields(response.error_reason());

    assert_eq!(fields["name"], vec!["The name field is required."]);
    assert_eq!(
        fields["price_in_cents"],
        vec!["The price in cents field is required."]
    );
    assert_eq!(
        fields["category_id"],
        vec!["The category id field is required."]
    );
    assert!(!fields.contains_key("description"));
}


#[tokio::test]
async fn product_must_reference_an_existing_category() {
    let server = TestServer::start().await;

    let response = server
        .request(Method::POST, "/api/products")
        .with_json_body(ProductCreationRequest {
            name: "Orphan".to_string(),
            description: None,
            price_in_cents: 500,
            category_id: CategoryId::new(12345),
        })
        .send()
        .await;

    response.assert_status_equals(StatusCode::UNPROCESSABLE_ENTITY);

    let fields = validation_fields(response.error_reason());
    assert_eq!(
        fields["category_id"],
        vec![INVALID_CATEGORY_REFERENCE_MESSAGE.to_string()]
    );

    assert_eq!(server.store().product_count().await, 0);
}


#[tokio::test]
async fn product_validation_uses_the_configured_status_code() {
    let server = TestServer::start_with_catalog_configuration(CatalogConfiguration {
        validation_failure_status_code: 400,
        ..CatalogConfiguration::default()
    })
    .await;

    let response = server
        .request(Method::POST, "/api/products")
        .with_json_body(json!({ "name": "Dune" }))
        .send()
        .await;

    response.assert_status_equals(StatusCode::BAD_REQUEST);
    assert!(matches!(
        response.error_reason(),
        ErrorReason::Validation { .. }
    ));
}


#[tokio::test]
async fn array_bodies_are_rejected() {
    let server = TestServer::start().await;

    let books = create_sample_category(&server, SampleCategory::Books).await;

    let response = server
        .request(Method::POST, "/api/products")
        .with_json_body(json!(["Dune", "A desert planet.", 1299, books.id]))
        .send()
        .await;

    response.assert_status_equals(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error_reason(),
        ErrorReason::invalid_json_body(InvalidJsonBodyReason::InvalidData)
    );

    assert_eq!(server.store().product_count().await, 0);
}


#[tokio::test]
async fn descriptions_with_control_characters_are_rejected() {
    let server = TestServer::start().await;

    let books = create_sample_category(&server, SampleCategory::Books).await;

    let response = server
        .request(Method::POST, "/api/products")
        .with_json_body(json!({
            "name": "Dune",
            "description": "A desert\u{0000}planet.",
            "price_in_cents": 1299,
            "category_id": books.id,
        }))
        .send()
        .await;

    response.assert_status_equals(StatusCode::UNPROCESSABLE_ENTITY);

    let fields = validation_fields(response.error_reason());
    assert_eq!(
        fields["description"],
        vec!["The description must not contain control characters."]
    );
}


#[tokio::test]
async fn product_creation_requires_a_json_body() {
    let server = TestServer::start().await;

    let response = server
        .request(Method::POST, "/api/products")
        .with_raw_body("text/plain", "name=Dune")
        .send()
        .await;

    response.assert_status_equals(StatusCode::BAD_REQUEST);
    assert_eq!(response.error_reason(), ErrorReason::missing_json_body());
}
