use reqwest::{Method, StatusCode};
use storefront_core::{
    api_models::{Product, ProductCreationRequest, ProductCreationResponse},
    ids::CategoryId,
};

use crate::TestServer;


pub async fn create_product_in_category(
    server: &TestServer,
    category_id: CategoryId,
    name: &str,
    price_in_cents: i64,
) -> Product {
    let creation_response = server
        .request(Method::POST, "/api/products")
        .with_json_body(ProductCreationRequest {
            name: name.to_string(),
            description: Some(format!("{} (sample product)", name)),
            price_in_cents,
            category_id,
        })
        .send()
        .await;

    creation_response.assert_status_equals(StatusCode::OK);

    let response_body = creation_response.json_body::<ProductCreationResponse>();
    assert!(response_body.success);

    response_body.product
}
