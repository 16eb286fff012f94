use reqwest::{Method, StatusCode};
use storefront_core::{
    api_models::{Category, CategoryCreationRequest, CategoryCreationResponse},
    ids::CategoryId,
};

use crate::TestServer;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SampleCategory {
    BoardGames,
    Books,
    Audio,
}

impl SampleCategory {
    pub fn name(&self) -> &'static str {
        match self {
            SampleCategory::BoardGames => "Board games",
            SampleCategory::Books => "Books",
            SampleCategory::Audio => "Audio",
        }
    }
}


pub async fn create_category_named<S>(server: &TestServer, name: S) -> Category
where
    S: Into<String>,
{
    let creation_response = server
        .request(Method::POST, "/api/categories")
        .with_json_body(CategoryCreationRequest { name: name.into() })
        .send()
        .await;

    creation_response.assert_status_equals(StatusCode::OK);

    creation_response
        .json_body::<CategoryCreationResponse>()
        .category
}

pub async fn create_sample_category(server: &TestServer, category: SampleCategory) -> Category {
    let created_category = create_category_named(server, category.name()).await;

    assert_eq!(created_category.name, category.name());
    assert!(created_category.products.is_empty());

    created_category
}

pub fn category_url(category_id: CategoryId) -> String {
    format!("/api/categories/{}", category_id)
}
