use std::{net::TcpListener, sync::Arc, time::Duration};

use actix_web::web;
use reqwest::{header, Client, ClientBuilder, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use storefront::{start_http_server, state::ApplicationStateInner};
use storefront_configuration::CatalogConfiguration;
use storefront_database::store::InMemoryCatalogStore;

use crate::TestResponse;

pub const TEST_USER_AGENT: &str = concat!("storefront-e2e-test/", env!("CARGO_PKG_VERSION"));


/// A real storefront HTTP server listening on an ephemeral local port,
/// backed by a fresh [`InMemoryCatalogStore`].
///
/// The server runs on the current tokio runtime and stops with it.
pub struct TestServer {
    base_url: String,

    client: Client,

    store: Arc<InMemoryCatalogStore>,
}

impl TestServer {
    /// Starts a server with the default catalog configuration
    /// (`restrict` deletion policy, `422` on validation failures).
    pub async fn start() -> Self {
        Self::start_with_catalog_configuration(CatalogConfiguration::default()).await
    }

    pub async fn start_with_catalog_configuration(catalog: CatalogConfiguration) -> Self {
        let listener =
            TcpListener::bind("127.0.0.1:0").expect("failed to bind to an ephemeral port");
        let port = listener
            .local_addr()
            .expect("failed to read the bound address")
            .port();

        let store = Arc::new(InMemoryCatalogStore::new());

        let state = web::Data::new(ApplicationStateInner::new(catalog, store.clone()));

        let server = start_http_server(state, listener).expect("failed to set up HTTP server");
        tokio::spawn(server);


        let client = ClientBuilder::new()
            .user_agent(TEST_USER_AGENT)
            .build()
            .expect("failed to set up reqwest client");

        let test_server = Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client,
            store,
        };

        test_server.wait_until_alive().await;

        test_server
    }

    async fn wait_until_alive(&self) {
        for _ in 0..50 {
            let ping_result = self
                .client
                .get(format!("{}/api/health/ping", self.base_url))
                .send()
                .await;

            if let Ok(response) = ping_result {
                if response.status() == StatusCode::OK {
                    return;
                }
            }

            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        panic!("test server did not respond to pings");
    }

    /// The store behind the server, for inspecting state directly.
    pub fn store(&self) -> &InMemoryCatalogStore {
        &self.store
    }

    pub fn request<U>(&self, method: Method, endpoint: U) -> TestRequestBuilder
    where
        U: AsRef<str>,
    {
        let request_builder = self
            .client
            .request(method, format!("{}{}", self.base_url, endpoint.as_ref()));

        TestRequestBuilder { request_builder }
    }
}


pub struct TestRequestBuilder {
    request_builder: RequestBuilder,
}

impl TestRequestBuilder {
    pub fn with_json_body<V>(mut self, value: V) -> Self
    where
        V: Serialize,
    {
        let serialized_body = serde_json::to_vec(&value).expect("failed to serialize value to JSON");

        self.request_builder = self.request_builder.body(serialized_body);
        self.request_builder = self
            .request_builder
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());

        self
    }

    /// Sends `body` as-is, with the given content type.
    pub fn with_raw_body<B>(mut self, content_type: &str, body: B) -> Self
    where
        B: Into<Vec<u8>>,
    {
        self.request_builder = self.request_builder.body(body.into());
        self.request_builder = self
            .request_builder
            .header(header::CONTENT_TYPE, content_type);

        self
    }

    pub async fn send(self) -> TestResponse {
        let response = self
            .request_builder
            .send()
            .await
            .expect("failed to perform HTTP request");

        TestResponse::from_reqwest_response(response).await
    }
}
