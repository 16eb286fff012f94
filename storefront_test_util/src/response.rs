use std::fmt::Debug;

use bytes::Bytes;
use reqwest::{
    header::{self, HeaderMap},
    Response,
    StatusCode,
};
use serde::de::DeserializeOwned;
use storefront_core::api_models::{ErrorReason, ResponseWithErrorReason};

pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body_bytes: Bytes,
}

impl TestResponse {
    pub(crate) async fn from_reqwest_response(response: Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().to_owned(),
            body_bytes: response
                .bytes()
                .await
                .expect("failed to extract body from response"),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn assert_status_equals(&self, status_code: StatusCode) {
        assert_eq!(
            self.status,
            status_code,
            "unexpected status code, body: {}",
            String::from_utf8_lossy(&self.body_bytes)
        );
    }

    pub fn assert_json_content_type(&self) {
        let content_type = self
            .headers
            .get(header::CONTENT_TYPE)
            .expect("response has no content type")
            .to_str()
            .expect("content type is not valid ASCII");

        assert!(content_type.starts_with(mime::APPLICATION_JSON.as_ref()));
    }

    pub fn json_body<D>(&self) -> D
    where
        D: DeserializeOwned,
    {
        serde_json::from_slice::<D>(&self.body_bytes).expect("failed to deserialize body as JSON")
    }

    pub fn assert_json_body_matches<D>(&self, expected_content: D)
    where
        D: DeserializeOwned + PartialEq + Debug,
    {
        let data = self.json_body::<D>();

        assert_eq!(data, expected_content);
    }

    /// Deserializes the body as `{"reason": ...}` and returns the reason.
    pub fn error_reason(&self) -> ErrorReason {
        self.json_body::<ResponseWithErrorReason>().reason
    }
}
