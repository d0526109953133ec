//! Test harness for driving the storefront router in-process.
//!
//! [`TestClient`] sends requests through [`darsi_storefront::app`] with
//! `tower::ServiceExt::oneshot` and carries the session cookie from one
//! request to the next, like a browser would.
//!
//! ```rust,ignore
//! let mut client = TestClient::new();
//! let response = client
//!     .post_form("/cart/add", &[("product_id", "small-bars")])
//!     .await;
//! assert_eq!(response.status, StatusCode::SEE_OTHER);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use darsi_core::Catalog;
use darsi_storefront::config::StorefrontConfig;
use darsi_storefront::state::AppState;
use tower::ServiceExt;

/// A browser-like client bound to one in-process storefront.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

/// A fully buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// The body parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// A client for a storefront with default configuration and the
    /// built-in catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(Catalog::builtin())
    }

    /// A client for a storefront serving `catalog`.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration fails to load.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        let config = StorefrontConfig::from_lookup(|_| None).expect("default config loads");
        let state = AppState::with_catalog(config, catalog);
        Self {
            app: darsi_storefront::app(state),
            cookie: None,
        }
    }

    /// Send a `GET`.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty());
        self.send(request).await
    }

    /// Send a urlencoded form `POST`.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)));
        self.send(request).await
    }

    /// Current cart as returned by `/cart/summary`.
    pub async fn cart_summary(&mut self) -> serde_json::Value {
        self.get("/cart/summary").await.json()
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: axum::http::Result<Request<Body>>) -> TestResponse {
        let request = request.expect("valid request");
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// Encode form fields as `application/x-www-form-urlencoded`.
#[must_use]
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// The decoded `text` parameter of a WhatsApp deep link.
///
/// # Panics
///
/// Panics if the link carries no text or the text is not valid UTF-8.
#[must_use]
pub fn whatsapp_text(link: &str) -> String {
    let (_, text) = link.split_once("?text=").expect("deep link has text");
    urlencoding::decode(text).expect("text is UTF-8").into_owned()
}
