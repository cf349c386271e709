//! Integration tests for the DirectOne storefront.
//!
//! The storefront router is driven in-process with `tower::ServiceExt::oneshot`,
//! so no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p directone-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Catalog page, filters, product detail
//! - `storefront_cart` - Cart mutations and session isolation
//! - `storefront_checkout` - Checkout validation and order placement
//! - `storefront_platform` - Health, static assets, response headers

#![allow(clippy::missing_panics_doc)]

use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use directone_core::Catalog;
use directone_storefront::{
    config::StorefrontConfig, middleware::SESSION_COOKIE_NAME, state::AppState,
};
use tower::ServiceExt;

/// Largest response body the helpers will buffer.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Configuration pointing at this repository's static assets.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static"),
        ..StorefrontConfig::default()
    }
}

/// A storefront instance. Browsers opened on the same app share its
/// session store, but each has its own cookie.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Storefront serving the built-in DirectOne catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(Catalog::directone().clone())
    }

    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            router: directone_storefront::app(AppState::new(test_config(), catalog)),
        }
    }

    /// A fresh visitor with no session cookie.
    #[must_use]
    pub fn browser(&self) -> Browser {
        Browser {
            router: self.router.clone(),
            cookie: None,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A visitor that keeps the session cookie between requests.
///
/// Clones share the cookie held at the time of cloning, like tabs of one
/// browser.
#[derive(Clone)]
pub struct Browser {
    router: Router,
    cookie: Option<String>,
}

/// A buffered response.
#[derive(Debug)]
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
}

impl Browser {
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::get(uri);
        self.send(request, Body::empty()).await
    }

    /// POST an urlencoded form body, e.g. `product_id=2&return_to=/`.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let request = Request::post(uri).header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
        self.send(request, Body::from(form.to_owned())).await
    }

    /// Add one unit of a product and return the redirect response.
    pub async fn add_to_cart(&mut self, product_id: i32) -> TestResponse {
        self.post_form("/cart/add", &format!("product_id={product_id}&return_to=/"))
            .await
    }

    /// Current cart badge count, read from `GET /cart/count`.
    pub async fn cart_count(&mut self) -> u32 {
        let response = self.get("/cart/count").await;
        assert_eq!(response.status, StatusCode::OK);
        let start = response.body.find('>').expect("badge markup") + 1;
        let end = response.body.rfind("</span>").expect("badge markup");
        response
            .body
            .get(start..end)
            .expect("badge markup")
            .trim()
            .parse()
            .expect("numeric badge")
    }

    async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = request.body(body).expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        for value in response.headers().get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            if let Some(pair) = value.split(';').next()
                && pair.starts_with(&format!("{SESSION_COOKIE_NAME}="))
            {
                self.cookie = Some(pair.to_owned());
            }
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("readable body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
