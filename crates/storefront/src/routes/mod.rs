//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog (filters and overlays via query string)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/{id}          - Product detail with reviews
//!
//! # Cart
//! GET  /cart                   - Cart page
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/add               - Add one unit, redirect to return_to
//! POST /cart/update            - Set quantity (<= 0 removes), redirect to return_to
//! POST /cart/remove            - Remove line, redirect to return_to
//!
//! # Checkout
//! GET  /checkout               - Checkout form (redirects to /cart when empty)
//! POST /checkout               - Place order, show acknowledgment
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
}
