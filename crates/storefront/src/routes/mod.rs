//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Single-page storefront (cart drawer included)
//! GET  /health                 - Health check
//!
//! # Cart (form posts, answered with 303 redirects)
//! GET  /cart                   - Cart page
//! GET  /cart/summary           - Cart contents as JSON
//! POST /cart/add               - Add the card's selection
//! POST /cart/update            - Set a line's quantity (<= 0 removes)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! POST /cart/open              - Show the drawer
//! POST /cart/close             - Hide the drawer
//!
//! # WhatsApp hand-off
//! POST /checkout               - Send the cart as an order message
//! GET  /order                  - Send one product selection, cart untouched
//! ```

pub mod cart;
pub mod home;
pub mod order;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/summary", get(cart::summary))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .route("/order", get(order::order))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
