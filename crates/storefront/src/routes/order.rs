//! Direct single-product order over WhatsApp.
//!
//! The product card's "order now" button bypasses the cart: the current
//! selection becomes a short enquiry message and the browser is redirected
//! to the shop's WhatsApp chat.

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use tracing::instrument;

use crate::error::Result;
use crate::routes::cart::SelectionForm;
use crate::state::AppState;

/// Redirect to a WhatsApp chat pre-filled with the selection.
#[instrument(skip(state, query), fields(product_id = %query.product_id))]
pub async fn order(
    State(state): State<AppState>,
    Query(query): Query<SelectionForm>,
) -> Result<Redirect> {
    let selection = query.resolve(state.catalog())?;
    let url = state.checkout().deep_link(&selection.order_summary());

    tracing::info!(
        quantity = selection.quantity(),
        total = %selection.total_price(),
        "Direct order handed off to WhatsApp"
    );

    Ok(Redirect::to(&url))
}
