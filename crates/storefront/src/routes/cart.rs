//! Cart route handlers.
//!
//! Every mutation is a plain form post answered with a redirect, so the page
//! works without scripts. The cart itself lives in the session and is only
//! changed through the `Cart` operations.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect},
};
use darsi_core::{Cart, CartLineItem, Catalog, LineItemKey, ProductId, ProductSelection};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::CartSession;
use crate::routes::home::ShopView;
use crate::state::AppState;

// =============================================================================
// Views
// =============================================================================

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub key: String,
    pub product_id: String,
    pub name: String,
    pub image: String,
    pub variant_label: Option<String>,
    pub flavor_label: Option<String>,
    pub quantity: u32,
    pub decrement_to: i64,
    pub increment_to: i64,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        let quantity = i64::from(item.quantity());
        Self {
            key: item.key().to_string(),
            product_id: item.product().id().to_string(),
            name: item.product().name().to_string(),
            image: item.product().image().to_string(),
            variant_label: item.variant_label().map(String::from),
            flavor_label: item.flavor_label().map(String::from),
            quantity: item.quantity(),
            decrement_to: quantity - 1,
            increment_to: quantity + 1,
            unit_price: item.unit_price().to_string(),
            line_total: item.line_total().to_string(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
    pub is_open: bool,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.total_price().to_string(),
            item_count: cart.total_item_count(),
            is_open: cart.is_open(),
        }
    }
}

/// JSON cart summary.
#[derive(Debug, Serialize)]
pub struct CartSummary {
    pub item_count: u64,
    pub total: u64,
    pub is_open: bool,
    pub lines: Vec<CartSummaryLine>,
}

/// One line of the JSON cart summary.
#[derive(Debug, Serialize)]
pub struct CartSummaryLine {
    pub key: LineItemKey,
    pub product_id: ProductId,
    pub name: String,
    pub variant: Option<String>,
    pub flavor: Option<String>,
    pub quantity: u32,
    pub unit_price: u64,
    pub line_total: u64,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        Self {
            item_count: cart.total_item_count(),
            total: cart.total_price().amount(),
            is_open: cart.is_open(),
            lines: cart
                .items()
                .iter()
                .map(|item| CartSummaryLine {
                    key: item.key(),
                    product_id: item.product().id().clone(),
                    name: item.product().name().to_string(),
                    variant: item.variant_label().map(String::from),
                    flavor: item.flavor_label().map(String::from),
                    quantity: item.quantity(),
                    unit_price: item.unit_price().amount(),
                    line_total: item.line_total().amount(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Options picked on a product card.
///
/// Shared by add-to-cart and the direct WhatsApp order. Empty fields count as
/// not submitted, so the product defaults apply.
#[derive(Debug, Deserialize)]
pub struct SelectionForm {
    pub product_id: String,
    pub variant: Option<String>,
    pub flavor: Option<String>,
    pub quantity: Option<String>,
}

impl SelectionForm {
    /// Apply the submitted options to a fresh selection of the product.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown product, `Selection` for a variant or flavor
    /// the product does not offer, `BadRequest` for a non-numeric quantity.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Result<ProductSelection<'a>> {
        let product_id = ProductId::new(self.product_id.trim());
        let product = catalog
            .find(&product_id)
            .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

        let mut selection = ProductSelection::new(product);
        if let Some(label) = non_empty(self.variant.as_deref()) {
            selection.select_variant(label)?;
        }
        if let Some(name) = non_empty(self.flavor.as_deref()) {
            selection.select_flavor(name)?;
        }
        if let Some(raw) = non_empty(self.quantity.as_deref()) {
            let quantity = raw
                .parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("invalid quantity {raw:?}")))?;
            selection.set_quantity(quantity);
        }
        Ok(selection)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub line_key: String,
    pub quantity: i64,
    pub return_to: Option<String>,
}

/// Remove line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_key: String,
    pub return_to: Option<String>,
}

/// Forms that only say where to go back to.
#[derive(Debug, Default, Deserialize)]
pub struct ReturnForm {
    pub return_to: Option<String>,
}

/// Where to send the browser after a cart mutation.
///
/// Only the two pages showing the cart are valid targets.
fn return_target(return_to: Option<&str>) -> &'static str {
    match return_to {
        Some("/cart") => "/cart",
        _ => "/",
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub shop: ShopView,
    pub cart: CartView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state, cart))]
pub async fn show(State(state): State<AppState>, cart: CartSession) -> impl IntoResponse {
    CartShowTemplate {
        shop: ShopView::new(&state.config().shop, state.checkout()),
        cart: CartView::from(cart.cart()),
    }
}

/// Cart contents as JSON.
#[instrument(skip(cart))]
pub async fn summary(cart: CartSession) -> Json<CartSummary> {
    Json(CartSummary::from(cart.cart()))
}

/// Add the selected product options to the cart.
///
/// Redirects back to the product card with the same variant and flavor
/// still selected. The quantity drops back to the minimum order quantity.
#[instrument(skip(state, cart, form), fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    mut cart: CartSession,
    Form(form): Form<SelectionForm>,
) -> Result<Redirect> {
    let mut selection = form.resolve(state.catalog())?;
    let key = selection.add_to(cart.cart_mut());
    cart.save().await?;

    let product = selection.product();
    add_breadcrumb(
        "cart",
        "Added to cart",
        &[("product_id", product.id().as_str()), ("line_key", &key.to_string())],
    );
    tracing::info!(
        line_key = %key,
        item_count = cart.cart().total_item_count(),
        total = %cart.cart().total_price(),
        "Item added to cart"
    );

    Ok(Redirect::to(&selection_url(&selection)))
}

/// Home page URL re-selecting the card's options.
fn selection_url(selection: &ProductSelection<'_>) -> String {
    let id = selection.product().id().as_str();
    let mut url = format!("/?selected={}", urlencoding::encode(id));
    if let Some(variant) = selection.variant() {
        url.push_str("&variant=");
        url.push_str(&urlencoding::encode(&variant.label));
    }
    if let Some(flavor) = selection.flavor() {
        url.push_str("&flavor=");
        url.push_str(&urlencoding::encode(flavor));
    }
    url.push_str("#product-");
    url.push_str(&urlencoding::encode(id));
    url
}

/// Set the quantity of a line. Zero or less removes it.
#[instrument(skip(cart, form), fields(line_key = %form.line_key, quantity = form.quantity))]
pub async fn update(mut cart: CartSession, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let key: LineItemKey = form.line_key.parse()?;
    if !cart.cart().contains(&key) {
        tracing::debug!("Update for unknown line ignored");
    }

    cart.cart_mut().update_quantity(&key, form.quantity);
    cart.save().await?;

    Ok(Redirect::to(return_target(form.return_to.as_deref())))
}

/// Remove a line.
#[instrument(skip(cart, form), fields(line_key = %form.line_key))]
pub async fn remove(
    mut cart: CartSession,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let key: LineItemKey = form.line_key.parse()?;
    cart.cart_mut().remove_item(&key);
    cart.save().await?;

    Ok(Redirect::to(return_target(form.return_to.as_deref())))
}

/// Empty the cart. The drawer stays as it was.
#[instrument(skip(cart, form))]
pub async fn clear(mut cart: CartSession, Form(form): Form<ReturnForm>) -> Result<Redirect> {
    cart.cart_mut().clear();
    cart.save().await?;

    Ok(Redirect::to(return_target(form.return_to.as_deref())))
}

/// Show the cart drawer.
#[instrument(skip(cart))]
pub async fn open(mut cart: CartSession) -> Result<Redirect> {
    cart.cart_mut().set_open(true);
    cart.save().await?;

    Ok(Redirect::to("/"))
}

/// Hide the cart drawer.
#[instrument(skip(cart))]
pub async fn close(mut cart: CartSession) -> Result<Redirect> {
    cart.cart_mut().set_open(false);
    cart.save().await?;

    Ok(Redirect::to("/"))
}

/// Hand the order off to WhatsApp.
///
/// An empty cart goes back to the home page untouched. Otherwise the cart is
/// cleared and closed, then the browser is sent to the WhatsApp deep link
/// carrying the order summary.
#[instrument(skip(state, cart))]
pub async fn checkout(State(state): State<AppState>, mut cart: CartSession) -> Result<Redirect> {
    let item_count = cart.cart().total_item_count();
    let total = cart.cart().total_price();

    let Some(hand_off) = state.checkout().hand_off(cart.cart_mut()) else {
        tracing::debug!("Checkout of empty cart ignored");
        return Ok(Redirect::to("/"));
    };
    cart.save().await?;

    add_breadcrumb("checkout", "Order handed off to WhatsApp", &[]);
    tracing::info!(item_count, total = %total, "Order handed off to WhatsApp");

    Ok(Redirect::to(&hand_off.url))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(product_id: &str, variant: &str, flavor: &str, quantity: &str) -> SelectionForm {
        SelectionForm {
            product_id: product_id.to_string(),
            variant: Some(variant.to_string()),
            flavor: Some(flavor.to_string()),
            quantity: Some(quantity.to_string()),
        }
    }

    #[test]
    fn test_resolve_uses_defaults_for_empty_fields() {
        let catalog = Catalog::builtin();
        let selection = form("chocolate-almonds", "", "", "").resolve(&catalog).unwrap();
        assert_eq!(selection.variant().unwrap().label, "250g Box");
        assert_eq!(selection.quantity(), 1);
    }

    #[test]
    fn test_resolve_applies_options() {
        let catalog = Catalog::builtin();
        let selection = form("small-bars", "", "Milk with Roasted Almonds", "3")
            .resolve(&catalog)
            .unwrap();
        assert_eq!(selection.flavor(), Some("Milk with Roasted Almonds"));
        assert_eq!(selection.quantity(), 3);
    }

    #[test]
    fn test_resolve_errors() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            form("truffles", "", "", "").resolve(&catalog),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            form("chocolate-almonds", "1kg Box", "", "").resolve(&catalog),
            Err(AppError::Selection(_))
        ));
        assert!(matches!(
            form("small-bars", "", "", "many").resolve(&catalog),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_selection_url_is_encoded() {
        let catalog = Catalog::builtin();
        let selection = form("small-bars", "", "White with Oreo & Crackle", "")
            .resolve(&catalog)
            .unwrap();
        assert_eq!(
            selection_url(&selection),
            "/?selected=small-bars&flavor=White%20with%20Oreo%20%26%20Crackle#product-small-bars"
        );
    }

    #[test]
    fn test_return_target() {
        assert_eq!(return_target(Some("/cart")), "/cart");
        assert_eq!(return_target(Some("https://evil.example")), "/");
        assert_eq!(return_target(None), "/");
    }

    #[test]
    fn test_cart_view_quantity_steps() {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        form("small-bars", "", "", "2")
            .resolve(&catalog)
            .unwrap()
            .add_to(&mut cart);

        let view = CartView::from(&cart);
        let line = view.items.first().unwrap();
        assert_eq!(line.decrement_to, 1);
        assert_eq!(line.increment_to, 3);
        assert_eq!(view.total, "₹698");
        assert!(view.is_open);
    }
}
