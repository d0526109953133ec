//! Home page route handler.
//!
//! The whole storefront is one page: hero, story, the catalog grouped by
//! category, services, business hours, contact and the cart drawer.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::{Datelike, FixedOffset, Utc, Weekday};
use darsi_core::{Checkout, Enquiry, FlavorOptions, Product, ProductId, ProductSelection};
use serde::Deserialize;
use tracing::instrument;

use crate::config::ShopConfig;
use crate::filters;
use crate::models::CartSession;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Shop-local offset (IST, UTC+5:30) in seconds.
const SHOP_UTC_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

// =============================================================================
// Static Content
// =============================================================================

/// A highlight in the story section or a service offered.
#[derive(Clone)]
pub struct FeatureView {
    pub title: &'static str,
    pub description: &'static str,
}

const FEATURES: [FeatureView; 3] = [
    FeatureView {
        title: "Made with Love",
        description: "Every piece is handcrafted with passion and care",
    },
    FeatureView {
        title: "Premium Quality",
        description: "Only the finest ingredients from trusted sources",
    },
    FeatureView {
        title: "Fresh & Natural",
        description: "No preservatives, just pure chocolate goodness",
    },
];

const SERVICES: [FeatureView; 6] = [
    FeatureView {
        title: "Corporate Gifting",
        description: "Impress your clients and employees with customised chocolate hampers",
    },
    FeatureView {
        title: "Wedding Favors",
        description: "Beautiful return gifts that your guests will cherish",
    },
    FeatureView {
        title: "Birthday Specials",
        description: "Personalised photo chocolates to make birthdays memorable",
    },
    FeatureView {
        title: "Baby Showers",
        description: "Adorable themed chocolates for your special celebrations",
    },
    FeatureView {
        title: "Festival Hampers",
        description: "Celebrate Diwali, Rakhi, Christmas with our festive collections",
    },
    FeatureView {
        title: "Bulk Orders",
        description: "Special pricing for large quantity orders for events",
    },
];

/// Opening hours for one weekday.
#[derive(Clone)]
pub struct BusinessHoursView {
    pub day: &'static str,
    pub hours: &'static str,
    pub is_today: bool,
}

const WEEKDAY_HOURS: &str = "10:00 AM - 7:00 PM";
const SUNDAY_HOURS: &str = "2:00 PM - 5:00 PM";

/// The week's opening hours, flagging `today`.
fn business_hours(today: Weekday) -> Vec<BusinessHoursView> {
    [
        (Weekday::Mon, "Monday", WEEKDAY_HOURS),
        (Weekday::Tue, "Tuesday", WEEKDAY_HOURS),
        (Weekday::Wed, "Wednesday", WEEKDAY_HOURS),
        (Weekday::Thu, "Thursday", WEEKDAY_HOURS),
        (Weekday::Fri, "Friday", WEEKDAY_HOURS),
        (Weekday::Sat, "Saturday", WEEKDAY_HOURS),
        (Weekday::Sun, "Sunday", SUNDAY_HOURS),
    ]
    .into_iter()
    .map(|(weekday, day, hours)| BusinessHoursView {
        day,
        hours,
        is_today: weekday == today,
    })
    .collect()
}

/// Current weekday at the shop.
fn shop_weekday() -> Weekday {
    FixedOffset::east_opt(SHOP_UTC_OFFSET_SECONDS).map_or_else(
        || Utc::now().weekday(),
        |offset| Utc::now().with_timezone(&offset).weekday(),
    )
}

// =============================================================================
// Shop and Product Views
// =============================================================================

/// Shop identity and contact links.
#[derive(Clone)]
pub struct ShopView {
    pub name: String,
    pub phone_display: String,
    pub email: String,
    pub instagram: String,
    pub catalog_link: String,
    pub ordering_link: String,
    pub question_link: String,
}

impl ShopView {
    #[must_use]
    pub fn new(shop: &ShopConfig, checkout: &Checkout) -> Self {
        Self {
            name: shop.name.clone(),
            phone_display: shop.phone_display.clone(),
            email: shop.email.clone(),
            instagram: shop.instagram.clone(),
            catalog_link: checkout.enquiry_link(Enquiry::Catalog),
            ordering_link: checkout.enquiry_link(Enquiry::Ordering),
            question_link: checkout.enquiry_link(Enquiry::Question),
        }
    }
}

/// An entry in a variant or flavor select.
#[derive(Clone)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub details: String,
    pub image: String,
    pub min_order: String,
    pub min_quantity: u32,
    pub quantity: u32,
    pub unit_label: &'static str,
    pub price_label: String,
    pub total: String,
    pub variants: Vec<OptionView>,
    pub flavors: Vec<OptionView>,
    pub assorted_label: Option<String>,
}

impl From<&ProductSelection<'_>> for ProductCardView {
    fn from(selection: &ProductSelection<'_>) -> Self {
        let product = selection.product();

        let variants = product
            .variants()
            .iter()
            .map(|variant| OptionView {
                value: variant.label.clone(),
                label: format!("{} - {}", variant.label, variant.price),
                selected: selection.variant() == Some(variant),
            })
            .collect();

        let flavors = match product.flavors() {
            FlavorOptions::Single(names) => names
                .iter()
                .map(|name| OptionView {
                    value: name.clone(),
                    label: name.clone(),
                    selected: selection.flavor() == Some(name.as_str()),
                })
                .collect(),
            FlavorOptions::Assorted(_) | FlavorOptions::None => Vec::new(),
        };

        Self {
            id: product.id().to_string(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            details: product.details().to_string(),
            image: product.image().to_string(),
            min_order: product.min_order().to_string(),
            min_quantity: product.min_order_quantity(),
            quantity: selection.quantity(),
            unit_label: product.unit_label(),
            price_label: selection.price_label(),
            total: selection.total_price().to_string(),
            variants,
            flavors,
            assorted_label: product.flavors().assorted_label(),
        }
    }
}

/// Products of one category.
#[derive(Clone)]
pub struct CategoryView {
    pub label: &'static str,
    pub slug: &'static str,
    pub products: Vec<ProductCardView>,
}

// =============================================================================
// Handler
// =============================================================================

/// Options to re-select on one product card, set after an add.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub selected: Option<String>,
    pub variant: Option<String>,
    pub flavor: Option<String>,
}

impl HomeQuery {
    /// Selection for a product card, honoring the query for the selected one.
    ///
    /// Stale or foreign options in the query are dropped silently.
    fn selection_for<'a>(&self, product: &'a Product) -> ProductSelection<'a> {
        let mut selection = ProductSelection::new(product);
        let is_selected = self
            .selected
            .as_deref()
            .is_some_and(|id| ProductId::new(id) == *product.id());
        if !is_selected {
            return selection;
        }

        if let Some(label) = self.variant.as_deref().filter(|v| !v.is_empty()) {
            if let Err(e) = selection.select_variant(label) {
                tracing::debug!("Ignoring variant from query: {e}");
            }
        }
        if let Some(name) = self.flavor.as_deref().filter(|f| !f.is_empty()) {
            if let Err(e) = selection.select_flavor(name) {
                tracing::debug!("Ignoring flavor from query: {e}");
            }
        }
        selection
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub shop: ShopView,
    pub features: Vec<FeatureView>,
    pub categories: Vec<CategoryView>,
    pub services: Vec<FeatureView>,
    pub hours: Vec<BusinessHoursView>,
    pub cart: CartView,
}

/// Display the home page.
#[instrument(skip(state, cart))]
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
    cart: CartSession,
) -> impl IntoResponse {
    let catalog = state.catalog();
    let categories = catalog
        .categories()
        .into_iter()
        .map(|category| CategoryView {
            label: category.label(),
            slug: category.slug(),
            products: catalog
                .in_category(category)
                .map(|product| ProductCardView::from(&query.selection_for(product)))
                .collect(),
        })
        .collect();

    HomeTemplate {
        shop: ShopView::new(&state.config().shop, state.checkout()),
        features: FEATURES.to_vec(),
        categories,
        services: SERVICES.to_vec(),
        hours: business_hours(shop_weekday()),
        cart: CartView::from(cart.cart()),
    }
}
