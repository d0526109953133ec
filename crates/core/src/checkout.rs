//! Order hand-off to WhatsApp.
//!
//! Checkout has no payment step. The cart is written out as a human-readable
//! order message, percent-encoded into a `wa.me` deep link for the shop's
//! number, and the customer finishes the order in their messaging app.
//! Delivery is never confirmed back to us.

use core::fmt::Write as _;

use crate::cart::Cart;
use crate::types::WhatsAppNumber;

/// Base URL of WhatsApp click-to-chat links.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// The shop's WhatsApp number.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "919494437815";

/// Shop name used in outgoing messages.
pub const DEFAULT_SHOP_NAME: &str = "Darsi's Chocolate";

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━";

/// A completed hand-off: the deep link to open and what was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandOff {
    /// Fully encoded `wa.me` URL.
    pub url: String,
    /// The plain order summary carried in the URL.
    pub message: String,
}

/// Builds order messages and WhatsApp deep links for one shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    shop_name: String,
    destination: WhatsAppNumber,
}

impl Checkout {
    #[must_use]
    pub fn new(shop_name: impl Into<String>, destination: WhatsAppNumber) -> Self {
        Self {
            shop_name: shop_name.into(),
            destination,
        }
    }

    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.shop_name
    }

    #[must_use]
    pub const fn destination(&self) -> &WhatsAppNumber {
        &self.destination
    }

    /// Render the cart as an order message, or `None` for an empty cart.
    #[must_use]
    pub fn order_summary(&self, cart: &Cart) -> Option<String> {
        if cart.is_empty() {
            return None;
        }

        let mut message = format!("🍫 *Order from {}*\n\n", self.shop_name);
        for item in cart.items() {
            let _ = writeln!(message, "▪ {}", item.product().name());
            if let Some(flavor) = item.flavor_label() {
                let _ = writeln!(message, "  Flavour: {flavor}");
            }
            if let Some(variant) = item.variant_label() {
                let _ = writeln!(message, "  Variant: {variant}");
            }
            let _ = write!(
                message,
                "  Qty: {} × {} = {}\n\n",
                item.quantity(),
                item.unit_price(),
                item.line_total()
            );
        }
        let _ = write!(
            message,
            "{RULE}\n*Total: {}*\n\nPlease confirm my order. Thank you!",
            cart.total_price()
        );
        Some(message)
    }

    /// Deep link opening a chat with the shop, pre-filled with `text`.
    #[must_use]
    pub fn deep_link(&self, text: &str) -> String {
        format!(
            "{WHATSAPP_BASE_URL}/{}?text={}",
            self.destination,
            urlencoding::encode(text)
        )
    }

    /// Link for a general enquiry naming the shop, e.g. from the contact
    /// section or the floating chat button.
    #[must_use]
    pub fn enquiry_link(&self, enquiry: Enquiry) -> String {
        self.deep_link(&enquiry.message(&self.shop_name))
    }

    /// Hand the cart off to WhatsApp.
    ///
    /// An empty cart is left untouched and nothing is produced. Otherwise the
    /// returned link carries the order summary and the cart is cleared and
    /// closed.
    pub fn hand_off(&self, cart: &mut Cart) -> Option<HandOff> {
        let message = self.order_summary(cart)?;
        let url = self.deep_link(&message);
        cart.clear();
        cart.set_open(false);
        Some(HandOff { url, message })
    }
}

/// Canned enquiry messages used outside the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enquiry {
    /// Hero call to action: asks for the catalog.
    Catalog,
    /// Floating chat button.
    Ordering,
    /// Contact section.
    Question,
}

impl Enquiry {
    #[must_use]
    pub fn message(self, shop_name: &str) -> String {
        match self {
            Self::Catalog => format!(
                "Hello! I'm interested in ordering chocolates from {shop_name}. Please share the catalog."
            ),
            Self::Ordering => format!("Hello! I'm interested in ordering from {shop_name}."),
            Self::Question => format!("Hello! I have a question about {shop_name}."),
        }
    }
}
