//! Shopping cart.
//!
//! The cart aggregates catalog selections into line items. A line item is
//! identified by its [`LineItemKey`], derived from the product id, the flavor
//! label and the unit price actually charged. Adding a selection whose key
//! already exists merges into that line instead of creating a duplicate.
//!
//! # Invariants
//!
//! - No two line items share a key.
//! - Every line item has a quantity of at least 1; driving it to zero or
//!   below removes the line.
//! - The unit price of a line never changes. A different variant produces a
//!   different key and therefore a different line.
//!
//! Totals are recomputed on every read.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::catalog::{Product, Variant};
use crate::types::{Price, ProductId};

/// Domain separator mixed into every key digest.
const KEY_DOMAIN: &[u8] = b"darsi.cart.line-item.v1";

/// Number of digest bytes kept in a key.
const KEY_BYTES: usize = 16;

/// Errors parsing a [`LineItemKey`] from its hex form.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineItemKeyError {
    #[error("line item key must be {expected} hex digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("line item key must be lowercase hex")]
    InvalidHex,
}

/// Composite identity of a cart line.
///
/// A truncated SHA-256 digest over a length-prefixed encoding of
/// `(product id, flavor label, unit price)`. Labels containing any separator
/// cannot collide with each other, and "no flavor" is distinct from every
/// flavor name. Renders as 32 lowercase hex digits so it can travel through
/// HTML forms.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LineItemKey([u8; KEY_BYTES]);

impl LineItemKey {
    /// Derive the key for a selection.
    #[must_use]
    pub fn derive(product_id: &ProductId, flavor: Option<&str>, unit_price: Price) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(KEY_DOMAIN);
        update_field(&mut hasher, product_id.as_str().as_bytes());
        match flavor {
            Some(flavor) => {
                hasher.update([1]);
                update_field(&mut hasher, flavor.as_bytes());
            }
            None => hasher.update([0]),
        }
        hasher.update(unit_price.amount().to_be_bytes());

        let digest = hasher.finalize();
        let mut bytes = [0u8; KEY_BYTES];
        for (dst, src) in bytes.iter_mut().zip(digest.iter()) {
            *dst = *src;
        }
        Self(bytes)
    }
}

fn update_field(hasher: &mut Sha256, field: &[u8]) {
    hasher.update((field.len() as u64).to_be_bytes());
    hasher.update(field);
}

impl fmt::Display for LineItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for LineItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineItemKey({self})")
    }
}

impl FromStr for LineItemKey {
    type Err = LineItemKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != KEY_BYTES * 2 {
            return Err(LineItemKeyError::InvalidLength {
                expected: KEY_BYTES * 2,
                actual: s.len(),
            });
        }

        if s.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(LineItemKeyError::InvalidHex);
        }

        let mut bytes = [0u8; KEY_BYTES];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| LineItemKeyError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for LineItemKey {
    type Error = LineItemKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LineItemKey> for String {
    fn from(key: LineItemKey) -> Self {
        key.to_string()
    }
}

/// Options accompanying [`Cart::add_item`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddItemOptions {
    /// Flavor label, already resolved to the assorted label where applicable.
    pub flavor: Option<String>,
    /// Label of the selected variant.
    pub variant_label: Option<String>,
    /// Unit price to charge; the product's base price when absent.
    pub unit_price: Option<Price>,
    /// Units to add; 1 when absent, clamped to 1 when not positive.
    pub quantity: Option<i64>,
}

impl AddItemOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    /// Select a variant: sets both its label and its unit price.
    #[must_use]
    pub fn variant(mut self, variant: &Variant) -> Self {
        self.variant_label = Some(variant.label.clone());
        self.unit_price = Some(variant.price);
        self
    }

    #[must_use]
    pub fn unit_price(mut self, unit_price: Price) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    #[must_use]
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

/// One distinct purchasable selection and its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    key: LineItemKey,
    product: Product,
    quantity: u32,
    variant_label: Option<String>,
    unit_price: Price,
    flavor_label: Option<String>,
}

impl CartLineItem {
    #[must_use]
    pub const fn key(&self) -> LineItemKey {
        self.key
    }

    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Units on this line. Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn variant_label(&self) -> Option<&str> {
        self.variant_label.as_deref()
    }

    /// Price per unit actually charged.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    #[must_use]
    pub fn flavor_label(&self) -> Option<&str> {
        self.flavor_label.as_deref()
    }

    /// `quantity × unit_price`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// The shopping cart: ordered line items plus the drawer visibility flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
    is_open: bool,
}

impl Cart {
    /// An empty, closed cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a selection of `product`, merging into an existing line when the
    /// key matches. Opens the cart. Returns the key of the affected line.
    pub fn add_item(&mut self, product: &Product, options: AddItemOptions) -> LineItemKey {
        let unit_price = options.unit_price.unwrap_or_else(|| product.base_price());
        let flavor = options
            .flavor
            .map(|f| f.trim().to_owned())
            .filter(|f| !f.is_empty());
        let quantity = clamp_quantity(options.quantity.unwrap_or(1));
        let key = LineItemKey::derive(product.id(), flavor.as_deref(), unit_price);

        if let Some(existing) = self.items.iter_mut().find(|item| item.key == key) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartLineItem {
                key,
                product: product.clone(),
                quantity,
                variant_label: options.variant_label,
                unit_price,
                flavor_label: flavor,
            });
        }

        self.is_open = true;
        key
    }

    /// Replace the quantity of a line. Zero or below removes it; unknown keys
    /// are ignored.
    pub fn update_quantity(&mut self, key: &LineItemKey, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_item(key);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.key == *key) {
            item.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        }
    }

    /// Remove a line if present, keeping the order of the rest.
    pub fn remove_item(&mut self, key: &LineItemKey) {
        self.items.retain(|item| item.key != *key);
    }

    /// Empty the cart. The open flag is left alone.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `quantity × unit_price` across all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    pub const fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, key: &LineItemKey) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.key == *key)
    }

    #[must_use]
    pub fn contains(&self, key: &LineItemKey) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}
