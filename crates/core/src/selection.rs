//! Transient per-product selection made on a product card.
//!
//! A selection starts from the product's defaults (first variant, first or
//! assorted flavor, minimum order quantity) and only reaches the cart through
//! [`ProductSelection::add_to`]. After an add, the quantity drops back to the
//! minimum order quantity while the variant and flavor stay selected.

use core::fmt::Write as _;

use crate::cart::{AddItemOptions, Cart, LineItemKey};
use crate::catalog::{FlavorOptions, Product, Variant};
use crate::types::{Price, ProductId};

/// Errors applying a choice to a [`ProductSelection`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("product {product} has no variant {label:?}")]
    UnknownVariant { product: ProductId, label: String },
    #[error("product {product} has no flavor {label:?}")]
    UnknownFlavor { product: ProductId, label: String },
    #[error("product {product} does not offer a flavor choice")]
    FlavorNotSelectable { product: ProductId },
}

/// The options currently picked for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSelection<'a> {
    product: &'a Product,
    variant: Option<&'a Variant>,
    flavor: Option<String>,
    quantity: u32,
}

impl<'a> ProductSelection<'a> {
    /// A selection initialised from the product's defaults.
    #[must_use]
    pub fn new(product: &'a Product) -> Self {
        Self {
            product,
            variant: product.default_variant(),
            flavor: product.flavors().default_label(),
            quantity: product.min_order_quantity(),
        }
    }

    /// Pick a variant by label.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownVariant`] if the product has no
    /// variant with that label. The selection is unchanged on error.
    pub fn select_variant(&mut self, label: &str) -> Result<(), SelectionError> {
        let variant = self
            .product
            .variant(label)
            .ok_or_else(|| SelectionError::UnknownVariant {
                product: self.product.id().clone(),
                label: label.to_owned(),
            })?;
        self.variant = Some(variant);
        Ok(())
    }

    /// Pick a flavor by name.
    ///
    /// For assorted products the only accepted value is the assorted label
    /// itself, which is already selected.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownFlavor`] for a name the product does
    /// not offer, or [`SelectionError::FlavorNotSelectable`] when the product
    /// has no flavor choice at all.
    pub fn select_flavor(&mut self, name: &str) -> Result<(), SelectionError> {
        match self.product.flavors() {
            FlavorOptions::Single(_) => {
                let flavor =
                    self.product
                        .flavor(name)
                        .ok_or_else(|| SelectionError::UnknownFlavor {
                            product: self.product.id().clone(),
                            label: name.to_owned(),
                        })?;
                self.flavor = Some(flavor.to_owned());
                Ok(())
            }
            options @ FlavorOptions::Assorted(_)
                if options.assorted_label().as_deref() == Some(name) =>
            {
                Ok(())
            }
            FlavorOptions::Assorted(_) | FlavorOptions::None => {
                Err(SelectionError::FlavorNotSelectable {
                    product: self.product.id().clone(),
                })
            }
        }
    }

    /// Set the quantity, never below the product's minimum order quantity.
    pub fn set_quantity(&mut self, quantity: i64) {
        let floor = self.product.min_order_quantity();
        self.quantity = u32::try_from(quantity)
            .unwrap_or(if quantity < 0 { 0 } else { u32::MAX })
            .max(floor);
    }

    #[must_use]
    pub const fn product(&self) -> &'a Product {
        self.product
    }

    #[must_use]
    pub const fn variant(&self) -> Option<&'a Variant> {
        self.variant
    }

    #[must_use]
    pub fn flavor(&self) -> Option<&str> {
        self.flavor.as_deref()
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price of the current selection.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        self.variant.map_or_else(|| self.product.base_price(), |v| v.price)
    }

    /// Price of the selected quantity.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.unit_price().times(self.quantity)
    }

    /// Price label for the current selection.
    #[must_use]
    pub fn price_label(&self) -> String {
        self.product.price_label_for(self.variant)
    }

    /// The cart options this selection stands for.
    #[must_use]
    pub fn add_options(&self) -> AddItemOptions {
        let mut options = AddItemOptions::new()
            .unit_price(self.unit_price())
            .quantity(i64::from(self.quantity));
        if let Some(variant) = self.variant {
            options = options.variant(variant);
        }
        if let Some(flavor) = &self.flavor {
            options = options.flavor(flavor.clone());
        }
        options
    }

    /// Add the selection to `cart`, then reset the quantity to the minimum
    /// order quantity. Variant and flavor stay selected.
    pub fn add_to(&mut self, cart: &mut Cart) -> LineItemKey {
        let key = cart.add_item(self.product, self.add_options());
        self.quantity = self.product.min_order_quantity();
        key
    }

    /// Message for ordering just this selection directly, without the cart.
    #[must_use]
    pub fn order_summary(&self) -> String {
        let mut message = String::from("Hi! I would like to order:\n\n");
        let _ = write!(message, "Product: {}", self.product.name());
        if let Some(flavor) = &self.flavor {
            let _ = write!(message, "\nFlavour: {flavor}");
        }
        if let Some(variant) = self.variant {
            let _ = write!(message, "\nSelected: {}", variant.label);
        }
        let _ = write!(
            message,
            "\nQuantity: {}\nPrice: {}\n\nPlease confirm availability.",
            self.quantity,
            self.total_price()
        );
        message
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn product(catalog: &Catalog, id: &str) -> Product {
        catalog.find(&ProductId::new(id)).unwrap().clone()
    }

    #[test]
    fn test_defaults_from_product() {
        let catalog = Catalog::builtin();

        let almonds = product(&catalog, "chocolate-almonds");
        let selection = ProductSelection::new(&almonds);
        assert_eq!(selection.variant().unwrap().label, "250g Box");
        assert_eq!(selection.flavor(), None);
        assert_eq!(selection.quantity(), 1);
        assert_eq!(selection.unit_price(), Price::new(399));

        let bars = product(&catalog, "small-bars");
        let selection = ProductSelection::new(&bars);
        assert!(selection.variant().is_none());
        assert_eq!(selection.flavor(), Some("Dark with Raisins"));

        let bites = product(&catalog, "square-bites");
        let selection = ProductSelection::new(&bites);
        assert_eq!(
            selection.flavor(),
            Some("Assorted (Blueberry, Strawberry, Mango, Mint, Rose, Orange)")
        );
        assert_eq!(selection.quantity(), 2);
    }

    #[test]
    fn test_select_variant() {
        let catalog = Catalog::builtin();
        let dates = product(&catalog, "stuffed-dates");
        let mut selection = ProductSelection::new(&dates);

        selection.select_variant("500g Box").unwrap();
        assert_eq!(selection.unit_price(), Price::new(690));

        let err = selection.select_variant("1kg Box").unwrap_err();
        assert!(matches!(err, SelectionError::UnknownVariant { .. }));
        assert_eq!(selection.variant().unwrap().label, "500g Box");
    }

    #[test]
    fn test_select_flavor() {
        let catalog = Catalog::builtin();

        let bars = product(&catalog, "big-bars");
        let mut selection = ProductSelection::new(&bars);
        selection.select_flavor("Milk with Roasted Almonds").unwrap();
        assert_eq!(selection.flavor(), Some("Milk with Roasted Almonds"));
        assert!(matches!(
            selection.select_flavor("Vanilla"),
            Err(SelectionError::UnknownFlavor { .. })
        ));

        let bites = product(&catalog, "square-bites");
        let mut selection = ProductSelection::new(&bites);
        assert!(matches!(
            selection.select_flavor("Mango"),
            Err(SelectionError::FlavorNotSelectable { .. })
        ));
        let assorted = selection.flavor().unwrap().to_owned();
        selection.select_flavor(&assorted).unwrap();

        let kunafa = product(&catalog, "kunafa-bar");
        let mut selection = ProductSelection::new(&kunafa);
        assert!(matches!(
            selection.select_flavor("Pistachio"),
            Err(SelectionError::FlavorNotSelectable { .. })
        ));
    }

    #[test]
    fn test_quantity_floors_at_minimum() {
        let catalog = Catalog::builtin();
        let photo = product(&catalog, "photo-smallbar");
        let mut selection = ProductSelection::new(&photo);
        assert_eq!(selection.quantity(), 25);

        selection.set_quantity(26);
        assert_eq!(selection.quantity(), 26);

        selection.set_quantity(3);
        assert_eq!(selection.quantity(), 25);
        selection.set_quantity(-4);
        assert_eq!(selection.quantity(), 25);
        selection.set_quantity(40);
        assert_eq!(selection.quantity(), 40);
    }

    #[test]
    fn test_add_to_resets_quantity_and_keeps_options() {
        let catalog = Catalog::builtin();
        let bars = product(&catalog, "small-bars");
        let mut cart = Cart::new();
        let mut selection = ProductSelection::new(&bars);
        selection.select_flavor("White with Oreo & Crackle").unwrap();
        selection.set_quantity(4);

        let key = selection.add_to(&mut cart);

        assert_eq!(selection.quantity(), bars.min_order_quantity());
        assert_eq!(selection.flavor(), Some("White with Oreo & Crackle"));
        let line = cart.get(&key).unwrap();
        assert_eq!(line.quantity(), 4);
        assert_eq!(line.flavor_label(), Some("White with Oreo & Crackle"));
        assert!(cart.is_open());
    }

    #[test]
    fn test_add_to_carries_variant() {
        let catalog = Catalog::builtin();
        let almonds = product(&catalog, "chocolate-almonds");
        let mut cart = Cart::new();
        let mut selection = ProductSelection::new(&almonds);
        selection.select_variant("500g Box").unwrap();

        let large = selection.add_to(&mut cart);
        selection.select_variant("250g Box").unwrap();
        let small = selection.add_to(&mut cart);

        assert_ne!(large, small);
        assert_eq!(cart.get(&large).unwrap().variant_label(), Some("500g Box"));
        assert_eq!(cart.total_price(), Price::new(749 + 399));
    }

    #[test]
    fn test_order_summary() {
        let catalog = Catalog::builtin();
        let bars = product(&catalog, "small-bars");
        let mut selection = ProductSelection::new(&bars);
        selection.set_quantity(2);

        assert_eq!(
            selection.order_summary(),
            "Hi! I would like to order:\n\n\
             Product: Small Chocolate Bars (20g)\n\
             Flavour: Dark with Raisins\n\
             Quantity: 2\n\
             Price: ₹698\n\n\
             Please confirm availability."
        );
    }

    #[test]
    fn test_order_summary_with_variant() {
        let catalog = Catalog::builtin();
        let almonds = product(&catalog, "chocolate-almonds");
        let selection = ProductSelection::new(&almonds);

        let summary = selection.order_summary();
        assert!(summary.contains("\nSelected: 250g Box\n"));
        assert!(!summary.contains("Flavour"));
        assert!(summary.contains("Price: ₹399"));
    }
}
