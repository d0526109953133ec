//! Static product catalog.
//!
//! Products are fixed at build time and never mutated. A product may carry
//! price-affecting [`Variant`]s (package sizes) and non-price-affecting
//! flavors, modelled by [`FlavorOptions`] so that the cart has exactly one
//! place to ask for a flavor label regardless of product shape.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A mutually exclusive, price-affecting option of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Display label, e.g. "250g Box".
    pub label: String,
    /// Unit price charged when this variant is selected.
    pub price: Price,
}

impl Variant {
    /// Create a variant.
    #[must_use]
    pub fn new(label: impl Into<String>, price: u64) -> Self {
        Self {
            label: label.into(),
            price: Price::new(price),
        }
    }
}

/// How a product's flavors are offered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "flavors", rename_all = "snake_case")]
pub enum FlavorOptions {
    /// No flavor choice.
    #[default]
    None,
    /// The customer picks exactly one flavor per line item.
    Single(Vec<String>),
    /// Every flavor ships together; no individual selection happens.
    Assorted(Vec<String>),
}

impl FlavorOptions {
    /// Build a single-choice flavor list.
    #[must_use]
    pub fn single<I, S>(flavors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Single(flavors.into_iter().map(Into::into).collect())
    }

    /// Build an assorted flavor bundle.
    #[must_use]
    pub fn assorted<I, S>(flavors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Assorted(flavors.into_iter().map(Into::into).collect())
    }

    /// All flavor names, in catalog order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        match self {
            Self::None => &[],
            Self::Single(flavors) | Self::Assorted(flavors) => flavors,
        }
    }

    /// The synthesized label for an assorted bundle.
    #[must_use]
    pub fn assorted_label(&self) -> Option<String> {
        match self {
            Self::Assorted(flavors) if !flavors.is_empty() => {
                Some(format!("Assorted ({})", flavors.join(", ")))
            }
            _ => None,
        }
    }

    /// The flavor label a fresh selection starts with.
    ///
    /// First flavor for single-choice products, the assorted label for
    /// bundles, nothing otherwise.
    #[must_use]
    pub fn default_label(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Single(flavors) => flavors.first().cloned(),
            Self::Assorted(_) => self.assorted_label(),
        }
    }
}

/// Catalog section a product is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Classic,
    DesignerSeries,
    PremiumSeries,
    PhotoCustomised,
}

impl Category {
    /// Display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::DesignerSeries => "Designer Series",
            Self::PremiumSeries => "Premium Series",
            Self::PhotoCustomised => "Photo Customised",
        }
    }

    /// URL fragment / HTML id.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::DesignerSeries => "designer-series",
            Self::PremiumSeries => "premium-series",
            Self::PhotoCustomised => "photo-customised",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    details: String,
    base_price: Price,
    price_label: String,
    image: String,
    min_order: String,
    min_order_quantity: u32,
    category: Category,
    variants: Vec<Variant>,
    flavors: FlavorOptions,
}

impl Product {
    /// Start a product with its identity and base price.
    ///
    /// Everything else defaults to empty, with a minimum order of one unit
    /// and the price label derived from the base price.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, base_price: u64) -> Self {
        let base_price = Price::new(base_price);
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            details: String::new(),
            base_price,
            price_label: base_price.to_string(),
            image: String::new(),
            min_order: String::new(),
            min_order_quantity: 1,
            category: Category::Classic,
            variants: Vec::new(),
            flavors: FlavorOptions::None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    #[must_use]
    pub fn with_price_label(mut self, price_label: impl Into<String>) -> Self {
        self.price_label = price_label.into();
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the minimum-order descriptor, e.g. "Min order: 25 pcs".
    ///
    /// The minimum order quantity is derived from it.
    #[must_use]
    pub fn with_min_order(mut self, descriptor: impl Into<String>) -> Self {
        self.min_order = descriptor.into();
        self.min_order_quantity = parse_min_order_quantity(&self.min_order);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    #[must_use]
    pub fn with_flavors(mut self, flavors: FlavorOptions) -> Self {
        self.flavors = flavors;
        self
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Unit price when no variant is selected.
    #[must_use]
    pub const fn base_price(&self) -> Price {
        self.base_price
    }

    #[must_use]
    pub fn price_label(&self) -> &str {
        &self.price_label
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// The raw minimum-order descriptor.
    #[must_use]
    pub fn min_order(&self) -> &str {
        &self.min_order
    }

    /// Smallest quantity a customer may order. Always at least 1.
    #[must_use]
    pub const fn min_order_quantity(&self) -> u32 {
        self.min_order_quantity
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    #[must_use]
    pub const fn flavors(&self) -> &FlavorOptions {
        &self.flavors
    }

    /// The variant a fresh selection starts with.
    #[must_use]
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    /// Look up a variant by label.
    #[must_use]
    pub fn variant(&self, label: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.label == label)
    }

    /// Look up a selectable flavor by name.
    ///
    /// Always `None` for assorted or flavorless products.
    #[must_use]
    pub fn flavor(&self, name: &str) -> Option<&str> {
        match &self.flavors {
            FlavorOptions::Single(flavors) => flavors
                .iter()
                .find(|f| f.as_str() == name)
                .map(String::as_str),
            _ => None,
        }
    }

    /// Unit noun used in price labels.
    #[must_use]
    pub fn unit_label(&self) -> &'static str {
        if self.id.mentions("bites")
            || self.id.mentions("bars")
            || self.details.to_lowercase().contains("box")
        {
            "Box"
        } else {
            "Bar"
        }
    }

    /// Price label for the given variant, or the catalog label without one.
    #[must_use]
    pub fn price_label_for(&self, variant: Option<&Variant>) -> String {
        variant.map_or_else(
            || self.price_label.clone(),
            |v| format!("{} / {}", v.price, self.unit_label()),
        )
    }
}

/// Derive the minimum order quantity from a descriptor such as
/// "Min order: 2 Boxes". The first run of digits wins; anything unparsable
/// or zero means 1.
#[must_use]
pub fn parse_min_order_quantity(descriptor: &str) -> u32 {
    let digits: String = descriptor
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();

    match digits.parse::<u32>() {
        Ok(0) | Err(_) => 1,
        Ok(quantity) => quantity,
    }
}

/// The list of products on sale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products, in display order.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by id.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Categories in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category()) {
                categories.push(product.category());
            }
        }
        categories
    }

    /// Products listed under `category`, in display order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |p| p.category() == category)
    }

    /// The shop's chocolate catalog.
    #[must_use]
    pub fn builtin() -> Self {
        const CLASSIC_BAR_FLAVORS: [&str; 3] = [
            "Dark with Raisins",
            "Milk with Roasted Almonds",
            "White with Oreo & Crackle",
        ];

        Self::new(vec![
            Product::new("square-bites", "Square Chocolate Bites (13g)", 219)
                .with_description(
                    "6 Exotic Flavours (Assorted): Blueberry, Strawberry, Mango, Mint, Rose, Orange",
                )
                .with_details("12 Pcs Box")
                .with_price_label("₹219 / Box")
                .with_image("/static/img/products/square-bites.jpg")
                .with_min_order("Min order: 2 Boxes")
                .with_category(Category::Classic)
                .with_flavors(FlavorOptions::assorted([
                    "Blueberry",
                    "Strawberry",
                    "Mango",
                    "Mint",
                    "Rose",
                    "Orange",
                ])),
            Product::new("small-bars", "Small Chocolate Bars (20g)", 349)
                .with_description(
                    "3 Variants: Dark w/ Raisins, Milk w/ Almonds, White w/ Oreo & Crackle",
                )
                .with_details("12 Pcs Box")
                .with_price_label("₹349 / Box")
                .with_image("/static/img/products/small-bars.jpg")
                .with_min_order("Min order: 1 Box")
                .with_category(Category::Classic)
                .with_flavors(FlavorOptions::single(CLASSIC_BAR_FLAVORS)),
            Product::new("big-bars", "Big Chocolate Bars (50g)", 449)
                .with_description(
                    "3 Variants: Dark w/ Raisins, Milk w/ Almonds, White w/ Oreo & Crackle",
                )
                .with_details("6 Pcs Box")
                .with_price_label("₹449 / Box")
                .with_image("/static/img/products/big-bars.jpg")
                .with_min_order("Min order: 1 Box")
                .with_category(Category::Classic)
                .with_flavors(FlavorOptions::single(CLASSIC_BAR_FLAVORS)),
            Product::new("floral-namebar-55", "Floral Name Bar (55g)", 199)
                .with_description("Designer Series - With Name & Wishes decoration")
                .with_details("Personalised Bar")
                .with_price_label("₹199 / Bar")
                .with_image("/static/img/products/floral-namebar.jpg")
                .with_min_order("Min order: 2 Bars")
                .with_category(Category::DesignerSeries),
            Product::new("dryfruits-namebar-55", "Dry Fruits Name Bar (55g)", 249)
                .with_description("Designer Series - Premium nuts with Name & Wishes")
                .with_details("Personalised Bar")
                .with_price_label("₹249 / Bar")
                .with_image("/static/img/products/dryfruits-namebar.jpg")
                .with_min_order("Min order: 2 Bars")
                .with_category(Category::DesignerSeries),
            Product::new("floral-namebar-100", "Floral Name Bar (100g)", 299)
                .with_description("Designer Series - Large Bar with Name & Wishes")
                .with_details("Personalised Bar")
                .with_price_label("₹299 / Bar")
                .with_image("/static/img/products/floral-namebar.jpg")
                .with_min_order("Min order: 2 Bars")
                .with_category(Category::DesignerSeries),
            Product::new("dryfruits-namebar-100", "Dry Fruits Name Bar (100g)", 349)
                .with_description("Designer Series - Large Bar with Nuts & Wishes")
                .with_details("Personalised Bar")
                .with_price_label("₹349 / Bar")
                .with_image("/static/img/products/dryfruits-namebar.jpg")
                .with_min_order("Min order: 2 Bars")
                .with_category(Category::DesignerSeries),
            Product::new("kunafa-bites", "Dubai Pistachio Kunafa Bites (30g)", 449)
                .with_description("Premium Series - Authentic rich pistachio filling")
                .with_details("12 Bites Box")
                .with_price_label("₹449 / Box")
                .with_image("/static/img/products/kunafa-bites.jpg")
                .with_min_order("Min order: 1 Box")
                .with_category(Category::PremiumSeries),
            Product::new("kunafa-bar", "Dubai Pistachio Kunafa Bar (100g)", 199)
                .with_description("Premium Series - 100g Handcrafted luxury bar")
                .with_details("1 Bar")
                .with_price_label("₹199 / Bar")
                .with_image("/static/img/products/kunafa-bar.jpg")
                .with_min_order("Min order: 2 Bars")
                .with_category(Category::PremiumSeries),
            Product::new("chocolate-almonds", "Chocolate Coated Almonds", 399)
                .with_description("Premium Series - Roasted almonds in Milk Chocolate")
                .with_details("Selection by Weight")
                .with_price_label("From ₹399")
                .with_image("/static/img/products/almonds.jpg")
                .with_min_order("Min order: 1 Box")
                .with_category(Category::PremiumSeries)
                .with_variants(vec![
                    Variant::new("250g Box", 399),
                    Variant::new("500g Box", 749),
                ]),
            Product::new("stuffed-dates", "Chocolate Covered Stuffed Dates", 350)
                .with_description("Premium Series - Dark Chocolate coated dates")
                .with_details("Selection by Weight")
                .with_price_label("From ₹350")
                .with_image("/static/img/products/stuffed-dates.jpg")
                .with_min_order("Min order: 1 Box")
                .with_category(Category::PremiumSeries)
                .with_variants(vec![
                    Variant::new("250g Box", 350),
                    Variant::new("500g Box", 690),
                ]),
            Product::new("photo-bigbar", "Photo Customised Big Bar (50g)", 90)
                .with_description("Personalised with Photo, name, and message")
                .with_details("Individual Bar")
                .with_price_label("₹90 / Bar")
                .with_image("/static/img/products/photo-bigbar.jpg")
                .with_min_order("Min order: 10 pcs")
                .with_category(Category::PhotoCustomised),
            Product::new("photo-smallbar", "Photo Customised Small Bar (20g)", 40)
                .with_description("Personalised with Photo, name, and message")
                .with_details("Individual Bar")
                .with_price_label("₹40 / Bar")
                .with_image("/static/img/products/photo-smallbar.jpg")
                .with_min_order("Min order: 25 pcs")
                .with_category(Category::PhotoCustomised),
            Product::new("photo-squarebites", "Photo Customised Square Bites (13g)", 22)
                .with_description("Personalised with Photo and Name")
                .with_details("Individual Bite")
                .with_price_label("₹22 / Bite")
                .with_image("/static/img/products/photo-squarebites.jpg")
                .with_min_order("Min order: 50 pcs")
                .with_category(Category::PhotoCustomised),
        ])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_min_order_quantity() {
        assert_eq!(parse_min_order_quantity("Min order: 2 Boxes"), 2);
        assert_eq!(parse_min_order_quantity("Min order: 50 pcs"), 50);
        assert_eq!(parse_min_order_quantity("Minimum order: 1 Box"), 1);
        assert_eq!(parse_min_order_quantity("12 boxes, then 3 more"), 12);
    }

    #[test]
    fn test_parse_min_order_quantity_defaults_to_one() {
        assert_eq!(parse_min_order_quantity(""), 1);
        assert_eq!(parse_min_order_quantity("no minimum"), 1);
        assert_eq!(parse_min_order_quantity("Min order: 0 pcs"), 1);
        assert_eq!(parse_min_order_quantity("99999999999999999999 pcs"), 1);
    }

    #[test]
    fn test_builtin_catalog_ids_are_unique() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.products().len(), 14);

        let mut ids: Vec<&ProductId> = catalog.products().iter().map(Product::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 14);
    }

    #[test]
    fn test_builtin_catalog_categories_in_order() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.categories(),
            vec![
                Category::Classic,
                Category::DesignerSeries,
                Category::PremiumSeries,
                Category::PhotoCustomised,
            ]
        );
        assert_eq!(catalog.in_category(Category::Classic).count(), 3);
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::builtin();
        let almonds = catalog.find(&ProductId::new("chocolate-almonds")).unwrap();
        assert_eq!(almonds.base_price(), Price::new(399));
        assert_eq!(almonds.variant("500g Box").unwrap().price, Price::new(749));
        assert!(catalog.find(&ProductId::new("fudge")).is_none());
    }

    #[test]
    fn test_min_order_quantity_from_catalog() {
        let catalog = Catalog::builtin();
        let photo = catalog.find(&ProductId::new("photo-squarebites")).unwrap();
        assert_eq!(photo.min_order_quantity(), 50);
    }

    #[test]
    fn test_flavor_defaults() {
        let catalog = Catalog::builtin();

        let bites = catalog.find(&ProductId::new("square-bites")).unwrap();
        assert_eq!(
            bites.flavors().default_label().as_deref(),
            Some("Assorted (Blueberry, Strawberry, Mango, Mint, Rose, Orange)")
        );
        assert!(bites.flavor("Mango").is_none());

        let bars = catalog.find(&ProductId::new("small-bars")).unwrap();
        assert_eq!(
            bars.flavors().default_label().as_deref(),
            Some("Dark with Raisins")
        );
        assert_eq!(
            bars.flavor("White with Oreo & Crackle"),
            Some("White with Oreo & Crackle")
        );

        let kunafa = catalog.find(&ProductId::new("kunafa-bar")).unwrap();
        assert_eq!(kunafa.flavors().default_label(), None);
    }

    #[test]
    fn test_unit_and_price_labels() {
        let catalog = Catalog::builtin();
        let dates = catalog.find(&ProductId::new("stuffed-dates")).unwrap();
        assert_eq!(dates.unit_label(), "Bar");
        assert_eq!(
            dates.price_label_for(dates.variant("500g Box")),
            "₹690 / Bar"
        );
        assert_eq!(dates.price_label_for(None), "From ₹350");

        let bites = catalog.find(&ProductId::new("kunafa-bites")).unwrap();
        assert_eq!(bites.unit_label(), "Box");
    }

    #[test]
    fn test_new_product_defaults() {
        let product = Product::new("p1", "Test Bar", 219);
        assert_eq!(product.min_order_quantity(), 1);
        assert_eq!(product.price_label(), "₹219");
        assert_eq!(product.flavors(), &FlavorOptions::None);
        assert!(product.default_variant().is_none());
    }
}
