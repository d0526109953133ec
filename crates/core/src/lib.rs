//! Darsi's Chocolate core - catalog, cart and order hand-off.
//!
//! This crate holds the decision logic of the shop:
//! - `storefront` - the public single-page site that renders and mutates it
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no HTTP,
//! no session handling. The storefront owns one [`Cart`] per browser session
//! and changes it exclusively through the operations defined here.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, prices and phone numbers
//! - [`catalog`] - Immutable products with variants and flavor options
//! - [`cart`] - Line items, merge rules and derived totals
//! - [`selection`] - Per-product option picking before an add
//! - [`checkout`] - Order summary and WhatsApp deep link hand-off

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod selection;
pub mod types;

pub use cart::{AddItemOptions, Cart, CartLineItem, LineItemKey, LineItemKeyError};
pub use catalog::{Catalog, Category, FlavorOptions, Product, Variant};
pub use checkout::{Checkout, Enquiry, HandOff};
pub use selection::{ProductSelection, SelectionError};
pub use types::*;
