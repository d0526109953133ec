//! Core value types for the storefront.
//!
//! This module provides type-safe wrappers for identifiers, prices and the
//! WhatsApp destination number.

pub mod id;
pub mod phone;
pub mod price;

pub use id::ProductId;
pub use phone::{PhoneNumberError, WhatsAppNumber};
pub use price::Price;
