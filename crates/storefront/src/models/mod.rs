//! Session-backed models for storefront.

pub mod session;

pub use session::{CartSession, keys as session_keys};
