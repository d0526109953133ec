//! The per-session cart store.
//!
//! Each browser session owns exactly one [`Cart`], serialized under
//! [`keys::CART`]. Handlers obtain it through the [`CartSession`] extractor,
//! mutate it with the `Cart` operations and persist it with
//! [`CartSession::save`].

use axum::{extract::FromRequestParts, http::request::Parts};
use darsi_core::Cart;
use tower_sessions::Session;

use crate::error::AppError;

/// Session keys.
pub mod keys {
    /// Key for the serialized cart.
    pub const CART: &str = "cart";
}

/// Extractor giving a handler the session's cart.
///
/// A session without a stored cart starts with an empty, closed one.
/// Without a session layer in front of the router the extractor fails
/// with a 500 instead of silently handing out a throwaway cart.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut cart: CartSession) -> Result<Redirect> {
///     cart.cart_mut().clear();
///     cart.save().await?;
///     Ok(Redirect::to("/"))
/// }
/// ```
pub struct CartSession {
    session: Session,
    cart: Cart,
}

impl CartSession {
    /// The cart as loaded for this request, including unsaved changes.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable access for cart operations. Call [`Self::save`] afterwards.
    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Write the cart back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn save(&self) -> Result<(), AppError> {
        self.session.insert(keys::CART, &self.cart).await?;
        tracing::debug!(
            item_count = self.cart.total_item_count(),
            total = %self.cart.total_price(),
            is_open = self.cart.is_open(),
            "Cart saved"
        );
        Ok(())
    }
}

impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts.extensions.get::<Session>().cloned().ok_or_else(|| {
            AppError::Internal("cart store used outside a session layer".to_string())
        })?;

        let cart = session.get::<Cart>(keys::CART).await?.unwrap_or_default();

        Ok(Self { session, cart })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;

    use super::*;

    #[tokio::test]
    async fn test_missing_session_layer_fails_loudly() {
        let (mut parts, ()) = Request::builder().uri("/cart").body(()).unwrap().into_parts();

        let Err(err) = CartSession::from_request_parts(&mut parts, &()).await else {
            panic!("extractor must reject requests without a session");
        };

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
