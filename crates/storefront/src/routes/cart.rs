//! Cart route handlers.
//!
//! Cart mutations are plain form posts that redirect back to the page they
//! came from (`return_to`). The cart itself lives in the visitor's session,
//! see [`SessionCart`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use directone_core::{Cart, CartItem, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{self, AppError, Result};
use crate::filters;
use crate::middleware::SessionCart;
use crate::models::safe_return_path;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// Quantity the "−" button submits; zero removes the line.
    pub decrement_quantity: i64,
    pub increment_quantity: i64,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        let quantity = i64::from(item.quantity);
        Self {
            product_id: item.product.id,
            name: item.product.name.clone(),
            image: item.product.image.clone(),
            quantity: item.quantity,
            price: item.product.price.display(),
            line_price: item.line_total().display(),
            decrement_quantity: quantity - 1,
            increment_quantity: quantity + 1,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.total_price().display(),
            item_count: cart.total_items(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub return_to: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: i64,
    pub return_to: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
    pub return_to: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart_count: u32,
    pub cart: CartView,
    pub return_to: String,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub cart_count: u32,
}

/// Display cart page.
#[instrument(skip(cart))]
pub async fn show(SessionCart(cart): SessionCart) -> impl IntoResponse {
    CartShowTemplate {
        cart_count: cart.total_items(),
        cart: CartView::from(cart.cart()),
        return_to: "/cart".to_string(),
    }
}

/// Get cart count badge.
#[instrument(skip(cart))]
pub async fn count(SessionCart(cart): SessionCart) -> impl IntoResponse {
    CartCountTemplate {
        cart_count: cart.total_items(),
    }
}

/// Add one unit of a product to the cart.
///
/// Out-of-stock products are refused here; the cart itself does not check.
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    SessionCart(mut cart): SessionCart,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = state
        .catalog()
        .product(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    if !product.in_stock {
        return Err(AppError::BadRequest(format!(
            "{} is out of stock",
            product.name
        )));
    }

    cart.add_to_cart(product).await?;

    let product_id = product.id.to_string();
    error::add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product_id.as_str())]),
    );
    tracing::info!(product_id = %product.id, units = cart.total_items(), "Added to cart");

    Ok(Redirect::to(safe_return_path(form.return_to.as_deref())))
}

/// Set a cart line's quantity; zero or less removes it.
#[instrument(skip(cart))]
pub async fn update(
    SessionCart(mut cart): SessionCart,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    cart.update_quantity(form.product_id, form.quantity).await?;
    Ok(Redirect::to(safe_return_path(form.return_to.as_deref())))
}

/// Remove a product from the cart.
#[instrument(skip(cart))]
pub async fn remove(
    SessionCart(mut cart): SessionCart,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    cart.remove_from_cart(form.product_id).await?;
    Ok(Redirect::to(safe_return_path(form.return_to.as_deref())))
}

#[cfg(test)]
mod tests {
    use directone_core::{Catalog, Price};

    use super::*;

    #[test]
    fn test_cart_view_from_cart() {
        let catalog = Catalog::directone();
        let mut cart = Cart::new();
        for id in [2, 2, 11] {
            if let Some(product) = catalog.product(ProductId::new(id)) {
                cart.add(product);
            }
        }

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, Price::gbp_from_pence(42_497).display());

        let watch = &view.items[0];
        assert_eq!(watch.quantity, 2);
        assert_eq!(watch.price, "£199.99");
        assert_eq!(watch.line_price, "£399.98");
        assert_eq!(watch.decrement_quantity, 1);
        assert_eq!(watch.increment_quantity, 3);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new());
        assert!(view.is_empty());
        assert_eq!(view.subtotal, "£0.00");
        assert_eq!(view.item_count, 0);
    }
}
