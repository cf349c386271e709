//! Product route handlers and product display data.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use directone_core::{Catalog, Product, ProductId, Review};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::SessionCart;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub original_price: Option<String>,
    pub discount_percent: Option<i64>,
    pub image: String,
    pub category_name: String,
    pub rating: String,
    pub full_stars: u8,
    pub review_count: u32,
    pub in_stock: bool,
    pub features: Vec<String>,
    /// Link that opens this product's detail view.
    pub detail_href: String,
}

impl ProductView {
    /// Build the view for `product`, resolving its category name in `catalog`.
    #[must_use]
    pub fn new(product: &Product, catalog: &Catalog) -> Self {
        let category_name = catalog
            .category(&product.category)
            .map_or_else(|| product.category.to_string(), |c| c.name.clone());

        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            original_price: product.original_price.as_ref().map(|p| p.display()),
            discount_percent: product.discount_percentage(),
            image: product.image.clone(),
            category_name,
            rating: product.rating.to_string(),
            full_stars: product.full_stars(),
            review_count: product.review_count,
            in_stock: product.in_stock,
            features: product.features.clone(),
            detail_href: format!("/products/{}", product.id),
        }
    }
}

/// Review display data for templates.
#[derive(Clone)]
pub struct ReviewView {
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub date: String,
    pub verified: bool,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            user_name: review.user_name.clone(),
            rating: review.rating,
            comment: review.comment.clone(),
            date: review.date.clone(),
            verified: review.verified,
        }
    }
}

/// Product detail (overlay or page) display data.
#[derive(Clone)]
pub struct ProductDetailView {
    pub product: ProductView,
    pub reviews: Vec<ReviewView>,
    /// Link that dismisses the detail view.
    pub close_href: String,
}

impl ProductDetailView {
    #[must_use]
    pub fn new(product: &Product, catalog: &Catalog, close_href: String) -> Self {
        Self {
            product: ProductView::new(product, catalog),
            reviews: catalog
                .reviews_for(product.id)
                .map(ReviewView::from)
                .collect(),
            close_href,
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub cart_count: u32,
    pub detail: ProductDetailView,
    pub return_to: String,
}

/// Display product detail page.
#[instrument(skip(state, cart))]
pub async fn show(
    State(state): State<AppState>,
    SessionCart(cart): SessionCart,
    Path(id): Path<ProductId>,
) -> Result<ProductShowTemplate> {
    let catalog = state.catalog();
    let product = catalog
        .product(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductShowTemplate {
        cart_count: cart.total_items(),
        detail: ProductDetailView::new(product, catalog, "/".to_string()),
        return_to: format!("/products/{id}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_view_formats_prices() {
        let catalog = Catalog::directone();
        let Some(headphones) = catalog.product(ProductId::new(1)) else {
            panic!("headphones missing from catalog");
        };

        let view = ProductView::new(headphones, catalog);
        assert_eq!(view.price, "£89.99");
        assert_eq!(view.original_price.as_deref(), Some("£129.99"));
        assert_eq!(view.discount_percent, Some(31));
        assert_eq!(view.category_name, "Electronics");
        assert_eq!(view.rating, "4.8");
        assert_eq!(view.detail_href, "/products/1");
    }

    #[test]
    fn test_detail_view_collects_reviews() {
        let catalog = Catalog::directone();
        let Some(headphones) = catalog.product(ProductId::new(1)) else {
            panic!("headphones missing from catalog");
        };

        let detail = ProductDetailView::new(headphones, catalog, "/".to_string());
        let authors: Vec<_> = detail.reviews.iter().map(|r| r.user_name.as_str()).collect();
        assert_eq!(authors, vec!["Sarah M.", "James R."]);
    }
}
