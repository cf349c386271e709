//! Static catalog: products, categories and reviews.
//!
//! The catalog is immutable for the life of the process. [`Catalog::directone`]
//! returns the shop's built-in catalog, built once on first use; tests and
//! tools can assemble their own with [`Catalog::new`].

mod data;

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::filter::ProductFilter;
use crate::types::{CategoryId, Price, ProductId, ReviewId, discount_percentage};

static DIRECTONE: LazyLock<Catalog> = LazyLock::new(data::directone);

/// A product for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Pre-sale price, shown struck through with a discount badge.
    pub original_price: Option<Price>,
    /// Image URL.
    pub image: String,
    pub category: CategoryId,
    /// Average rating, 0 to 5.
    pub rating: Decimal,
    pub review_count: u32,
    pub in_stock: bool,
    pub features: Vec<String>,
}

impl Product {
    /// Percentage saved against the original price, if there is one.
    #[must_use]
    pub fn discount_percentage(&self) -> Option<i64> {
        self.original_price
            .as_ref()
            .and_then(|original| discount_percentage(original, &self.price))
    }

    /// Number of filled stars when rendering the rating (rounded down).
    #[must_use]
    pub fn full_stars(&self) -> u8 {
        self.rating
            .floor()
            .clamp(Decimal::ZERO, Decimal::from(5))
            .to_u8()
            .unwrap_or(0)
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Display count. Maintained by hand alongside the product list, so it
    /// is not guaranteed to match the number of products in the category.
    pub count: u32,
}

/// A customer review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_name: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub comment: String,
    /// Review date as `YYYY-MM-DD`.
    pub date: String,
    pub verified: bool,
}

/// The read-only set of products, categories and reviews.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    reviews: Vec<Review>,
}

impl Catalog {
    /// Assemble a catalog from its parts.
    #[must_use]
    pub const fn new(
        products: Vec<Product>,
        categories: Vec<Category>,
        reviews: Vec<Review>,
    ) -> Self {
        Self {
            products,
            categories,
            reviews,
        }
    }

    /// The DirectOne shop catalog.
    #[must_use]
    pub fn directone() -> &'static Self {
        &DIRECTONE
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All categories, starting with the `all` pseudo-category.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a category by ID.
    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Reviews written for a product, in catalog order.
    pub fn reviews_for(&self, product_id: ProductId) -> impl Iterator<Item = &Review> {
        self.reviews
            .iter()
            .filter(move |r| r.product_id == product_id)
    }

    /// Products matching `filter`, in catalog order.
    #[must_use]
    pub fn filtered(&self, filter: &ProductFilter) -> Vec<&Product> {
        filter.apply(&self.products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directone_catalog_shape() {
        let catalog = Catalog::directone();
        assert_eq!(catalog.products().len(), 12);
        assert_eq!(catalog.categories().len(), 5);
        assert_eq!(catalog.reviews_for(ProductId::new(1)).count(), 2);
        assert_eq!(catalog.reviews_for(ProductId::new(3)).count(), 1);
        assert_eq!(catalog.reviews_for(ProductId::new(2)).count(), 0);
    }

    #[test]
    fn test_product_lookup() {
        let catalog = Catalog::directone();
        let watch = catalog.product(ProductId::new(2));
        assert_eq!(
            watch.map(|p| p.name.as_str()),
            Some("Smart Fitness Watch")
        );
        assert!(catalog.product(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_category_lookup() {
        let catalog = Catalog::directone();
        let books = catalog.category(&CategoryId::new("books"));
        assert_eq!(books.map(|c| c.name.as_str()), Some("Books"));
        assert!(catalog.category(&CategoryId::new("toys")).is_none());
    }

    #[test]
    fn test_every_product_category_exists() {
        let catalog = Catalog::directone();
        for product in catalog.products() {
            assert!(
                catalog.category(&product.category).is_some(),
                "product {} has unknown category {}",
                product.id,
                product.category
            );
        }
    }

    #[test]
    fn test_product_discount() {
        let catalog = Catalog::directone();
        let headphones = catalog.product(ProductId::new(1));
        assert_eq!(headphones.and_then(Product::discount_percentage), Some(31));

        let watch = catalog.product(ProductId::new(2));
        assert_eq!(watch.and_then(Product::discount_percentage), None);
    }

    #[test]
    fn test_full_stars() {
        let catalog = Catalog::directone();
        let sheets = catalog.product(ProductId::new(3));
        assert_eq!(sheets.map(Product::full_stars), Some(4));
    }
}
