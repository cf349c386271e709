//! Catalog page query string: the active filter plus the page's view toggles.
//!
//! The catalog page keeps all of its view state in the URL. Each toggle is an
//! independent field; opening the cart drawer does not close the product
//! overlay, and so on.
//!
//! ```text
//! /?category=electronics&search=watch&product=2&cart=true&menu=true
//! ```

use directone_core::{CategoryFilter, ProductFilter, ProductId};
use serde::Deserialize;

/// Query parameters for `GET /`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    /// Category slug; empty or `all` selects every category.
    pub category: String,
    /// Free-text search term.
    pub search: String,
    /// Product shown in the detail overlay.
    pub product: Option<ProductId>,
    /// Cart drawer open.
    pub cart: bool,
    /// Mobile menu open.
    pub menu: bool,
}

impl CatalogQuery {
    /// The product filter selected by this query.
    #[must_use]
    pub fn filter(&self) -> ProductFilter {
        ProductFilter::new(CategoryFilter::from_slug(&self.category), self.search.clone())
    }

    /// Canonical category slug (`all` when unset).
    #[must_use]
    pub fn category_slug(&self) -> String {
        CategoryFilter::from_slug(&self.category).slug().to_owned()
    }

    #[must_use]
    pub fn with_category(&self, slug: &str) -> Self {
        Self {
            category: slug.to_owned(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_product(&self, product: Option<ProductId>) -> Self {
        Self {
            product,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_cart(&self, open: bool) -> Self {
        Self {
            cart: open,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_menu(&self, open: bool) -> Self {
        Self {
            menu: open,
            ..self.clone()
        }
    }

    /// Path and query string for this state, omitting defaults.
    #[must_use]
    pub fn href(&self) -> String {
        let mut params = Vec::new();

        let category = self.category_slug();
        if category != directone_core::filter::ALL_CATEGORIES {
            params.push(format!("category={}", urlencoding::encode(&category)));
        }
        if !self.search.is_empty() {
            params.push(format!("search={}", urlencoding::encode(&self.search)));
        }
        if let Some(product) = self.product {
            params.push(format!("product={product}"));
        }
        if self.cart {
            params.push("cart=true".to_string());
        }
        if self.menu {
            params.push("menu=true".to_string());
        }

        if params.is_empty() {
            "/".to_string()
        } else {
            format!("/?{}", params.join("&"))
        }
    }
}

/// Validate a post-action redirect target.
///
/// Only same-site absolute paths are allowed; anything else (missing, a full
/// URL, a protocol-relative `//host` path) falls back to `/`.
#[must_use]
pub fn safe_return_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_href_is_root() {
        assert_eq!(CatalogQuery::default().href(), "/");
        assert_eq!(CatalogQuery::default().with_category("all").href(), "/");
    }

    #[test]
    fn test_href_round_trips_state() {
        let query = CatalogQuery {
            category: "electronics".to_string(),
            search: "smart watch".to_string(),
            product: Some(ProductId::new(2)),
            cart: true,
            menu: false,
        };
        assert_eq!(
            query.href(),
            "/?category=electronics&search=smart%20watch&product=2&cart=true"
        );
    }

    #[test]
    fn test_toggles_are_independent() {
        let query = CatalogQuery::default()
            .with_product(Some(ProductId::new(5)))
            .with_cart(true);
        assert!(query.cart);
        assert_eq!(query.product, Some(ProductId::new(5)));

        let closed = query.with_cart(false);
        assert_eq!(closed.product, Some(ProductId::new(5)));
        assert!(!closed.menu);
        assert_eq!(closed.href(), "/?product=5");
    }

    #[test]
    fn test_filter_from_query() {
        let query = CatalogQuery {
            category: "books".to_string(),
            search: "Journal".to_string(),
            ..CatalogQuery::default()
        };
        let filter = query.filter();
        assert_eq!(filter.category().slug(), "books");
        assert_eq!(filter.search(), "Journal");
    }

    #[test]
    fn test_safe_return_path() {
        assert_eq!(safe_return_path(Some("/?cart=true")), "/?cart=true");
        assert_eq!(safe_return_path(Some("/cart")), "/cart");
        assert_eq!(safe_return_path(None), "/");
        assert_eq!(safe_return_path(Some("https://evil.test/")), "/");
        assert_eq!(safe_return_path(Some("//evil.test/")), "/");
        assert_eq!(safe_return_path(Some("/\\evil.test")), "/");
        assert_eq!(safe_return_path(Some("")), "/");
    }
}
