//! Catalog filtering by category and free-text search.
//!
//! A product matches when both hold:
//! - the category filter is [`CategoryFilter::All`] or names the product's category
//! - the search term is empty, or occurs case-insensitively in the product's
//!   name or description

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::CategoryId;

/// Slug that selects every category.
pub const ALL_CATEGORIES: &str = "all";

/// Category half of a product filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryId),
}

impl CategoryFilter {
    /// Parse a category slug, treating `all` and the empty string as [`Self::All`].
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        let slug = slug.trim();
        if slug.is_empty() || slug == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(CategoryId::new(slug))
        }
    }

    /// The slug this filter is selected by.
    #[must_use]
    pub fn slug(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(id) => id.as_str(),
        }
    }

    #[must_use]
    pub fn matches(&self, category: &CategoryId) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => id == category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(slug: String) -> Self {
        Self::from_slug(&slug)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.slug().to_owned()
    }
}

/// Active catalog filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductFilter {
    category: CategoryFilter,
    /// Lowercased search term.
    needle: String,
    search: String,
}

impl ProductFilter {
    #[must_use]
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        let search = search.into();
        Self {
            category,
            needle: search.to_lowercase(),
            search,
        }
    }

    #[must_use]
    pub const fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// The search term as entered.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Whether `product` passes both the category and the search test.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(&product.category) && self.matches_search(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        self.needle.is_empty()
            || product.name.to_lowercase().contains(&self.needle)
            || product.description.to_lowercase().contains(&self.needle)
    }

    /// Products matching this filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::ProductId;

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_all_with_empty_search_returns_everything() {
        let catalog = Catalog::directone();
        let filter = ProductFilter::new(CategoryFilter::All, "");
        let result = filter.apply(catalog.products());
        assert_eq!(result.len(), catalog.products().len());
        assert_eq!(result.first().map(|p| p.id), Some(ProductId::new(1)));
        assert_eq!(result.last().map(|p| p.id), Some(ProductId::new(12)));
    }

    #[test]
    fn test_electronics_watch_finds_fitness_watch() {
        let catalog = Catalog::directone();
        let filter = ProductFilter::new(CategoryFilter::from_slug("electronics"), "watch");
        let result = filter.apply(catalog.products());
        assert_eq!(names(&result), vec!["Smart Fitness Watch".to_string()]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::directone();
        let filter = ProductFilter::new(CategoryFilter::All, "BLUETOOTH");
        let result = filter.apply(catalog.products());
        assert_eq!(
            names(&result),
            vec![
                "Wireless Bluetooth Headphones".to_string(),
                "Bluetooth Speaker".to_string()
            ]
        );
    }

    #[test]
    fn test_search_matches_description() {
        let catalog = Catalog::directone();
        // Only the coffee maker mentions a carafe, and only in its description.
        let filter = ProductFilter::new(CategoryFilter::All, "carafe");
        let result = filter.apply(catalog.products());
        assert_eq!(names(&result), vec!["Professional Coffee Maker".to_string()]);
    }

    #[test]
    fn test_category_only() {
        let catalog = Catalog::directone();
        let filter = ProductFilter::new(CategoryFilter::from_slug("books"), "");
        let ids: Vec<_> = filter
            .apply(catalog.products())
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![ProductId::new(11), ProductId::new(12)]);
    }

    #[test]
    fn test_no_matches() {
        let catalog = Catalog::directone();
        let filter = ProductFilter::new(CategoryFilter::from_slug("books"), "headphones");
        assert!(filter.apply(catalog.products()).is_empty());

        let filter = ProductFilter::new(CategoryFilter::from_slug("toys"), "");
        assert!(filter.apply(catalog.products()).is_empty());
    }

    #[test]
    fn test_category_filter_slugs() {
        assert_eq!(CategoryFilter::from_slug("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_slug(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_slug("home"),
            CategoryFilter::Only(CategoryId::new("home"))
        );
        assert_eq!(CategoryFilter::All.slug(), "all");
        assert_eq!(CategoryFilter::from_slug("fashion").slug(), "fashion");
    }
}
