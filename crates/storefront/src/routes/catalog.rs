//! Catalog page: product grid with category and search filters.
//!
//! The product detail overlay, cart drawer and mobile menu are rendered on
//! top of the grid according to the toggles in [`CatalogQuery`].

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::SessionCart;
use crate::models::CatalogQuery;
use crate::routes::cart::CartView;
use crate::routes::products::{ProductDetailView, ProductView};
use crate::state::AppState;

/// Category navigation link.
#[derive(Clone)]
pub struct CategoryLink {
    pub name: String,
    pub count: u32,
    pub href: String,
    pub active: bool,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog.html")]
pub struct CatalogTemplate {
    pub cart_count: u32,
    pub category: String,
    pub search: String,
    pub category_links: Vec<CategoryLink>,
    pub products: Vec<ProductView>,
    pub selected_product: Option<ProductDetailView>,
    pub cart_open: bool,
    pub cart: CartView,
    pub menu_open: bool,
    pub menu_toggle_href: String,
    pub open_cart_href: String,
    pub close_cart_href: String,
    /// Current page, for forms that redirect back here.
    pub return_to: String,
}

/// Display the catalog.
#[instrument(skip(state, cart))]
pub async fn index(
    State(state): State<AppState>,
    SessionCart(cart): SessionCart,
    Query(query): Query<CatalogQuery>,
) -> Result<CatalogTemplate> {
    let catalog = state.catalog();
    let category = query.category_slug();

    let category_links = catalog
        .categories()
        .iter()
        .map(|c| CategoryLink {
            name: c.name.clone(),
            count: c.count,
            href: query.with_category(c.id.as_str()).href(),
            active: c.id.as_str() == category,
        })
        .collect();

    let products = catalog
        .filtered(&query.filter())
        .into_iter()
        .map(|product| ProductView {
            detail_href: query.with_product(Some(product.id)).href(),
            ..ProductView::new(product, catalog)
        })
        .collect();

    let selected_product = match query.product {
        Some(id) => {
            let product = catalog
                .product(id)
                .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
            Some(ProductDetailView::new(
                product,
                catalog,
                query.with_product(None).href(),
            ))
        }
        None => None,
    };

    tracing::debug!(
        category = %category,
        search = %query.search,
        "Rendering catalog"
    );

    Ok(CatalogTemplate {
        cart_count: cart.total_items(),
        category,
        search: query.search.clone(),
        category_links,
        products,
        selected_product,
        cart_open: query.cart,
        cart: CartView::from(cart.cart()),
        menu_open: query.menu,
        menu_toggle_href: query.with_menu(!query.menu).href(),
        open_cart_href: query.with_cart(true).href(),
        close_cart_href: query.with_cart(false).href(),
        return_to: query.href(),
    })
}
