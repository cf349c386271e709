//! DirectOne Core - Catalog, cart and checkout domain library.
//!
//! This crate holds everything the storefront knows about the shop that is
//! not presentation:
//! - the static catalog of products, categories and reviews
//! - the catalog filter (category + free-text search)
//! - the cart state manager and its storage contract
//! - the checkout flow
//!
//! # Architecture
//!
//! The core crate performs no I/O of its own. Persistence goes through the
//! [`storage::CartStorage`] trait, which the storefront implements on top of
//! per-browser sessions and which [`storage::MemoryStorage`] implements for
//! tests and tooling.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices
//! - [`catalog`] - Static products, categories and reviews
//! - [`filter`] - Catalog filtering
//! - [`cart`] - Cart line items and the persisted cart manager
//! - [`storage`] - Key/value storage contract for the cart
//! - [`checkout`] - Checkout form data and order submission

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod filter;
pub mod storage;
pub mod types;

pub use cart::{Cart, CartItem, CartManager};
pub use catalog::{Catalog, Category, Product, Review};
pub use checkout::{
    CheckoutData, CheckoutError, CheckoutField, ORDER_PLACED_MESSAGE, OrderAcknowledgement,
    PaymentMethod,
};
pub use filter::{CategoryFilter, ProductFilter};
pub use storage::{CART_STORAGE_KEY, CartStorage, MemoryStorage, StorageError};
pub use types::*;
