//! Shopping cart and its persisted state manager.
//!
//! [`Cart`] is the plain in-memory list of line items. [`CartManager`] wraps a
//! cart together with a [`CartStorage`] and writes the whole cart back to
//! storage after every mutation.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::catalog::Product;
use crate::storage::{CART_STORAGE_KEY, CartStorage, StorageError};
use crate::types::{CurrencyCode, Price, ProductId};

/// A product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl CartItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Ordered list of cart items, at most one per product.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id == product_id)
    }

    /// Add one unit of `product`, merging with an existing line if present.
    ///
    /// Stock is not checked here.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product.id)
        {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    /// Remove the line for `product_id`. No-op if it is not in the cart.
    pub fn remove(&mut self, product_id: ProductId) {
        self.items.retain(|item| item.product.id != product_id);
    }

    /// Set the quantity for `product_id`; zero or negative removes the line.
    ///
    /// Quantities beyond `u32::MAX` are clamped. Products not already in the
    /// cart are left out.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product_id)
        {
            item.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of line totals, in the currency of the first line (GBP when empty).
    #[must_use]
    pub fn total_price(&self) -> Price {
        let currency_code = self
            .items
            .first()
            .map_or_else(CurrencyCode::default, |item| item.product.price.currency_code);

        let amount = self
            .items
            .iter()
            .map(|item| item.line_total().amount)
            .sum();

        Price::new(amount, currency_code)
    }

    /// Total number of units, for the cart badge.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity))
    }

    /// Encode as the JSON array stored under [`CART_STORAGE_KEY`].
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON array of cart items.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid cart.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A cart bound to the storage it is persisted in.
///
/// Every mutating operation rewrites the full cart to storage before
/// returning.
#[derive(Debug)]
pub struct CartManager<S> {
    storage: S,
    cart: Cart,
}

impl<S: CartStorage> CartManager<S> {
    /// Restore the cart saved in `storage`.
    ///
    /// Falls back to an empty cart when nothing is stored, the read fails, or
    /// the stored value does not parse. Failures are logged and swallowed.
    #[instrument(skip(storage))]
    pub async fn restore(storage: S) -> Self {
        let cart = match storage.get_item(CART_STORAGE_KEY).await {
            Ok(Some(json)) => Cart::from_json(&json).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding unreadable stored cart");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart");
                Cart::new()
            }
        };

        Self { storage, cart }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Add one unit of `product` and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written to storage.
    pub async fn add_to_cart(&mut self, product: &Product) -> Result<(), StorageError> {
        self.cart.add(product);
        self.persist().await
    }

    /// Remove the line for `product_id` and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written to storage.
    pub async fn remove_from_cart(&mut self, product_id: ProductId) -> Result<(), StorageError> {
        self.cart.remove(product_id);
        self.persist().await
    }

    /// Set a line's quantity (zero or less removes it) and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written to storage.
    pub async fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), StorageError> {
        self.cart.update_quantity(product_id, quantity);
        self.persist().await
    }

    /// Empty the cart and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written to storage.
    pub async fn clear(&mut self) -> Result<(), StorageError> {
        self.cart.clear();
        self.persist().await
    }

    #[must_use]
    pub fn total_price(&self) -> Price {
        self.cart.total_price()
    }

    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.cart.total_items()
    }

    async fn persist(&self) -> Result<(), StorageError> {
        let json = self.cart.to_json()?;
        self.storage.set_item(CART_STORAGE_KEY, json).await?;
        debug!(
            items = self.cart.items().len(),
            units = self.cart.total_items(),
            "Cart persisted"
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::storage::MemoryStorage;

    fn product(id: i32, pence: i64) -> Product {
        let mut product = Catalog::directone()
            .product(ProductId::new(1))
            .cloned()
            .unwrap();
        product.id = ProductId::new(id);
        product.price = Price::gbp_from_pence(pence);
        product
    }

    #[test]
    fn test_add_same_product_twice_merges() {
        let mut cart = Cart::new();
        let p = product(1, 1000);
        cart.add(&p);
        cart.add(&p);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item(p.id).map(|i| i.quantity), Some(2));
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&product(3, 100));
        cart.add(&product(1, 100));
        cart.add(&product(3, 100));
        let ids: Vec<_> = cart.items().iter().map(|i| i.product.id).collect();
        assert_eq!(ids, vec![ProductId::new(3), ProductId::new(1)]);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100));
        cart.add(&product(2, 100));
        cart.remove(ProductId::new(1));
        assert!(cart.item(ProductId::new(1)).is_none());
        assert_eq!(cart.items().len(), 1);

        // Missing product is a no-op
        cart.remove(ProductId::new(42));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100));
        cart.add(&product(2, 100));

        cart.update_quantity(ProductId::new(1), 0);
        assert!(cart.item(ProductId::new(1)).is_none());

        cart.update_quantity(ProductId::new(2), -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100));
        cart.update_quantity(ProductId::new(1), 250);
        assert_eq!(cart.item(ProductId::new(1)).map(|i| i.quantity), Some(250));

        cart.update_quantity(ProductId::new(1), i64::MAX);
        assert_eq!(
            cart.item(ProductId::new(1)).map(|i| i.quantity),
            Some(u32::MAX)
        );
    }

    #[test]
    fn test_update_quantity_missing_product_is_noop() {
        let mut cart = Cart::new();
        cart.update_quantity(ProductId::new(5), 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        let ten = product(1, 1000);
        let five = product(2, 500);
        cart.add(&ten);
        cart.add(&ten);
        cart.add(&five);

        assert_eq!(cart.total_price(), Price::gbp_from_pence(2500));
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_empty_totals() {
        let cart = Cart::new();
        assert_eq!(cart.total_price(), Price::zero(CurrencyCode::GBP));
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut cart = Cart::new();
        cart.add(&product(1, 8999));
        cart.add(&product(7, 4999));
        cart.update_quantity(ProductId::new(7), 4);

        let json = cart.to_json().unwrap();
        assert!(json.starts_with('['));
        assert_eq!(Cart::from_json(&json).unwrap(), cart);
    }

    #[test]
    fn test_stored_json_uses_camel_case_keys() {
        let mut cart = Cart::new();
        cart.add(&product(1, 8999));

        let json = cart.to_json().unwrap();
        assert!(json.contains("\"originalPrice\""));
        assert!(json.contains("\"inStock\""));
        assert!(json.contains("\"currencyCode\":\"GBP\""));
        assert!(!json.contains("currency_code"));
    }

    #[tokio::test]
    async fn test_manager_restores_empty_when_absent() {
        let manager = CartManager::restore(MemoryStorage::new()).await;
        assert!(manager.cart().is_empty());
    }

    #[tokio::test]
    async fn test_manager_restores_empty_on_corrupt_storage() {
        let storage = MemoryStorage::new();
        storage
            .set_item(CART_STORAGE_KEY, "{not json".to_string())
            .await
            .unwrap();

        let manager = CartManager::restore(storage).await;
        assert!(manager.cart().is_empty());
    }

    #[tokio::test]
    async fn test_manager_persists_every_mutation() {
        let storage = MemoryStorage::new();
        let mut manager = CartManager::restore(storage.clone()).await;
        let p = product(1, 1000);

        manager.add_to_cart(&p).await.unwrap();
        let stored = storage.get_item(CART_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(Cart::from_json(&stored).unwrap().total_items(), 1);

        manager.update_quantity(p.id, 5).await.unwrap();
        let stored = storage.get_item(CART_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(Cart::from_json(&stored).unwrap().total_items(), 5);

        manager.remove_from_cart(p.id).await.unwrap();
        let stored = storage.get_item(CART_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(stored, "[]");
    }

    #[tokio::test]
    async fn test_manager_round_trip_through_storage() {
        let storage = MemoryStorage::new();
        let mut manager = CartManager::restore(storage.clone()).await;
        manager.add_to_cart(&product(1, 1000)).await.unwrap();
        manager.add_to_cart(&product(2, 500)).await.unwrap();
        manager.add_to_cart(&product(1, 1000)).await.unwrap();

        let restored = CartManager::restore(storage).await;
        assert_eq!(restored.cart(), manager.cart());
        assert_eq!(restored.total_price(), Price::gbp_from_pence(2500));
        assert_eq!(restored.total_items(), 3);
    }
}
