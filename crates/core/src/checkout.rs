//! Checkout form data and order submission.
//!
//! Checkout is simulated: submitting checks that every required field is
//! filled in, empties the cart, and hands back an acknowledgment. Nothing is
//! charged and no order record is kept.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::cart::CartManager;
use crate::storage::{CartStorage, StorageError};
use crate::types::Price;

/// Message shown after a successful checkout.
pub const ORDER_PLACED_MESSAGE: &str =
    "Order placed successfully! Thank you for shopping with DirectOne.";

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Paypal,
    ApplePay,
    GooglePay,
}

impl PaymentMethod {
    /// Methods presented on the checkout form.
    pub const OFFERED: [Self; 2] = [Self::Card, Self::Paypal];

    /// Form value, e.g. `apple-pay`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Paypal => "paypal",
            Self::ApplePay => "apple-pay",
            Self::GooglePay => "google-pay",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Card => "Credit/Debit Card",
            Self::Paypal => "PayPal",
            Self::ApplePay => "Apple Pay",
            Self::GooglePay => "Google Pay",
        }
    }

    #[must_use]
    pub fn is_offered(&self) -> bool {
        Self::OFFERED.contains(self)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required text fields of the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutField {
    Email,
    FirstName,
    LastName,
    Address,
    City,
    Postcode,
}

impl CheckoutField {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email address",
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Address => "Address",
            Self::City => "City",
            Self::Postcode => "Postcode",
        }
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that can occur when submitting checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required field was left empty.
    #[error("{0} is required")]
    MissingField(CheckoutField),

    /// The emptied cart could not be saved.
    #[error("failed to clear cart: {0}")]
    Storage(#[from] StorageError),
}

/// Checkout form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutData {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutData {
    /// Check that every required field has a value.
    ///
    /// Fields are checked in form order and only presence is tested, like a
    /// browser's `required` attribute.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] for the first empty field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let fields = [
            (CheckoutField::Email, &self.email),
            (CheckoutField::FirstName, &self.first_name),
            (CheckoutField::LastName, &self.last_name),
            (CheckoutField::Address, &self.address),
            (CheckoutField::City, &self.city),
            (CheckoutField::Postcode, &self.postcode),
        ];

        match fields.into_iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(CheckoutError::MissingField(field)),
            None => Ok(()),
        }
    }
}

/// What the customer sees after placing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAcknowledgement {
    pub message: &'static str,
    pub total: Price,
    pub item_count: u32,
    pub payment_method: PaymentMethod,
}

/// Place the order: validate the form, then empty the cart.
///
/// `data` is consumed; the form starts blank for the next checkout.
///
/// # Errors
///
/// Returns an error if a required field is missing (the cart is left
/// untouched) or if the emptied cart cannot be persisted.
#[instrument(skip_all, fields(payment_method = %data.payment_method))]
pub async fn submit<S: CartStorage>(
    data: CheckoutData,
    cart: &mut CartManager<S>,
) -> Result<OrderAcknowledgement, CheckoutError> {
    data.validate()?;

    let acknowledgement = OrderAcknowledgement {
        message: ORDER_PLACED_MESSAGE,
        total: cart.total_price(),
        item_count: cart.total_items(),
        payment_method: data.payment_method,
    };

    cart.clear().await?;

    info!(
        total = %acknowledgement.total,
        item_count = acknowledgement.item_count,
        "Order placed"
    );

    Ok(acknowledgement)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::storage::{CART_STORAGE_KEY, MemoryStorage};
    use crate::types::ProductId;

    fn filled_form() -> CheckoutData {
        CheckoutData {
            email: "sarah@example.com".to_string(),
            first_name: "Sarah".to_string(),
            last_name: "M".to_string(),
            address: "1 High Street".to_string(),
            city: "London".to_string(),
            postcode: "N1 1AA".to_string(),
            payment_method: PaymentMethod::Paypal,
        }
    }

    async fn cart_with_items(storage: MemoryStorage) -> CartManager<MemoryStorage> {
        let catalog = Catalog::directone();
        let mut cart = CartManager::restore(storage).await;
        cart.add_to_cart(catalog.product(ProductId::new(1)).unwrap())
            .await
            .unwrap();
        cart.add_to_cart(catalog.product(ProductId::new(12)).unwrap())
            .await
            .unwrap();
        cart.add_to_cart(catalog.product(ProductId::new(12)).unwrap())
            .await
            .unwrap();
        cart
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        assert!(filled_form().validate().is_ok());

        let form = CheckoutData {
            city: String::new(),
            postcode: String::new(),
            ..filled_form()
        };
        assert!(matches!(
            form.validate(),
            Err(CheckoutError::MissingField(CheckoutField::City))
        ));

        let err = CheckoutData::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "Email address is required");
    }

    #[test]
    fn test_validate_only_checks_presence() {
        let form = CheckoutData {
            email: "not-an-email".to_string(),
            postcode: " ".to_string(),
            ..filled_form()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_payment_methods() {
        assert_eq!(
            PaymentMethod::OFFERED,
            [PaymentMethod::Card, PaymentMethod::Paypal]
        );
        assert!(!PaymentMethod::ApplePay.is_offered());
        assert!(!PaymentMethod::GooglePay.is_offered());
        assert_eq!(PaymentMethod::default(), PaymentMethod::Card);

        let parsed: PaymentMethod = serde_json::from_str("\"google-pay\"").unwrap();
        assert_eq!(parsed, PaymentMethod::GooglePay);
        assert_eq!(PaymentMethod::ApplePay.to_string(), "apple-pay");
    }

    #[tokio::test]
    async fn test_submit_empties_cart_and_acknowledges() {
        let storage = MemoryStorage::new();
        let mut cart = cart_with_items(storage.clone()).await;

        let ack = submit(filled_form(), &mut cart).await.unwrap();

        assert_eq!(ack.message, ORDER_PLACED_MESSAGE);
        // 89.99 + 2 * 19.99
        assert_eq!(ack.total, Price::gbp_from_pence(12_997));
        assert_eq!(ack.item_count, 3);
        assert_eq!(ack.payment_method, PaymentMethod::Paypal);

        assert!(cart.cart().is_empty());
        assert_eq!(
            storage.get_item(CART_STORAGE_KEY).await.unwrap(),
            Some("[]".to_string())
        );
    }

    #[tokio::test]
    async fn test_submit_with_unoffered_method_still_succeeds() {
        let mut cart = cart_with_items(MemoryStorage::new()).await;
        let form = CheckoutData {
            payment_method: PaymentMethod::ApplePay,
            ..filled_form()
        };
        let ack = submit(form, &mut cart).await.unwrap();
        assert_eq!(ack.payment_method, PaymentMethod::ApplePay);
        assert!(cart.cart().is_empty());
    }

    #[tokio::test]
    async fn test_submit_missing_field_keeps_cart() {
        let mut cart = cart_with_items(MemoryStorage::new()).await;
        let form = CheckoutData {
            last_name: String::new(),
            ..filled_form()
        };

        let result = submit(form, &mut cart).await;
        assert!(matches!(
            result,
            Err(CheckoutError::MissingField(CheckoutField::LastName))
        ));
        assert_eq!(cart.total_items(), 3);
    }

    #[tokio::test]
    async fn test_submit_empty_cart_succeeds() {
        let mut cart = CartManager::restore(MemoryStorage::new()).await;
        let ack = submit(filled_form(), &mut cart).await.unwrap();
        assert_eq!(ack.item_count, 0);
    }
}
