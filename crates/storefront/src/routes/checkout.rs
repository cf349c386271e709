//! Checkout route handlers.
//!
//! Checkout is a single form. Submitting it places a simulated order: the
//! cart is emptied and an acknowledgment page is shown. No payment is taken
//! and nothing about the order is stored.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use directone_core::checkout::{self, OrderAcknowledgement};
use directone_core::{CheckoutData, CheckoutError, PaymentMethod};
use tracing::instrument;

use crate::error::{self, Result};
use crate::filters;
use crate::middleware::SessionCart;
use crate::routes::cart::CartView;

/// Payment method radio option.
#[derive(Clone)]
pub struct PaymentOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

/// Radio options for the offered payment methods.
fn payment_options(selected: PaymentMethod) -> Vec<PaymentOptionView> {
    PaymentMethod::OFFERED
        .iter()
        .map(|method| PaymentOptionView {
            value: method.as_str(),
            label: method.label(),
            checked: *method == selected,
        })
        .collect()
}

/// Checkout form template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutShowTemplate {
    pub cart_count: u32,
    pub cart: CartView,
    pub form: CheckoutData,
    pub payment_options: Vec<PaymentOptionView>,
    pub error: Option<String>,
}

/// Order acknowledgment template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct CheckoutConfirmationTemplate {
    pub cart_count: u32,
    pub message: &'static str,
    pub total: String,
    pub item_count: u32,
    pub payment_method: &'static str,
}

impl From<OrderAcknowledgement> for CheckoutConfirmationTemplate {
    fn from(ack: OrderAcknowledgement) -> Self {
        Self {
            cart_count: 0,
            message: ack.message,
            total: ack.total.display(),
            item_count: ack.item_count,
            payment_method: ack.payment_method.label(),
        }
    }
}

/// Display the checkout form, or send an empty cart back to the cart page.
#[instrument(skip(cart))]
pub async fn show(SessionCart(cart): SessionCart) -> Response {
    if cart.cart().is_empty() {
        return Redirect::to("/cart").into_response();
    }

    let form = CheckoutData::default();
    CheckoutShowTemplate {
        cart_count: cart.total_items(),
        cart: CartView::from(cart.cart()),
        payment_options: payment_options(form.payment_method),
        form,
        error: None,
    }
    .into_response()
}

/// Submit the checkout form.
///
/// A missing required field re-renders the form with the entered values and
/// a 422 status; the cart is left as it was.
#[instrument(skip_all, fields(payment_method = %form.payment_method))]
pub async fn submit(
    SessionCart(mut cart): SessionCart,
    Form(form): Form<CheckoutData>,
) -> Result<Response> {
    match checkout::submit(form.clone(), &mut cart).await {
        Ok(ack) => {
            error::add_breadcrumb("checkout", "Order placed", None);
            Ok(CheckoutConfirmationTemplate::from(ack).into_response())
        }
        Err(CheckoutError::MissingField(field)) => {
            tracing::debug!(%field, "Checkout form incomplete");
            let template = CheckoutShowTemplate {
                cart_count: cart.total_items(),
                cart: CartView::from(cart.cart()),
                payment_options: payment_options(form.payment_method),
                error: Some(CheckoutError::MissingField(field).to_string()),
                form,
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response())
        }
        Err(CheckoutError::Storage(e)) => Err(e.into()),
    }
}
