//! Billing domain module.
//!
//! Plans and prices, checkout preferences, gateway payment views, and the
//! normalized notification payload consumed by the activation engine.

mod checkout;
mod notification;
mod payment;
mod plan;

pub use checkout::{
    CheckoutItem, CheckoutKind, CheckoutPreference, CheckoutSettings, CreatedPreference,
    RedirectUrls, CURRENCY_BRL,
};
pub use notification::{is_gateway_id, last_segment, NotificationPayload, MAX_GATEWAY_ID_LEN};
pub use payment::{GatewayPayment, MerchantOrder, OrderPayment, PaymentStatus};
pub use plan::Plan;
