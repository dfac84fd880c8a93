//! # checkout-core
//!
//! Sends the credit report upload form to the checkout session endpoint and
//! decides whether the page redirects to Stripe's hosted checkout or shows
//! an alert.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐  multipart   ┌──────────────────────────┐
//! │ upload-form  │─────────────▶│ POST /create-checkout-   │
//! │  (submit)    │              │         session          │
//! └──────────────┘              └────────────┬─────────────┘
//!        ▲                                   │ { url?, error? }
//!        │ alert                             ▼
//!        └───────────────────────── Stripe hosted checkout (url)
//! ```
//!
//! Nothing here touches the DOM directly. The page is reached through the
//! [`Browser`] and [`FormHost`] traits and the request through
//! [`CheckoutTransport`], so the same flow runs in the browser
//! (`checkout-web`) and in native tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutConfig, CheckoutTrigger, HttpTransport};
//!
//! let trigger = CheckoutTrigger::new(CheckoutConfig::default(), HttpTransport::new(), browser);
//! let outcome = trigger.handle_submit(&submission).await;
//! ```

mod browser;
mod config;
mod error;
mod payload;
mod response;
mod transport;
mod trigger;

pub use browser::{Browser, FormHost, locate_form};
pub use config::{
    CheckoutConfig, DEFAULT_ENDPOINT, DEFAULT_FORM_ID, ENDPOINT_ATTRIBUTE, KeyMode,
    PUBLISHABLE_KEY_ATTRIBUTE, PublishableKey,
};
pub use error::{CheckoutError, Result};
pub use payload::{FormField, FormPayload, FormValue};
pub use response::{ALERT_PREFIX, CheckoutOutcome, CheckoutResponse, UNKNOWN_ERROR, alert_message};
pub use reqwest::Url;
pub use transport::{CheckoutTransport, HttpTransport};
pub use trigger::{CheckoutTrigger, SubmitOutcome, Submission};
