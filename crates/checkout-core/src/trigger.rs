//! Checkout Trigger
//!
//! Turns one intercepted form submission into either a redirect to the
//! hosted checkout page or an alert.
//!
//! ```text
//! submit ─▶ prevent default ─▶ collect fields ─▶ POST multipart ─▶ JSON
//!                                                          │
//!                                   url ◀──────────────────┴──────▶ alert
//! ```

use std::cell::Cell;

use async_trait::async_trait;

use crate::browser::Browser;
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, Result};
use crate::payload::FormPayload;
use crate::response::{CheckoutOutcome, CheckoutResponse, alert_message};
use crate::transport::CheckoutTransport;

/// One intercepted submit event
#[async_trait(?Send)]
pub trait Submission {
    /// Suppress the browser's own form submission
    fn prevent_default(&self);

    /// Read the form's current fields, including selected files
    async fn collect(&self) -> Result<FormPayload>;
}

/// What happened to a submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Tab navigated to the checkout URL
    Redirected(String),
    /// Server answered without a URL; alert shown
    Alerted(String),
    /// Request or navigation failed; alert shown
    Failed(String),
    /// Another submission was still in flight
    Ignored,
}

/// Submit handler shared by every submission of one form
pub struct CheckoutTrigger<T, B> {
    config: CheckoutConfig,
    transport: T,
    browser: B,
    in_flight: Cell<bool>,
}

impl<T: CheckoutTransport, B: Browser> CheckoutTrigger<T, B> {
    pub const fn new(config: CheckoutConfig, transport: T, browser: B) -> Self {
        Self {
            config,
            transport,
            browser,
            in_flight: Cell::new(false),
        }
    }

    pub const fn browser(&self) -> &B {
        &self.browser
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Handle a submit event. Never returns an error: every failure ends in
    /// an alert.
    pub async fn handle_submit<S: Submission + ?Sized>(&self, submission: &S) -> SubmitOutcome {
        submission.prevent_default();

        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            tracing::debug!("Checkout already in progress, ignoring submit");
            return SubmitOutcome::Ignored;
        };

        match self.request_outcome(submission).await {
            Ok(CheckoutOutcome::Redirect(url)) => match self.browser.navigate(&url) {
                Ok(()) => {
                    tracing::info!(url = %url, "Redirecting to checkout");
                    SubmitOutcome::Redirected(url)
                }
                Err(e) => self.fail(&e),
            },
            Ok(CheckoutOutcome::Alert(message)) => {
                tracing::warn!(message = %message, "Checkout session not created");
                self.browser.alert(&message);
                SubmitOutcome::Alerted(message)
            }
            Err(e) => self.fail(&e),
        }
    }

    async fn request_outcome<S: Submission + ?Sized>(
        &self,
        submission: &S,
    ) -> Result<CheckoutOutcome> {
        let payload = submission.collect().await?;
        let endpoint = self.config.endpoint_url(&self.browser.page_url()?)?;
        let body = self.transport.post_form(&endpoint, payload).await?;
        Ok(CheckoutResponse::parse(&body)?.outcome())
    }

    fn fail(&self, err: &CheckoutError) -> SubmitOutcome {
        tracing::error!(error = %err, "Checkout request failed");
        let message = alert_message(err.user_message());
        self.browser.alert(&message);
        SubmitOutcome::Failed(message)
    }
}

/// Clears the in-flight flag when the submission finishes
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
