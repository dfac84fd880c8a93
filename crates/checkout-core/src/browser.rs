//! Browser seams
//!
//! The page side of the trigger: finding the form, navigating and alerting.
//! `checkout-web` implements these over `web-sys`; tests use in-memory mocks.

use crate::config::CheckoutConfig;
use crate::error::Result;

/// Window-level side effects
pub trait Browser {
    /// URL of the current page, used to resolve a relative endpoint
    fn page_url(&self) -> Result<String>;

    /// Full-page navigation of the current tab
    fn navigate(&self, url: &str) -> Result<()>;

    /// Blocking user-facing alert
    fn alert(&self, message: &str);
}

/// Document that may contain the upload form
pub trait FormHost {
    type Form;

    fn find_form(&self, id: &str) -> Option<Self::Form>;
}

/// Look up the configured upload form.
///
/// A page without the form is not an error: the caller attaches nothing.
pub fn locate_form<H: FormHost>(host: &H, config: &CheckoutConfig) -> Option<H::Form> {
    let form = host.find_form(&config.form_id);
    if form.is_none() {
        tracing::debug!(form_id = %config.form_id, "No upload form on this page");
    }
    form
}
