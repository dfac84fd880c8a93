//! Checkout Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Errors raised while turning a form submission into a checkout redirect
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Form fields or a selected file could not be collected
    #[error("Form payload error: {0}")]
    Payload(String),

    /// Navigation or another browser call failed
    #[error("Browser error: {0}")]
    Browser(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CheckoutError {
    /// Get user-friendly message, shown after the alert prefix
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Network(_) => "Could not reach the payment server. Please try again.",
            Self::InvalidResponse(_) => "The payment server sent an unreadable response.",
            Self::Payload(_) => "The selected file could not be read.",
            Self::Browser(_) => "The browser refused to open the checkout page.",
            Self::Config(_) => "Checkout is not configured correctly.",
        }
    }
}

impl From<reqwest::Error> for CheckoutError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for CheckoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}
