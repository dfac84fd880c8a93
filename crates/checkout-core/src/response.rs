//! Checkout session response handling

use serde_json::Value;

use crate::error::Result;

/// Prefix of every failure alert
pub const ALERT_PREFIX: &str = "Error creating Stripe Checkout session: ";

/// Used when the response carries no usable `error`
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// What the page should do after the session request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Navigate the current tab to the checkout page
    Redirect(String),
    /// Show a blocking alert with this text
    Alert(String),
}

/// JSON body returned by the session endpoint: `{ url?, error? }`
///
/// Any JSON is accepted. Non-object bodies simply have neither field.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckoutResponse {
    pub url: Option<String>,
    pub error: Option<String>,
}

impl CheckoutResponse {
    /// Parse a response body. The HTTP status is deliberately not consulted.
    pub fn parse(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        let url = value
            .get("url")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string);
        let error = value.get("error").and_then(truthy_text);
        Self { url, error }
    }

    pub fn outcome(self) -> CheckoutOutcome {
        match self.url {
            Some(url) => CheckoutOutcome::Redirect(url),
            None => CheckoutOutcome::Alert(alert_message(
                self.error.as_deref().unwrap_or(UNKNOWN_ERROR),
            )),
        }
    }
}

/// Full alert text for a failure detail
pub fn alert_message(detail: &str) -> String {
    format!("{ALERT_PREFIX}{detail}")
}

// Falsy values (null, false, 0, "") yield None. Arrays and objects are
// always truthy, even when empty.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(js_string(other)),
    }
}

/// String conversion as done by `"" + value` in a browser
fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        // null and undefined elements join as empty strings
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".into(),
    }
}
