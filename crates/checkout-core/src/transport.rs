//! Session endpoint transport

use async_trait::async_trait;
use reqwest::{Client, Url, header::ACCEPT};

use crate::error::Result;
use crate::payload::FormPayload;

/// Sends the form payload to the session endpoint and returns the raw body
#[async_trait(?Send)]
pub trait CheckoutTransport {
    async fn post_form(&self, endpoint: &Url, payload: FormPayload) -> Result<String>;
}

/// `reqwest` transport. Uses `fetch` when compiled for wasm32.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl CheckoutTransport for HttpTransport {
    async fn post_form(&self, endpoint: &Url, payload: FormPayload) -> Result<String> {
        let fields = payload.fields().len();
        let files = payload.file_count();
        let form = payload.into_multipart()?;

        let response = self
            .client
            .post(endpoint.clone())
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        // Non-2xx bodies are handled exactly like successful ones.
        tracing::debug!(
            endpoint = %endpoint,
            status = %response.status(),
            fields,
            files,
            "Checkout session request completed"
        );

        Ok(response.text().await?)
    }
}
