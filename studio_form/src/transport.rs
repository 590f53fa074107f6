use std::{future::Future, time::Duration};

use anyhow::Context;
use studio_models::{
    action::{ActionError, ActionResult},
    contact::ContactInput,
};
use studio_utils::http::{join_path, HttpClient};
use thiserror::Error;
use url::Url;

/// The call across the trust boundary.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait ContactTransport: Send + Sync + 'static {
    fn submit(
        &self,
        input: ContactInput,
    ) -> impl Future<Output = Result<ContactResponse, TransportError>> + Send;
}

/// A response the server produced on purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactResponse {
    Data(ActionResult),
    Error(ActionError),
}

/// The server could not be reached or did not answer in the expected format.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unexpected response status {0}")]
    UnexpectedResponse(u16),
}

#[cfg(any(test, feature = "mock"))]
impl MockContactTransport {
    pub fn with_submit(
        mut self,
        input: ContactInput,
        result: Result<ContactResponse, TransportError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(input))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

/// Posts the form as JSON to the `contact` endpoint of the REST API.
#[derive(Debug, Clone)]
pub struct HttpContactTransport {
    client: HttpClient,
    url: Url,
}

impl HttpContactTransport {
    /// `base_url` is the REST API root. A missing trailing slash is implied.
    pub fn new(base_url: &Url, timeout: Duration) -> anyhow::Result<Self> {
        let url = join_path(base_url, "contact").context("Failed to build contact endpoint url")?;
        let client = HttpClient::new(timeout)?;
        Ok(Self { client, url })
    }
}

impl ContactTransport for HttpContactTransport {
    async fn submit(&self, input: ContactInput) -> Result<ContactResponse, TransportError> {
        let response = self.client.post(self.url.clone()).json(&input).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(ContactResponse::Data(response.json().await?));
        }

        if status.is_client_error() || status.is_server_error() {
            if let Ok(error) = response.json::<ActionError>().await {
                return Ok(ContactResponse::Error(error));
            }
        }

        tracing::warn!(%status, "Unexpected response from contact endpoint");
        Err(TransportError::UnexpectedResponse(status.as_u16()))
    }
}
