//! Delivery through the Resend HTTP API.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use studio_email_contracts::{DeliveryId, Email, EmailSendError, EmailService};
use studio_models::email_address::EmailAddressWithName;
use studio_utils::{
    http::{join_path, HttpClient},
    trace_instrument,
};
use url::Url;

#[derive(Debug, Clone)]
pub struct ResendEmailService {
    from: EmailAddressWithName,
    config: ResendEmailServiceConfig,
    client: HttpClient,
}

#[derive(Clone)]
pub struct ResendEmailServiceConfig {
    pub api_key: Arc<str>,
    /// Must end with a `/`, endpoints are resolved relative to it.
    pub base_url: Arc<Url>,
    pub timeout: Duration,
}

impl std::fmt::Debug for ResendEmailServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendEmailServiceConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ResendEmailService {
    pub fn new(from: EmailAddressWithName, config: ResendEmailServiceConfig) -> anyhow::Result<Self> {
        let client = HttpClient::new(config.timeout)?;
        Ok(Self {
            from,
            config,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        join_path(&self.config.base_url, path)
            .with_context(|| format!("Failed to build resend endpoint url for {path:?}"))
    }
}

impl EmailService for ResendEmailService {
    #[trace_instrument(skip(self, email), fields(recipient = %email.recipient))]
    async fn send(&self, email: Email) -> Result<DeliveryId, EmailSendError> {
        let request = SendEmailRequest {
            from: self.from.to_string(),
            to: [email.recipient.to_string()],
            subject: &email.subject,
            html: &email.html_body,
            text: &email.text_body,
            reply_to: email.reply_to.as_ref().map(|x| x.as_str()),
        };

        let response = self
            .client
            .post(self.endpoint("emails")?)
            .bearer_auth(&*self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to resend")?;

        let status = response.status();
        if !status.is_success() {
            let reason = match response.json::<ErrorResponse>().await {
                Ok(ErrorResponse { name, message }) => format!("{message} ({name}, {status})"),
                Err(_) => status.to_string(),
            };
            return Err(EmailSendError::Rejected(reason));
        }

        let SendEmailResponse { id } = response
            .json()
            .await
            .context("Failed to parse resend response")?;

        Ok(DeliveryId(id))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        // any http response means the api is reachable, the root needs no auth
        self.client
            .get((*self.config.base_url).clone())
            .send()
            .await
            .context("Failed to reach resend api")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: [String; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    name: String,
    message: String,
}
