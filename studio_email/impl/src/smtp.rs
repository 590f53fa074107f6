//! Delivery through an SMTP relay.

use anyhow::{anyhow, Context};
use lettre::{
    message::{MessageBuilder, MultiPart},
    transport::smtp::response::Response,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use studio_email_contracts::{DeliveryId, Email, EmailSendError, EmailService};
use studio_models::email_address::EmailAddressWithName;
use studio_utils::{trace_instrument, Apply};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SmtpEmailService {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    pub fn new(url: &str, from: EmailAddressWithName) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)
            .context("Invalid smtp url")?
            .build();

        Ok(Self { from, transport })
    }

    /// A globally unique `Message-ID` in the domain of the sender.
    fn message_id(&self) -> String {
        format!("<{}@{}>", Uuid::new_v4(), self.from.domain())
    }
}

impl EmailService for SmtpEmailService {
    #[trace_instrument(skip(self, email), fields(recipient = %email.recipient))]
    async fn send(&self, email: Email) -> Result<DeliveryId, EmailSendError> {
        let message_id = self.message_id();

        let message = Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.0)
            .apply_map(
                email.reply_to.map(|x| x.0.into()),
                MessageBuilder::reply_to,
            )
            .subject(email.subject)
            .message_id(Some(message_id.clone()))
            .multipart(MultiPart::alternative_plain_html(
                email.text_body,
                email.html_body,
            ))
            .context("Failed to build email message")?;

        let response = match self.transport.send(message).await {
            Ok(response) => response,
            Err(err) if err.is_permanent() => return Err(EmailSendError::Rejected(err.to_string())),
            Err(err) => return Err(anyhow!(err).context("Failed to send email").into()),
        };

        if !response.is_positive() {
            return Err(EmailSendError::Rejected(rejection_reason(&response)));
        }

        Ok(DeliveryId(message_id))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

/// The reply code followed by the server's reply lines.
fn rejection_reason(response: &Response) -> String {
    let reply = response.message().collect::<Vec<_>>().join(" ");
    format!("{} {reply}", response.code())
}

#[cfg(test)]
mod tests {
    use lettre::transport::smtp::response::{Category, Code, Detail, Severity};

    use super::*;

    fn sut() -> SmtpEmailService {
        SmtpEmailService::new(
            "smtp://127.0.0.1:2525",
            "Studio Fotografii <formularz@example.com>".parse().unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn message_id_uses_sender_domain() {
        let sut = sut();

        let id = sut.message_id();

        assert!(id.starts_with('<'));
        assert!(id.ends_with("@example.com>"));
        assert_ne!(id, sut.message_id());
    }

    #[test]
    fn rejection_reason_joins_reply_lines() {
        // Arrange
        let response = Response::new(
            Code::new(
                Severity::PermanentNegativeCompletion,
                Category::MailSystem,
                Detail::Zero,
            ),
            vec!["Mailbox unavailable".into(), "user unknown".into()],
        );

        // Act
        let reason = rejection_reason(&response);

        // Assert
        assert_eq!(reason, "550 Mailbox unavailable user unknown");
    }

    #[tokio::test]
    async fn invalid_url() {
        let result = SmtpEmailService::new(
            "http://example.com",
            "formularz@example.com".parse().unwrap(),
        );
        assert!(result.is_err());
    }
}
