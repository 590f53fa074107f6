use studio_email_contracts::{DeliveryId, Email, EmailSendError, EmailService};

pub use resend::{ResendEmailService, ResendEmailServiceConfig};
pub use smtp::SmtpEmailService;

mod resend;
mod smtp;

/// The email provider selected by configuration.
#[derive(Debug, Clone)]
pub enum EmailServiceImpl {
    Smtp(SmtpEmailService),
    Resend(ResendEmailService),
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> Result<DeliveryId, EmailSendError> {
        match self {
            Self::Smtp(smtp) => smtp.send(email).await,
            Self::Resend(resend) => resend.send(email).await,
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match self {
            Self::Smtp(smtp) => smtp.ping().await,
            Self::Resend(resend) => resend.ping().await,
        }
    }
}

impl From<SmtpEmailService> for EmailServiceImpl {
    fn from(value: SmtpEmailService) -> Self {
        Self::Smtp(value)
    }
}

impl From<ResendEmailService> for EmailServiceImpl {
    fn from(value: ResendEmailService) -> Self {
        Self::Resend(value)
    }
}
