use anyhow::{ensure, Context};
use studio_config::{EmailConfig, EmailProvider};
use studio_email_impl::{
    EmailServiceImpl, ResendEmailService, ResendEmailServiceConfig, SmtpEmailService,
};

/// Set up the configured email provider
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    match config.provider {
        EmailProvider::Smtp => SmtpEmailService::new(&config.smtp.url, config.from.clone())
            .map(Into::into)
            .context("Failed to set up smtp transport"),
        EmailProvider::Resend => {
            ensure!(
                !config.resend.api_key.is_empty(),
                "Missing resend api key (email.resend.api_key)"
            );
            let resend_config = ResendEmailServiceConfig {
                api_key: config.resend.api_key.as_str().into(),
                base_url: config.resend.base_url.clone().into(),
                timeout: config.resend.timeout.into(),
            };
            ResendEmailService::new(config.from.clone(), resend_config)
                .map(Into::into)
                .context("Failed to set up resend client")
        }
    }
}
