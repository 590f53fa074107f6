use clap::Subcommand;
use studio_config::Config;
use studio_email_contracts::{Email, EmailService};
use studio_models::email_address::EmailAddressWithName;
use tracing::info;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;

    let delivery_id = email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            html_body: "<p>Email deliverability seems to be working!</p>".into(),
            text_body: "Email deliverability seems to be working!".into(),
            reply_to: None,
        })
        .await?;

    info!(%delivery_id, "Sent test email");
    println!("{delivery_id}");

    Ok(())
}
