use anyhow::Context;
use studio_config::Config;
use studio_di::Provide;
use studio_email_contracts::EmailService;
use tracing::info;

use crate::{
    email,
    environment::{types::RestServer, ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to email provider ({:?})", config.email.provider);
    let email = email::connect(&config.email)?;
    email
        .ping()
        .await
        .context("Failed to reach email provider")?;

    let config_provider = ConfigProvider::new(&config)?;
    let mut provider = Provider::new(config_provider, email);
    let server: RestServer = provider.provide();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
