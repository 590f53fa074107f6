use std::{net::SocketAddr, time::Duration};

use anyhow::{bail, Context};
use clap::Args;
use studio_config::Config;
use studio_form::{FormController, FormState, HttpContactTransport};
use studio_models::contact::ContactField;
use url::Url;

const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Full name of the sender
    #[arg(long, default_value = "")]
    name: String,
    /// Email address of the sender
    #[arg(long, default_value = "")]
    email: String,
    /// Nine digit phone number
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    message: String,
    /// Base url of the REST API, e.g. http://localhost:8000/api [default: the configured http address]
    #[arg(long)]
    url: Option<Url>,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let url = match self.url {
            Some(url) => url,
            None => format!(
                "http://{}/",
                SocketAddr::from((config.http.host, config.http.port))
            )
            .parse()
            .context("Failed to build api url from http config")?,
        };

        let mut form = FormController::new(HttpContactTransport::new(&url, TIMEOUT)?);
        form.change(ContactField::Name, self.name);
        form.change(ContactField::Email, self.email);
        form.change(ContactField::Phone, self.phone);
        form.change(ContactField::Message, self.message);

        let state = form.submit().await;

        if state == FormState::Editing {
            for field in ContactField::ALL {
                if let Some(errors) = form.field(field).error_text() {
                    eprintln!("{}: {errors}", field.label());
                }
            }
            bail!("The contact form is invalid");
        }

        if let Some(banner) = form.banner() {
            println!("{}", banner.message);
        }

        if state != FormState::Succeeded {
            bail!("The contact form could not be submitted");
        }

        Ok(())
    }
}
