use anyhow::Context;
use axum::http::HeaderValue;
use studio_api_rest::RestServerConfig;
use studio_config::Config;
use studio_core_contact_impl::ContactServiceConfig;
use studio_core_health_impl::HealthServiceConfig;
use studio_di::provider;
use types::Email;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        email: Email,
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Core
            ContactServiceConfig,
            HealthServiceConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            _cache: Default::default(),
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Core
        contact_service_config: ContactServiceConfig,
        health_service_config: HealthServiceConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let rest_server_config = RestServerConfig {
            allowed_origins: config
                .http
                .allowed_origins
                .iter()
                .map(|origin| {
                    origin
                        .parse::<HeaderValue>()
                        .with_context(|| format!("Invalid allowed origin: {origin:?}"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?
                .into(),
        };

        // Core
        let contact_service_config = ContactServiceConfig {
            recipient: config.contact.recipient.clone().into(),
        };

        let health_service_config = HealthServiceConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        Ok(Self {
            _cache: Default::default(),

            // API
            rest_server_config,

            // Core
            contact_service_config,
            health_service_config,
        })
    }
}
