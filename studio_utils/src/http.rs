use std::{ops::Deref, sync::LazyLock, time::Duration};

use anyhow::Context;
use url::Url;

use crate::studio_version;

pub static USER_AGENT: LazyLock<String> =
    LazyLock::new(|| format!("Studio Contact (Version {})", studio_version()));

/// A [`reqwest::Client`] with the studio user agent and a request timeout.
#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .timeout(timeout)
            .build()
            .map(Self)
            .context("Failed to build http client")
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Resolves `path` below `base`, treating `base` as a directory even without
/// a trailing slash.
pub fn join_path(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    if base.path().ends_with('/') {
        return base.join(path);
    }
    let mut base = base.clone();
    base.set_path(&format!("{}/", base.path()));
    base.join(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_path_keeps_last_segment() {
        for base in ["http://localhost:8000/api", "http://localhost:8000/api/"] {
            let base = base.parse::<Url>().unwrap();

            let url = join_path(&base, "contact").unwrap();

            assert_eq!(url.as_str(), "http://localhost:8000/api/contact");
        }
    }

    #[test]
    fn join_path_root() {
        let base = "http://localhost:8000".parse::<Url>().unwrap();
        let url = join_path(&base, "contact").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/contact");
    }

    #[test]
    fn user_agent_contains_version() {
        assert!(USER_AGENT.ends_with(&format!("(Version {})", studio_version())));
    }

    #[test]
    fn new() {
        let client = HttpClient::new(Duration::from_secs(5));
        assert!(client.is_ok());
    }
}
