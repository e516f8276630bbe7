//! Resolution of the API origin.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Resolves the origin every API path is joined onto.
pub trait BaseUrlProvider: Send + Sync {
    fn base_url(&self) -> Result<Url>;
}

/// Deployment mode of the front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    #[default]
    Production,
    Development,
}

/// A fixed, already known origin.
#[derive(Debug, Clone)]
pub struct StaticBaseUrl(Url);

impl StaticBaseUrl {
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Ok(Self(Url::parse(url)?))
    }
}

impl BaseUrlProvider for StaticBaseUrl {
    fn base_url(&self) -> Result<Url> {
        Ok(self.0.clone())
    }
}

/// Origin derived from where the front end is served.
///
/// In production the API shares the page's port; in development the API
/// runs on its own port given by `dev_port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOrigin {
    pub protocol: String,
    pub hostname: String,
    /// Page port, `None` for the scheme default
    pub port: Option<u16>,
    pub app_env: AppEnv,
    pub dev_port: Option<u16>,
}

impl PageOrigin {
    pub fn new(protocol: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            hostname: hostname.into(),
            port: None,
            app_env: AppEnv::Production,
            dev_port: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn development(mut self, dev_port: u16) -> Self {
        self.app_env = AppEnv::Development;
        self.dev_port = Some(dev_port);
        self
    }

    fn server_port(&self) -> Result<Option<u16>> {
        match self.app_env {
            AppEnv::Production => Ok(self.port),
            AppEnv::Development => self.dev_port.map(Some).ok_or_else(|| {
                ClientError::InvalidUrl("development mode requires a server port".into())
            }),
        }
    }
}

impl BaseUrlProvider for PageOrigin {
    fn base_url(&self) -> Result<Url> {
        let scheme = self.protocol.trim_end_matches(':');
        if scheme != "http" && scheme != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported protocol {:?}",
                self.protocol
            )));
        }
        if self.hostname.is_empty() {
            return Err(ClientError::InvalidUrl("hostname cannot be empty".into()));
        }

        let origin = match self.server_port()? {
            Some(port) => format!("{}://{}:{}", scheme, self.hostname, port),
            None => format!("{}://{}", scheme, self.hostname),
        };
        Ok(Url::parse(&origin)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_url_validation() {
        assert!(StaticBaseUrl::parse("https://radio.example.com").is_ok());
        assert!(StaticBaseUrl::parse("http://localhost:3000").is_ok());

        assert!(StaticBaseUrl::parse("").is_err());
        assert!(StaticBaseUrl::parse("radio.example.com").is_err());
        assert!(StaticBaseUrl::parse("ftp://radio.example.com").is_err());
    }

    #[test]
    fn test_production_uses_page_port() {
        let origin = PageOrigin::new("https:", "radio.local").with_port(8443);
        assert_eq!(
            origin.base_url().unwrap().as_str(),
            "https://radio.local:8443/"
        );

        let default_port = PageOrigin::new("http", "radio.local");
        assert_eq!(default_port.base_url().unwrap().as_str(), "http://radio.local/");
    }

    #[test]
    fn test_development_uses_dev_port() {
        let origin = PageOrigin::new("http", "localhost")
            .with_port(5173)
            .development(3000);
        assert_eq!(origin.base_url().unwrap().port(), Some(3000));
    }

    #[test]
    fn test_development_without_port_fails() {
        let origin = PageOrigin {
            app_env: AppEnv::Development,
            ..PageOrigin::new("http", "localhost")
        };
        assert!(matches!(
            origin.base_url(),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_protocol() {
        assert!(PageOrigin::new("file:", "localhost").base_url().is_err());
        assert!(PageOrigin::new("http", "").base_url().is_err());
    }
}
