use envconfig::Envconfig;
use std::fmt::{Display, Formatter};

#[derive(Envconfig, Clone, Default)] // Intentionally no Debug so secret is not printed
pub struct DestinationConfig {
    #[envconfig(from = "ZENDESK_USERNAME")]
    pub username: Option<String>,
    #[envconfig(from = "ZENDESK_SUBDOMAIN")]
    pub subdomain: Option<String>,
    #[envconfig(from = "ZENDESK_TOKEN")]
    pub token: Option<String>,
    #[envconfig(from = "ZENDESK_BASE_URL")]
    pub base_url: Option<String>,
}

impl DestinationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(mut self, username: &str, subdomain: &str, token: &str) -> Self {
        self.username = Some(username.to_owned());
        self.subdomain = Some(subdomain.to_owned());
        self.token = Some(token.to_owned());
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_owned());
        self
    }

    /// API root every request path is appended to, always ending in `/`.
    ///
    /// An explicit `ZENDESK_BASE_URL` wins over the subdomain.
    pub fn api_root(&self) -> Option<String> {
        let root = match (&self.base_url, &self.subdomain) {
            (Some(base_url), _) if !base_url.trim().is_empty() => base_url.trim().to_owned(),
            (_, Some(subdomain)) if !subdomain.trim().is_empty() => {
                format!("https://{}.zendesk.com/api/v2/", subdomain.trim())
            }
            _ => return None,
        };

        if root.ends_with('/') {
            Some(root)
        } else {
            Some(format!("{root}/"))
        }
    }

    /// Basic-auth user name for API-token authentication.
    pub fn api_user(&self) -> Option<String> {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(|u| format!("{u}/token"))
    }

    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.username.as_deref().map_or(true, |v| v.trim().is_empty()) {
            missing.push("ZENDESK_USERNAME");
        }
        if self.api_root().is_none() {
            missing.push("ZENDESK_SUBDOMAIN");
        }
        if self.token.as_deref().map_or(true, |v| v.trim().is_empty()) {
            missing.push("ZENDESK_TOKEN");
        }
        missing
    }
}

impl Display for DestinationConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "ZENDESK_USERNAME: {}",
            self.username.as_deref().unwrap_or("<unset>")
        )?;
        writeln!(
            f,
            "ZENDESK_SUBDOMAIN: {}",
            self.subdomain.as_deref().unwrap_or("<unset>")
        )?;
        writeln!(f, "ZENDESK_TOKEN: ****")?;
        writeln!(f, "ZENDESK_BASE_URL: {:?}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_root_from_subdomain() {
        let config = DestinationConfig::new().with_credentials("agent@acme.test", "acme", "t0k3n");

        assert_eq!(
            config.api_root().as_deref(),
            Some("https://acme.zendesk.com/api/v2/")
        );
        assert_eq!(config.api_user().as_deref(), Some("agent@acme.test/token"));
        assert!(config.missing_credentials().is_empty());
    }

    #[test]
    fn test_base_url_overrides_subdomain() {
        let config = DestinationConfig::new()
            .with_credentials("agent@acme.test", "acme", "t0k3n")
            .with_base_url("http://127.0.0.1:1234/api/v2");

        assert_eq!(
            config.api_root().as_deref(),
            Some("http://127.0.0.1:1234/api/v2/")
        );
    }

    #[test]
    fn test_missing_credentials() {
        let config = DestinationConfig::new();

        assert_eq!(config.api_root(), None);
        assert_eq!(
            config.missing_credentials(),
            vec!["ZENDESK_USERNAME", "ZENDESK_SUBDOMAIN", "ZENDESK_TOKEN"]
        );
    }

    #[test]
    fn test_config_display() {
        let config = DestinationConfig::new().with_credentials("agent@acme.test", "acme", "t0k3n");

        let display = "ZENDESK_USERNAME: agent@acme.test\n\
            ZENDESK_SUBDOMAIN: acme\n\
            ZENDESK_TOKEN: ****\n\
            ZENDESK_BASE_URL: None\n\
            ";

        assert_eq!(format!("{config}"), display);
    }
}
