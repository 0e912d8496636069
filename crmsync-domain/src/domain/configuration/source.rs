use envconfig::Envconfig;
use std::fmt::{Display, Formatter};

pub const DEFAULT_LOGIN_URL: &str = "https://login.salesforce.com/services/oauth2/token";
pub const DEFAULT_API_VERSION: &str = "v37.0";

#[derive(Envconfig, Clone)] // Intentionally no Debug so secret is not printed
pub struct SourceConfig {
    #[envconfig(from = "SALESFORCE_USERNAME")]
    pub username: Option<String>,
    #[envconfig(from = "SALESFORCE_PASSWORD")]
    pub password: Option<String>,
    #[envconfig(from = "SALESFORCE_CLIENT_ID")]
    pub client_id: Option<String>,
    #[envconfig(from = "SALESFORCE_CLIENT_SECRET")]
    pub client_secret: Option<String>,
    #[envconfig(
        from = "SALESFORCE_LOGIN_URL",
        default = "https://login.salesforce.com/services/oauth2/token"
    )]
    pub login_url: String,
    #[envconfig(from = "SALESFORCE_API_VERSION", default = "v37.0")]
    pub api_version: String,
}

impl SourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(
        mut self,
        username: &str,
        password: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Self {
        self.username = Some(username.to_owned());
        self.password = Some(password.to_owned());
        self.client_id = Some(client_id.to_owned());
        self.client_secret = Some(client_secret.to_owned());
        self
    }

    pub fn with_login_url(mut self, login_url: &str) -> Self {
        self.login_url = login_url.to_owned();
        self
    }

    /// Names of the credential variables that are unset or blank.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            ("SALESFORCE_USERNAME", &self.username),
            ("SALESFORCE_PASSWORD", &self.password),
            ("SALESFORCE_CLIENT_ID", &self.client_id),
            ("SALESFORCE_CLIENT_SECRET", &self.client_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            client_id: None,
            client_secret: None,
            login_url: DEFAULT_LOGIN_URL.to_owned(),
            api_version: DEFAULT_API_VERSION.to_owned(),
        }
    }
}

impl Display for SourceConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "SALESFORCE_USERNAME: {}",
            self.username.as_deref().unwrap_or("<unset>")
        )?;
        writeln!(f, "SALESFORCE_PASSWORD: ****")?;
        writeln!(f, "SALESFORCE_CLIENT_ID: ****")?;
        writeln!(f, "SALESFORCE_CLIENT_SECRET: ****")?;
        writeln!(f, "SALESFORCE_LOGIN_URL: {}", self.login_url)?;
        writeln!(f, "SALESFORCE_API_VERSION: {}", self.api_version)
    }
}
