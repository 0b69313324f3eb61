pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_ISSUER: &str = "Example.org";
pub const DEFAULT_DESTINATION: &str = "https://console.aws.amazon.com/";
pub const DEFAULT_FEDERATION_ENDPOINT: &str = "https://signin.aws.amazon.com/federation";

/// RoleSessionName given to sts:AssumeRole; not configurable
pub const SESSION_NAME: &str = "AssumeRoleSession";

#[derive(Debug, Clone)]
pub struct Config {
    pub region: String,
    pub issuer: String,
    pub destination: String,
    pub federation_endpoint: String,
    pub session_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            issuer: DEFAULT_ISSUER.to_string(),
            destination: DEFAULT_DESTINATION.to_string(),
            federation_endpoint: DEFAULT_FEDERATION_ENDPOINT.to_string(),
            session_name: SESSION_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn new(
        region: Option<String>,
        issuer: Option<String>,
        destination: Option<String>,
    ) -> Result<Self, crate::error::Error> {
        let defaults = Self::default();
        let config = Self {
            region: region.unwrap_or(defaults.region),
            issuer: issuer.unwrap_or(defaults.issuer),
            destination: destination.unwrap_or(defaults.destination),
            ..defaults
        };

        if config.region.is_empty() {
            return Err(crate::error::Error::ConfigError(
                "region (--region) cannot be empty".to_string(),
            ));
        }
        if config.issuer.is_empty() {
            return Err(crate::error::Error::ConfigError(
                "issuer (--issuer) cannot be empty".to_string(),
            ));
        }
        parse_http_url(&config.destination, "destination (--destination)")?;

        Ok(config)
    }

    pub fn federation_endpoint(&self) -> Result<url::Url, crate::error::Error> {
        parse_http_url(&self.federation_endpoint, "federation endpoint")
    }
}

fn parse_http_url(u: &str, what: &str) -> Result<url::Url, crate::error::Error> {
    let url = url::Url::parse(u)
        .map_err(|_| crate::error::Error::ConfigError(format!("{what} is malformed")))?;

    match url.scheme() {
        "https" | "http" => {}
        _ => {
            return Err(crate::error::Error::ConfigError(format!(
                "{what} must be an http(s) URL"
            )))
        }
    }
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(crate::error::Error::ConfigError(format!(
            "{what} is malformed"
        )));
    }
    Ok(url)
}
