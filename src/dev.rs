pub struct TestConfig {
    inner: crate::config::Config,
}

impl std::ops::Deref for TestConfig {
    type Target = crate::config::Config;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl TestConfig {
    /// Config whose federation endpoint points at a mock server
    pub fn new(server: &httpmock::MockServer) -> Self {
        let inner = crate::config::Config {
            federation_endpoint: server.url("/federation"),
            ..crate::config::Config::default()
        };
        Self { inner }
    }
}

pub fn test_credentials() -> crate::sts::TemporaryCredentials {
    crate::sts::TemporaryCredentials {
        access_key_id: "ASIAEXAMPLE".to_string(),
        secret_access_key: secrecy::SecretString::new("himitsu/key+".to_string()),
        session_token: secrecy::SecretString::new("himitsu-token==".to_string()),
        expiration: chrono::DateTime::<chrono::Utc>::from_timestamp(1700000000, 0).unwrap(),
    }
}

/// SdkConfig sending every AWS API call to a mock server
pub fn test_sdk_config(server: &httpmock::MockServer) -> aws_config::SdkConfig {
    aws_config::SdkConfig::builder()
        .behavior_version(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(crate::config::DEFAULT_REGION))
        .endpoint_url(server.base_url())
        .build()
}

pub fn test_source_credentials() -> aws_credential_types::Credentials {
    aws_credential_types::Credentials::new(
        "AKIASOURCE",
        "source-secret",
        None,
        None,
        "consolelogin-test",
    )
}
