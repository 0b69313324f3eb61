//! Source credential resolution and sts:AssumeRole

/// Temporary credentials returned by sts:AssumeRole.
///
/// Held in memory only for the duration of a single invocation.
#[derive(Debug, Clone)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: secrecy::SecretString,
    pub session_token: secrecy::SecretString,
    pub expiration: chrono::DateTime<chrono::Utc>,
}

/// Load AWS shared configuration for `profile`, pinned to `region`.
pub async fn load_sdk_config(profile: &str, region: &str) -> aws_config::SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .profile_name(profile)
        .region(aws_config::Region::new(region.to_owned()))
        .load()
        .await
}

/// Resolve source credentials from the configured provider chain once.
pub async fn resolve_source_credentials(
    sdk_config: &aws_config::SdkConfig,
) -> Result<aws_credential_types::Credentials, crate::error::Error> {
    use aws_credential_types::provider::ProvideCredentials;

    let provider = sdk_config.credentials_provider().ok_or_else(|| {
        crate::error::Error::AwsConfigError("no credentials provider is configured".to_string())
    })?;
    let creds = provider.provide_credentials().await.map_err(|e| {
        crate::error::Error::AwsConfigError(
            aws_sdk_sts::error::DisplayErrorContext(&e).to_string(),
        )
    })?;

    tracing::debug!(message = "Resolved source credentials", access_key_id = %creds.access_key_id());
    Ok(creds)
}

pub async fn assume_role(
    sdk_config: &aws_config::SdkConfig,
    source: aws_credential_types::Credentials,
    role_arn: &str,
    session_name: &str,
) -> Result<TemporaryCredentials, crate::error::Error> {
    let conf = aws_sdk_sts::config::Builder::from(sdk_config)
        .credentials_provider(source)
        .build();
    let client = aws_sdk_sts::Client::from_conf(conf);

    tracing::debug!(message = "Calling sts:AssumeRole", role_arn = %role_arn, session_name = %session_name);

    let resp = client
        .assume_role()
        .role_arn(role_arn)
        .role_session_name(session_name)
        .send()
        .await
        .map_err(|e| {
            crate::error::Error::AssumeRoleError(
                aws_sdk_sts::error::DisplayErrorContext(&e).to_string(),
            )
        })?;

    let creds = resp.credentials().ok_or_else(|| {
        crate::error::Error::AssumeRoleError("returned Credentials is missing".to_string())
    })?;

    let expiration = smithy_to_chrono(creds.expiration())?;
    let result = TemporaryCredentials {
        access_key_id: creds.access_key_id().to_owned(),
        secret_access_key: secrecy::SecretString::new(creds.secret_access_key().to_owned()),
        session_token: secrecy::SecretString::new(creds.session_token().to_owned()),
        expiration,
    };

    tracing::info!(message = "Assumed role", access_key_id = ?result.access_key_id, expiration = ?result.expiration, assumed_role_user_arn = ?resp.assumed_role_user().map(|u| u.arn()));
    Ok(result)
}

fn smithy_to_chrono(
    t: &aws_sdk_sts::primitives::DateTime,
) -> Result<chrono::DateTime<chrono::Utc>, crate::error::Error> {
    chrono::DateTime::<chrono::Utc>::from_timestamp(t.secs(), t.subsec_nanos()).ok_or_else(|| {
        crate::error::Error::AssumeRoleError(format!("returned Expiration is out of range: {t:?}"))
    })
}
