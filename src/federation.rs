//! AWS federation endpoint client (getSigninToken and login URL)
//!
//! https://docs.aws.amazon.com/IAM/latest/UserGuide/id_roles_providers_enable-console-custom-url.html

const SIGNIN_TOKEN: &str = "SigninToken";

/// Range accepted by the federation endpoint for SessionDuration, in seconds
const SESSION_DURATION_RANGE: std::ops::RangeInclusive<i64> = 900..=43200;

/// `Session` parameter of the getSigninToken action
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDocument<'a> {
    pub session_id: &'a str,
    pub session_key: &'a str,
    pub session_token: &'a str,
}

impl<'a> From<&'a crate::sts::TemporaryCredentials> for SessionDocument<'a> {
    fn from(creds: &'a crate::sts::TemporaryCredentials) -> Self {
        use secrecy::ExposeSecret;
        Self {
            session_id: &creds.access_key_id,
            session_key: creds.secret_access_key.expose_secret(),
            session_token: creds.session_token.expose_secret(),
        }
    }
}

/// Returns the SessionDuration to send; non-positive values mean "let the role decide".
pub fn effective_session_duration(seconds: i64) -> Option<i64> {
    if seconds <= 0 {
        return None;
    }
    if !SESSION_DURATION_RANGE.contains(&seconds) {
        tracing::warn!(
            message = "SessionDuration is outside of the range accepted by the federation endpoint; sending anyway",
            session_duration = seconds,
            min = SESSION_DURATION_RANGE.start(),
            max = SESSION_DURATION_RANGE.end()
        );
    }
    Some(seconds)
}

pub struct Client {
    http_client: reqwest::Client,
    endpoint: url::Url,
    issuer: String,
    destination: String,
}

impl Client {
    pub fn new(config: &crate::config::Config) -> Result<Self, crate::error::Error> {
        let http_client = reqwest::ClientBuilder::new().build()?;

        Ok(Self {
            http_client,
            endpoint: config.federation_endpoint()?,
            issuer: config.issuer.clone(),
            destination: config.destination.clone(),
        })
    }

    pub fn signin_token_url(
        &self,
        creds: &crate::sts::TemporaryCredentials,
        session_duration: i64,
    ) -> Result<url::Url, crate::error::Error> {
        let session = serde_json::to_string(&SessionDocument::from(creds))
            .map_err(crate::error::Error::MarshalError)?;

        let mut url = self.endpoint.clone();
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("Action", "getSigninToken");
            if let Some(d) = effective_session_duration(session_duration) {
                q.append_pair("SessionDuration", &d.to_string());
            }
            q.append_pair("Session", &session);
        }
        Ok(url)
    }

    pub async fn get_signin_token(
        &self,
        creds: &crate::sts::TemporaryCredentials,
        session_duration: i64,
    ) -> Result<secrecy::SecretString, crate::error::Error> {
        let url = self.signin_token_url(creds, session_duration)?;

        tracing::debug!(message = "Requesting sign-in token", endpoint = %self.endpoint, access_key_id = ?creds.access_key_id);
        // the request URL carries the session document, keep it out of errors
        let resp = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            tracing::debug!(message = "Federation endpoint rejected getSigninToken", status = ?status);
            return Err(crate::error::Error::SigninTokenStatus(status));
        }

        let body = resp.text().await.map_err(reqwest::Error::without_url)?;
        let mut token_response: std::collections::HashMap<String, String> =
            serde_json::from_str(&body).map_err(crate::error::Error::DecodeError)?;

        let token = token_response
            .remove(SIGNIN_TOKEN)
            .ok_or(crate::error::Error::MissingField(SIGNIN_TOKEN))?;
        Ok(secrecy::SecretString::new(token))
    }

    pub fn login_url(&self, signin_token: &secrecy::SecretString) -> url::Url {
        use secrecy::ExposeSecret;

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("Action", "login")
            .append_pair("Issuer", &self.issuer)
            .append_pair("Destination", &self.destination)
            .append_pair(SIGNIN_TOKEN, signin_token.expose_secret());
        url
    }

    /// Exchange temporary credentials for a console login URL
    pub async fn console_login_url(
        &self,
        creds: &crate::sts::TemporaryCredentials,
        session_duration: i64,
    ) -> Result<url::Url, crate::error::Error> {
        let token = self.get_signin_token(creds, session_duration).await?;
        Ok(self.login_url(&token))
    }
}
