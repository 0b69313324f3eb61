/// Assume an IAM role with local AWS CLI credentials and print a console sign-in URL
#[derive(clap::Parser, Debug)]
#[clap(version, about)]
pub struct ConsoleUrlArgs {
    /// AWS CLI profile name to use to assume the role
    #[clap(long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    profile: String,
    /// ARN of the IAM role to assume
    #[clap(long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    role_arn: String,
    /// Console session duration in seconds
    ///
    /// 0 or less leaves it to the role configuration. Federation endpoint accepts 900 to 43200 seconds,
    /// but rejects any value when the role was assumed through role chaining.
    #[clap(long, default_value_t = 0, allow_hyphen_values = true)]
    session_duration: i64,
    /// AWS region to use for credential resolution and sts:AssumeRole; default to us-west-2
    #[clap(long)]
    region: Option<String>,
    /// Issuer parameter of the login URL; default to Example.org
    #[clap(long)]
    issuer: Option<String>,
    /// Console URL to land on after signing in; default to https://console.aws.amazon.com/
    #[clap(long)]
    destination: Option<String>,
}

impl ConsoleUrlArgs {
    pub fn invocation(&self) -> Result<Invocation, crate::error::Error> {
        Invocation::new(
            self.profile.clone(),
            self.role_arn.clone(),
            self.session_duration,
        )
    }

    pub fn config(&self) -> Result<crate::config::Config, crate::error::Error> {
        crate::config::Config::new(
            self.region.clone(),
            self.issuer.clone(),
            self.destination.clone(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct Invocation {
    pub profile: String,
    pub role_arn: String,
    pub session_duration: i64,
}

impl Invocation {
    pub fn new(
        profile: String,
        role_arn: String,
        session_duration: i64,
    ) -> Result<Self, crate::error::Error> {
        if profile.is_empty() || role_arn.is_empty() {
            return Err(crate::error::Error::Usage(
                "Both --profile and --role-arn are required.".to_string(),
            ));
        }
        Ok(Self {
            profile,
            role_arn,
            session_duration,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
pub async fn run(args: &ConsoleUrlArgs) -> Result<(), anyhow::Error> {
    let invocation = args.invocation()?;
    let config = args.config()?;

    let url = console_url(&config, &invocation).await?;
    println!("{url}");
    Ok(())
}

#[tracing::instrument(skip_all, fields(profile = %invocation.profile, role_arn = %invocation.role_arn))]
pub async fn console_url(
    config: &crate::config::Config,
    invocation: &Invocation,
) -> Result<url::Url, crate::error::Error> {
    let federation = crate::federation::Client::new(config)?;

    let sdk_config = crate::sts::load_sdk_config(&invocation.profile, &config.region).await;
    let source = crate::sts::resolve_source_credentials(&sdk_config).await?;
    let creds = crate::sts::assume_role(
        &sdk_config,
        source,
        &invocation.role_arn,
        &config.session_name,
    )
    .await?;

    let url = federation
        .console_login_url(&creds, invocation.session_duration)
        .await?;
    tracing::info!(message = "Built console login URL", access_key_id = ?creds.access_key_id, expiration = ?creds.expiration);
    Ok(url)
}

#[cfg(test)]
mod test {
    use super::*;

    use clap::Parser;

    fn parse(args: &[&str]) -> Result<ConsoleUrlArgs, clap::Error> {
        ConsoleUrlArgs::try_parse_from(std::iter::once("consolelogin").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse() {
        let args = parse(&[
            "--profile",
            "dev",
            "--role-arn",
            "arn:aws:iam::123456789012:role/Admin",
        ])
        .unwrap();
        let inv = args.invocation().unwrap();
        assert_eq!(inv.profile, "dev");
        assert_eq!(inv.role_arn, "arn:aws:iam::123456789012:role/Admin");
        assert_eq!(inv.session_duration, 0);

        let config = args.config().unwrap();
        assert_eq!(config.region, "us-west-2");
        assert_eq!(config.issuer, "Example.org");
    }

    #[test]
    fn test_parse_all() {
        let args = parse(&[
            "--profile",
            "dev",
            "--role-arn",
            "arn:aws:iam::123456789012:role/Admin",
            "--session-duration",
            "3600",
            "--region",
            "ap-northeast-1",
            "--issuer",
            "example.com",
            "--destination",
            "https://console.aws.amazon.com/ec2/home",
        ])
        .unwrap();
        assert_eq!(args.invocation().unwrap().session_duration, 3600);

        let config = args.config().unwrap();
        assert_eq!(config.region, "ap-northeast-1");
        assert_eq!(config.issuer, "example.com");
        assert_eq!(config.destination, "https://console.aws.amazon.com/ec2/home");
    }

    #[test]
    fn test_parse_negative_duration() {
        let args = parse(&[
            "--profile",
            "dev",
            "--role-arn",
            "arn:aws:iam::123456789012:role/Admin",
            "--session-duration",
            "-5",
        ])
        .unwrap();
        assert_eq!(args.invocation().unwrap().session_duration, -5);
    }

    #[test]
    fn test_parse_missing() {
        assert!(parse(&["--profile", "dev"]).is_err());
        assert!(parse(&["--role-arn", "arn:aws:iam::123456789012:role/Admin"]).is_err());
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse(&["--profile", "", "--role-arn", "arn:aws:iam::123456789012:role/Admin"]).is_err());
        assert!(parse(&["--profile", "dev", "--role-arn", ""]).is_err());
    }

    #[test]
    fn test_invocation_empty() {
        let e = Invocation::new("".to_string(), "arn".to_string(), 0).unwrap_err();
        assert!(e.is_usage());
        let e = Invocation::new("dev".to_string(), "".to_string(), 0).unwrap_err();
        assert!(e.is_usage());
    }

    #[tokio::test]
    async fn test_console_url_rejects_bad_config_before_aws() {
        let config = crate::config::Config {
            federation_endpoint: "not a url".to_string(),
            ..crate::config::Config::default()
        };
        let inv = Invocation::new("dev".to_string(), "arn".to_string(), 0).unwrap();
        let e = console_url(&config, &inv).await.unwrap_err();
        assert!(matches!(e, crate::error::Error::ConfigError(_)));
    }
}
