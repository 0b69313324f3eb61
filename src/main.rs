use clap::Parser;

fn main() -> std::process::ExitCode {
    let args = consolelogin::cmd::console_url::ConsoleUrlArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match consolelogin::cmd::console_url::run(&args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            // clap's value parsers reject empty flags first; Invocation::new repeats the check
            if e
                .downcast_ref::<consolelogin::error::Error>()
                .map_or(false, |err| err.is_usage())
            {
                use clap::CommandFactory;
                eprintln!(
                    "{}",
                    consolelogin::cmd::console_url::ConsoleUrlArgs::command().render_usage()
                );
            }
            tracing::debug!(message = "exiting with error", error = ?e);
            eprintln!("Error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}
