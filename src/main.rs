//! List five contacts from a Salesforce org.
//!
//! ```sh
//! export CLIENT_ID=... CLIENT_SECRET=... REFRESH_TOKEN=...
//! export TOKEN_URL=https://login.salesforce.com/services/oauth2/token
//! export INSTANCE_URL=https://myorg.my.salesforce.com
//! sfquery
//! ```
//!
//! Records go to stdout, one per line. Diagnostics go to stderr; set
//! `RUST_LOG=debug` for more.

use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match execute().await {
        Ok(count) => {
            debug!(count, "Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!(error = ?err, "Run failed");
            eprintln!("error: {}", err.display_chain());
            ExitCode::from(err.exit_code())
        }
    }
}

async fn execute() -> Result<usize, sfquery::AppError> {
    let creds = sfquery::load_config()?;
    debug!(?creds, "Configuration loaded");

    let mut stdout = std::io::stdout().lock();
    sfquery::run(&creds, &mut stdout).await
}
