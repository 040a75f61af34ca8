//! Vigil CLI - Main entry point
//!
//! Wires the smoke suite onto the reqwest transport, runs it sequentially,
//! prints the console report and maps the aggregate verdict onto the process
//! exit code.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use vigil::{report, suite};
use vigil_application::{CheckContext, SuiteRunner};
use vigil_domain::{HarnessConfig, config};
use vigil_infrastructure::ReqwestTransport;

/// Smoke-test harness for the listing-optimization API.
#[derive(Debug, Parser)]
#[command(name = "vigil", version, about)]
struct Cli {
    /// Base URL of the server under test.
    #[arg(long, env = "VIGIL_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Shared secret for the debug credit-grant endpoint.
    #[arg(long, env = "VIGIL_DEBUG_KEY", default_value = config::DEFAULT_DEBUG_KEY)]
    debug_key: String,

    /// Email of the test account the debug endpoint operates on.
    #[arg(long, env = "VIGIL_USER_EMAIL", default_value = config::DEFAULT_USER_EMAIL)]
    user_email: String,

    /// Per-call timeout in seconds.
    #[arg(long, env = "VIGIL_TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

impl Cli {
    fn into_config(self) -> HarnessConfig {
        HarnessConfig {
            base_url: self.base_url,
            debug_key: self.debug_key,
            test_user_email: self.user_email,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Cli::parse().into_config();
    if let Err(error) = config.validate() {
        tracing::error!(%error, "invalid configuration");
        return ExitCode::FAILURE;
    }

    let transport = match ReqwestTransport::new(&config) {
        Ok(transport) => transport,
        Err(error) => {
            tracing::error!(%error, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let run_id = Uuid::now_v7();
    tracing::info!(%run_id, target = %config.base_url, "starting smoke run");

    let ctx = CheckContext::new(Arc::new(transport), config.clone());
    let suite = suite::smoke_suite();
    let mut runner = SuiteRunner::new();
    let outcome = runner.run(&suite, &ctx).await;

    println!("{}", report::render(&outcome, &config));

    if outcome.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
