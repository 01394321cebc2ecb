// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here, strictly in this order:
// 1. Parse command-line arguments (clap handles -h and exits with 0)
// 2. Build the Config; -uO together with -pO stops here, before anything
//    is printed or sent
// 3. Print the banner (unless -s)
// 4. Validate the target URL (including a DNS check)
// 5. Build the HTTP client, through the proxy if -p was given
// 6. Send the one GET request
// 7. Stream the body through the link extractor
// 8. Print the URLs and paths
//
// Exit codes: 0 = success, anything else = the failure class from
// error.rs (2 usage, 3 URL, 4 DNS, 5 proxy, 6 transport, 7 body, 8 output)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - the run configuration
mod error;    // src/error.rs - error taxonomy and exit codes
mod extract;  // src/extract/ - HTML tokenizing and link classification
mod fetch;    // src/fetch/ - HTTP client, proxy and page request
mod output;   // src/output.rs - banner and result printing
mod target;   // src/target/ - target URL validation

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Config;

// One request at a time, so a single-threaded runtime is all we need
#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            // Our own errors know their exit code; anything else is a 1
            e.downcast_ref::<error::Error>()
                .map(error::Error::exit_code)
                .unwrap_or(1)
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics go to stderr so they never mix with the extracted lists.
// RUST_LOG=debug shows what the tool is doing; the default only shows
// warnings (skipped headers, disabled certificate checks)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

// Everything that happens before the first DNS lookup or request:
// build the Config, print the banner, insist on a target.
//
// Returns the Config and the trimmed raw target
fn prepare<W: Write>(cli: Cli, out: &mut W) -> error::Result<(Config, String)> {
    let config = Config::from_cli(cli)?;

    if output::decorated(&config) {
        output::write_banner(out)?;
    }

    let raw_target = config.require_target()?.to_string();
    Ok((config, raw_target))
}

async fn run() -> Result<()> {
    let cli = Cli::parse_from(cli::normalize_args(std::env::args()));
    let (config, raw_target) = prepare(cli, &mut std::io::stdout().lock())?;

    let target = target::validate_target(&raw_target).await?;

    let proxy = match &config.proxy {
        Some(spec) => {
            let proxy = fetch::parse_proxy(spec)?;
            output::print_status(&config, &format!("Using proxy: {}", spec))?;
            Some(proxy)
        }
        None => None,
    };
    let client = fetch::build_client(proxy.as_ref(), config.request.timeout)?;

    debug!(url = %target.url, "fetching target");
    let response = fetch::fetch_page(&client, &target.url, &config.request).await?;

    output::print_status(&config, &format!("Extracting URLs from: {}", target.input))?;

    // The response is moved in here and dropped inside, so the connection
    // is closed on the error path too
    let extraction = extract::extract_from_response(response).await?;
    if extraction.is_empty() {
        output::print_status(&config, "No href/src values found on the page")?;
    }

    output::print_results(&extraction, &config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(target: Option<&str>, urls_only: bool, paths_only: bool, silent: bool) -> Cli {
        Cli {
            target: target.map(String::from),
            urls_only,
            paths_only,
            silent,
            timeout: cli::DEFAULT_TIMEOUT_SECS,
            ..Default::default()
        }
    }

    #[test]
    fn test_conflicting_modes_stop_before_banner() {
        let mut out = Vec::new();
        let err = prepare(cli(Some("example.com"), true, true, false), &mut out).unwrap_err();
        assert!(matches!(err, error::Error::ConflictingModes));
        assert_eq!(err.exit_code(), 2);
        // Nothing printed, and run() never reached DNS or the network
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_target_after_banner() {
        let mut out = Vec::new();
        let err = prepare(cli(None, false, false, false), &mut out).unwrap_err();
        assert!(matches!(err, error::Error::Usage(_)));
        assert!(String::from_utf8(out).unwrap().contains("linkscout v"));
    }

    #[test]
    fn test_silent_prepare_prints_nothing() {
        let mut out = Vec::new();
        let (config, raw_target) =
            prepare(cli(Some("  example.com "), false, true, true), &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(raw_target, "example.com");
        assert_eq!(config.mode, crate::config::DisplayMode::PathsOnly);
    }
}
