// src/config.rs
// =============================================================================
// The run configuration, built exactly once from the parsed command line.
//
// Nothing in the program reads flags directly after this point: main.rs
// builds a Config and hands references to the validator, the client builder,
// the fetcher and the presenter.
// =============================================================================

use std::time::Duration;

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Which buckets get printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Both,
    UrlsOnly,
    PathsOnly,
}

impl DisplayMode {
    pub fn shows_urls(self) -> bool {
        self != DisplayMode::PathsOnly
    }

    pub fn shows_paths(self) -> bool {
        self != DisplayMode::UrlsOnly
    }
}

/// Per-request overrides taken from -c and -r
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Sent verbatim as the Cookie header
    pub cookie: Option<String>,
    /// Raw "Name: Value" text, split when the request is built
    pub header: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Raw target as typed by the operator (may be empty)
    pub target: String,
    pub proxy: Option<String>,
    pub request: RequestOptions,
    pub mode: DisplayMode,
    pub silent: bool,
    pub json: bool,
}

impl Config {
    // Turns the clap struct into a Config
    //
    // Only checks the things that need no network: the -uO/-pO conflict.
    // The missing-target check lives in require_target() because the
    // banner is printed between the two
    pub fn from_cli(cli: Cli) -> Result<Config> {
        let mode = match (cli.urls_only, cli.paths_only) {
            (true, true) => return Err(Error::ConflictingModes),
            (true, false) => DisplayMode::UrlsOnly,
            (false, true) => DisplayMode::PathsOnly,
            (false, false) => DisplayMode::Both,
        };

        Ok(Config {
            target: cli.target.unwrap_or_default(),
            proxy: cli.proxy.filter(|p| !p.is_empty()),
            request: RequestOptions {
                cookie: cli.cookie.filter(|c| !c.is_empty()),
                header: cli.header.filter(|h| !h.is_empty()),
                timeout: Duration::from_secs(cli.timeout),
            },
            mode,
            silent: cli.silent,
            json: cli.json,
        })
    }

    /// Fails with a usage error when no target was given
    pub fn require_target(&self) -> Result<&str> {
        let target = self.target.trim();
        if target.is_empty() {
            return Err(Error::Usage(
                "Please provide a target.\n Example usage: linkscout -t domain.com\n Use -h for help."
                    .to_string(),
            ));
        }
        Ok(target)
    }
}
