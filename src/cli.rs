// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The flags are deliberately short and terse (-t, -c, -r, -p, -s) because
// this is a recon tool people type by hand. Two flags are special: -uO and
// -pO are two letters long but take a single dash. clap only allows one
// character after a single dash, so we rewrite them to --uO / --pO before
// clap ever sees the arguments (see normalize_args below).
// =============================================================================

use clap::Parser;

/// Timeout used when --timeout is not given
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code,
// including -h/--help which prints usage and exits with code 0
#[derive(Parser, Debug, Default)]
#[command(
    name = "linkscout",
    version,
    about = "Extract URLs and paths from a webpage",
    long_about = "linkscout fetches a single webpage and lists every href/src value it finds, \
                  split into full URLs and relative paths.",
    after_help = "Example:\n  linkscout -t domain.com\n  linkscout -t https://domain.com -p 127.0.0.1:8080 -uO"
)]
pub struct Cli {
    /// Target URL (e.g., domain.com or https://domain.com)
    #[arg(short = 't', long = "target", value_name = "URL")]
    pub target: Option<String>,

    /// Cookies sent verbatim as the Cookie header (e.g., "user_token=g3p21ip21h; ")
    #[arg(short = 'c', long = "cookie", value_name = "COOKIES")]
    pub cookie: Option<String>,

    /// One extra request header (e.g., "Myheader: test")
    #[arg(short = 'r', long = "header", value_name = "HEADER")]
    pub header: Option<String>,

    /// Proxy in ip:port format (e.g., 127.0.0.1:8080). Disables TLS certificate checks
    #[arg(short = 'p', long = "proxy", value_name = "IP:PORT")]
    pub proxy: Option<String>,

    /// Extract only full URLs
    #[arg(long = "uO")]
    pub urls_only: bool,

    /// Extract only URL paths
    #[arg(long = "pO")]
    pub paths_only: bool,

    /// Silent mode, avoid printing banner and other messages
    #[arg(short = 's', long = "silent")]
    pub silent: bool,

    /// Print the result as JSON instead of plain lists
    #[arg(long)]
    pub json: bool,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

// Rewrites the single-dash, two-letter flags into a form clap accepts
//
//   -uO  ->  --uO
//   -pO  ->  --pO
//
// Everything after a bare "--" is left alone
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }

        match arg.as_str() {
            "--" => {
                passthrough = true;
                out.push(arg);
            }
            "-uO" | "-pO" => out.push(format!("-{}", arg)),
            _ => out.push(arg),
        }
    }

    out
}
