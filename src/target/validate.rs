// src/target/validate.rs
// =============================================================================
// Target validation.
//
// Steps:
// 1. If the input has no scheme, put "https://" in front of it
// 2. Parse it with the `url` crate and reject anything that isn't http/https
// 3. Rebuild it as scheme://host[:port]path[?query]
// 4. Check that the host resolves in DNS (the addresses are thrown away,
//    the request later resolves the name again on its own)
//
// Steps 1-3 are pure and live in normalize_target(); step 4 is async and
// lives in validate_target().
// =============================================================================

use std::fmt::Write as _;

use tracing::debug;
use url::{Host, Url};

use crate::error::{Error, Result};

/// A validated target, ready to be requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// What the operator typed
    pub input: String,
    /// The rebuilt URL that is actually requested
    pub url: String,
    pub host: Host<String>,
    /// Explicit port, or the scheme default
    pub port: u16,
}

// Normalises a raw target without touching the network
//
// The path and query come from the parsed Url, so dot segments are
// resolved and unsafe characters percent-encoded ("/a/../b" -> "/b").
//
// Examples:
//   "domain.com"                  -> "https://domain.com/"
//   "localhost:8080/admin"        -> "https://localhost:8080/admin"
//   "http://a.com:81/x?y=1#frag"  -> "http://a.com:81/x?y=1"
//   "ftp://a.com"                 -> Err(InvalidScheme)
pub fn normalize_target(raw: &str) -> Result<Target> {
    let input = raw.trim();

    let with_scheme = if has_scheme(input) {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&with_scheme).map_err(|e| Error::InvalidUrl {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(Error::InvalidScheme(scheme.to_string()));
    }

    // http(s) URLs always have a host once parsing succeeded, but the
    // type system doesn't know that
    let host = url.host().ok_or_else(|| Error::InvalidUrl {
        input: input.to_string(),
        reason: "missing host".to_string(),
    })?;
    let host_str = url.host_str().unwrap_or_default();

    let mut rebuilt = format!("{}://{}", scheme, host_str);
    // url drops ports that equal the scheme default, so this is only
    // ever a non-default port
    if let Some(port) = url.port() {
        let _ = write!(rebuilt, ":{}", port);
    }
    rebuilt.push_str(url.path());
    if let Some(query) = url.query() {
        rebuilt.push('?');
        rebuilt.push_str(query);
    }

    Ok(Target {
        input: input.to_string(),
        url: rebuilt,
        host: host.to_owned(),
        port: url.port_or_known_default().unwrap_or(443),
    })
}

// Normalises the target and checks that its host resolves
//
// IP literals are accepted as-is; only domain names go through DNS
pub async fn validate_target(raw: &str) -> Result<Target> {
    let target = normalize_target(raw)?;
    debug!(input = %target.input, url = %target.url, "target normalised");

    if let Host::Domain(domain) = &target.host {
        let addresses = tokio::net::lookup_host((domain.as_str(), target.port))
            .await
            .map_err(|source| Error::HostUnresolvable {
                host: domain.clone(),
                source,
            })?
            .count();

        if addresses == 0 {
            return Err(Error::HostUnresolvable {
                host: domain.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no addresses returned",
                ),
            });
        }

        debug!(host = %domain, addresses, "target host resolved");
    }

    Ok(target)
}

// Does the input start with "scheme:"?
//
// "localhost:8080" looks like scheme "localhost" to a URL parser, so a
// numeric segment after the colon is read as a port, not a scheme
fn has_scheme(input: &str) -> bool {
    let Some((scheme, rest)) = input.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    let scheme_like = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    scheme_like && !starts_with_port(rest)
}

fn starts_with_port(rest: &str) -> bool {
    let end = rest
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    let port = &rest[..end];
    !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is `let ... else`?
//    - `let Some(x) = opt else { return ...; };` binds x or leaves early
//    - It keeps the happy path unindented
//
// 2. Why is Host generic (Host<&str> vs Host<String>)?
//    - url.host() borrows from the Url, so it returns Host<&str>
//    - Target must outlive the Url, so we call .to_owned() to get Host<String>
//
// 3. What does tokio::net::lookup_host do?
//    - Asks the system resolver for the addresses of a (host, port) pair
//    - It's async, so it doesn't block the runtime while waiting
// -----------------------------------------------------------------------------
