// src/fetch/page.rs
// =============================================================================
// Sends the one GET request for the target page.
//
// Every request carries:
// - a fixed desktop-browser User-Agent (some sites block obvious bots)
// - the -c value, verbatim, as the Cookie header
// - the -r value, split into name and value on the first ':'
//
// A bad -c or -r value never stops the run. We print a warning, drop that
// header and send the request without it.
//
// The response is handed back unread; the body is streamed by the
// extractor and released when the Response is dropped.
// =============================================================================

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE, USER_AGENT};
use reqwest::{Client, Request, Response};
use tracing::{debug, warn};

use crate::config::RequestOptions;
use crate::error::{Error, Result};

/// User-Agent sent with every request
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// A custom header split into its two halves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSpec {
    pub name: String,
    pub value: String,
}

// Splits "Name: Value" on the first colon and trims both halves
//
// Examples:
//   "Myheader: test"        -> Some(Myheader, test)
//   "X-Time: 12:30"         -> Some(X-Time, 12:30)
//   "no colon here"         -> None
pub fn parse_custom_header(raw: &str) -> Option<HeaderSpec> {
    let (name, value) = raw.split_once(':')?;
    Some(HeaderSpec {
        name: name.trim().to_string(),
        value: value.trim().to_string(),
    })
}

// Sends the GET request and returns the response with its body unread
//
// Any connection, DNS or TLS failure becomes Error::Transport. The HTTP
// status is not checked: error pages contain links too.
pub async fn fetch_page(client: &Client, url: &str, options: &RequestOptions) -> Result<Response> {
    let request = build_request(client, url, options)?;
    let response = client.execute(request).await.map_err(Error::Transport)?;

    debug!(
        status = %response.status(),
        content_length = ?response.content_length(),
        "response received"
    );

    Ok(response)
}

fn build_request(client: &Client, url: &str, options: &RequestOptions) -> Result<Request> {
    client
        .get(url)
        .headers(request_headers(options))
        .build()
        .map_err(Error::Transport)
}

fn request_headers(options: &RequestOptions) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

    if let Some(cookie) = &options.cookie {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                headers.insert(COOKIE, value);
            }
            Err(_) => warn!("Invalid cookie value, sending request without it: {}", cookie),
        }
    }

    if let Some(raw) = &options.header {
        match parse_custom_header(raw).and_then(|spec| header_pair(&spec)) {
            // append, not insert: a custom User-Agent goes out next to ours
            Some((name, value)) => {
                headers.append(name, value);
            }
            None => warn!("Invalid header format: {}", raw),
        }
    }

    headers
}

fn header_pair(spec: &HeaderSpec) -> Option<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(spec.name.as_bytes()).ok()?;
    let value = HeaderValue::from_str(&spec.value).ok()?;
    Some((name, value))
}
