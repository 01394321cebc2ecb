// src/fetch/client.rs
// =============================================================================
// Builds the HTTP client used for the one request we make.
//
// Two flavours:
// - no proxy: plain reqwest client, normal certificate checks, and the
//   environment's HTTP(S)_PROXY variables are ignored
// - proxy (-p ip:port): every request goes through http://ip:port and
//   TLS certificates are NOT verified
//
// The second point is a conscious trade-off, not an accident. The usual
// reason to pass -p is to watch the traffic in an intercepting proxy
// (Burp, mitmproxy, ...), and those re-sign TLS with their own CA. Turning
// the check off makes that work out of the box, at the cost of accepting
// any certificate, including a real attacker's. It only ever happens when
// the operator asked for a proxy.
// =============================================================================

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use reqwest::{Client, Proxy};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// A validated -p value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxySpec {
    pub ip: IpAddr,
    pub port: u16,
}

impl ProxySpec {
    /// The proxy as an http:// URL
    pub fn url(&self) -> String {
        // SocketAddr puts brackets around IPv6 addresses for us
        format!("http://{}", SocketAddr::new(self.ip, self.port))
    }
}

// Parses "ip:port"
//
// The input must split on ':' into exactly two parts. Because of that an
// IPv6 literal can never pass here (it contains colons itself); only IPv4
// proxies are usable in practice.
//
// Examples:
//   "1.2.3.4:8080"    -> Ok
//   "1.2.3.4"         -> Err(MalformedProxySpec)
//   "not-an-ip:8080"  -> Err(InvalidProxy)
//   "1.2.3.4:99999"   -> Err(InvalidProxy)
pub fn parse_proxy(spec: &str) -> Result<ProxySpec> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 2 {
        return Err(Error::MalformedProxySpec(spec.to_string()));
    }

    let invalid = |reason: &str| Error::InvalidProxy {
        spec: spec.to_string(),
        reason: reason.to_string(),
    };

    let ip: IpAddr = parts[0]
        .parse()
        .map_err(|_| invalid("not an IP address"))?;

    let port: u32 = parts[1].parse().map_err(|_| invalid("port is not a number"))?;
    if !(1..=65535).contains(&port) {
        return Err(invalid("port must be between 1 and 65535"));
    }

    Ok(ProxySpec {
        ip,
        port: port as u16,
    })
}

/// True when `spec` is a usable ip:port proxy
#[cfg(test)]
pub fn is_valid_proxy(spec: &str) -> bool {
    parse_proxy(spec).is_ok()
}

// Creates the HTTP client
//
// Parameters:
//   proxy: Some(..) routes everything through the proxy and disables
//          certificate verification (see the top of this file)
//   timeout: whole-request timeout, zero means no timeout
pub fn build_client(proxy: Option<&ProxySpec>, timeout: Duration) -> Result<Client> {
    let mut builder = Client::builder();

    if !timeout.is_zero() {
        builder = builder.timeout(timeout);
    }

    builder = match proxy {
        Some(proxy) => {
            let proxy_url = proxy.url();
            warn!(proxy = %proxy_url, "TLS certificate verification is disabled while using a proxy");
            builder
                .proxy(Proxy::all(proxy_url.as_str()).map_err(Error::ClientBuild)?)
                .danger_accept_invalid_certs(true)
        }
        None => builder.no_proxy(),
    };

    let client = builder.build().map_err(Error::ClientBuild)?;
    debug!(proxied = proxy.is_some(), ?timeout, "http client ready");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::test_server::serve_once;

    #[test]
    fn test_valid_proxy() {
        assert!(is_valid_proxy("1.2.3.4:8080"));
        assert!(is_valid_proxy("127.0.0.1:1"));
        assert!(is_valid_proxy("127.0.0.1:65535"));
    }

    #[test]
    fn test_invalid_proxy() {
        assert!(!is_valid_proxy("not-an-ip:8080"));
        assert!(!is_valid_proxy("1.2.3.4:99999"));
        assert!(!is_valid_proxy("1.2.3.4:0"));
        assert!(!is_valid_proxy("1.2.3.4:http"));
        assert!(!is_valid_proxy("localhost:8080"));
    }

    #[test]
    fn test_malformed_proxy_spec() {
        assert!(matches!(
            parse_proxy("1.2.3.4"),
            Err(Error::MalformedProxySpec(_))
        ));
        assert!(matches!(
            parse_proxy("1.2.3.4:80:90"),
            Err(Error::MalformedProxySpec(_))
        ));
        // IPv6 literals always have too many colons
        assert!(matches!(
            parse_proxy("::1:8080"),
            Err(Error::MalformedProxySpec(_))
        ));
    }

    #[test]
    fn test_proxy_url() {
        let proxy = parse_proxy("10.0.0.1:3128").unwrap();
        assert_eq!(proxy.url(), "http://10.0.0.1:3128");
    }

    #[test]
    fn test_build_clients() {
        assert!(build_client(None, Duration::from_secs(10)).is_ok());
        let proxy = parse_proxy("127.0.0.1:8080").unwrap();
        assert!(build_client(Some(&proxy), Duration::ZERO).is_ok());
    }

    #[tokio::test]
    async fn test_requests_go_through_proxy() {
        // The "proxy" is our one-shot server. A request for a host that
        // can't resolve only succeeds if it really went through it.
        let (proxy_url, server) = serve_once("<a href=\"/via-proxy\">x</a>").await;
        let addr = proxy_url
            .trim_start_matches("http://")
            .trim_end_matches('/')
            .to_string();
        let proxy = parse_proxy(&addr).unwrap();

        let client = build_client(Some(&proxy), Duration::from_secs(5)).unwrap();
        let body = client
            .get("http://proxied.invalid/page")
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("/via-proxy"));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET http://proxied.invalid/page HTTP/1.1"));
    }
}
