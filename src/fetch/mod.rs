// src/fetch/mod.rs
// =============================================================================
// Everything that talks HTTP.
//
// Submodules:
// - client: builds the reqwest Client, optionally routed through a proxy
// - page: builds and sends the single GET request for the target page
//
// Only one request is ever sent per run, so there is no concurrency and no
// retry logic in here.
// =============================================================================

mod client;
mod page;

pub use client::{build_client, parse_proxy};
pub use page::fetch_page;

#[cfg(test)]
pub(crate) mod test_server {
    // A tiny one-shot HTTP server for tests
    //
    // Accepts one connection, captures the request head, answers with a
    // fixed 200 response and hands the captured request back through the
    // JoinHandle.
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    pub async fn serve_once(body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];

            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}/", addr), handle)
    }
}
