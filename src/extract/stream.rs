// src/extract/stream.rs
// =============================================================================
// Feeds a document through a TagTokenizer and collects the Extraction.
//
// The HTTP body arrives as a stream of byte chunks. Chunk boundaries can
// fall in the middle of a multi-byte UTF-8 character, so the incomplete
// tail of each chunk is held back and glued onto the next one. Bytes that
// are not valid UTF-8 at all become U+FFFD; attribute values are almost
// always ASCII, so that never costs us a link.
// =============================================================================

use futures::{Stream, StreamExt};
use reqwest::Response;
use tracing::debug;

use super::classify::Extraction;
use super::tokenizer::{Html5everTokenizer, TagTokenizer};
use crate::error::{Error, Result};

/// Extracts links from a complete document held in memory
#[cfg(test)]
pub fn extract_from_str(html: &str) -> Extraction {
    let mut tokenizer = Html5everTokenizer::new();
    let mut extraction = Extraction::default();
    extraction.record_tags(tokenizer.feed(html));
    extraction.record_tags(tokenizer.finish());
    extraction
}

// Extracts links from an HTTP response, reading the body as it arrives
//
// The response is consumed, so the connection is released when this
// returns, whether extraction succeeded or the body broke off
pub async fn extract_from_response(response: Response) -> Result<Extraction> {
    extract_from_stream(response.bytes_stream(), Html5everTokenizer::new()).await
}

// Drives any chunk stream through any tokenizer
//
// The only way this fails is a read error from the stream itself;
// malformed HTML just ends the scan early
pub async fn extract_from_stream<S, B, T>(chunks: S, mut tokenizer: T) -> Result<Extraction>
where
    S: Stream<Item = reqwest::Result<B>>,
    B: AsRef<[u8]>,
    T: TagTokenizer,
{
    let mut chunks = std::pin::pin!(chunks);
    let mut decoder = Utf8Carry::default();
    let mut extraction = Extraction::default();
    let mut received = 0usize;

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(Error::BodyRead)?;
        received += chunk.as_ref().len();

        let text = decoder.decode(chunk.as_ref());
        extraction.record_tags(tokenizer.feed(&text));
    }

    extraction.record_tags(tokenizer.feed(&decoder.finish()));
    extraction.record_tags(tokenizer.finish());

    debug!(
        bytes = received,
        urls = extraction.urls.len(),
        paths = extraction.paths.len(),
        "extraction finished"
    );

    Ok(extraction)
}

// Incremental UTF-8 decoding across chunk boundaries
#[derive(Debug, Default)]
struct Utf8Carry {
    pending: Vec<u8>,
}

impl Utf8Carry {
    fn decode(&mut self, bytes: &[u8]) -> String {
        let mut buf = std::mem::take(&mut self.pending);
        buf.extend_from_slice(bytes);

        let mut out = String::with_capacity(buf.len());
        let mut start = 0;

        while start < buf.len() {
            match std::str::from_utf8(&buf[start..]) {
                Ok(text) => {
                    out.push_str(text);
                    start = buf.len();
                }
                Err(e) => {
                    let valid_end = start + e.valid_up_to();
                    // Already validated, so this never substitutes anything
                    out.push_str(&String::from_utf8_lossy(&buf[start..valid_end]));

                    match e.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            start = valid_end + bad;
                        }
                        // Incomplete sequence at the end: wait for more bytes
                        None => {
                            self.pending = buf[valid_end..].to_vec();
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    // Whatever is still pending can no longer be completed
    fn finish(&mut self) -> String {
        let rest = std::mem::take(&mut self.pending);
        String::from_utf8_lossy(&rest).into_owned()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a Stream?
//    - The async version of an Iterator: each .next().await yields an item
//    - StreamExt (from the futures crate) provides .next() and friends
//
// 2. Why std::pin::pin!?
//    - Some streams must not move in memory once polled
//    - pin! pins the stream on the stack so .next() can be called on it
//
// 3. Why AsRef<[u8]>?
//    - reqwest yields `Bytes`, tests use `Vec<u8>`
//    - Both can be viewed as a byte slice, so the function accepts either
// -----------------------------------------------------------------------------
