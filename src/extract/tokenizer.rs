// src/extract/tokenizer.rs
// =============================================================================
// The HTML tokenizer, behind a small trait.
//
// The extractor only needs one thing from a tokenizer: "here is some more
// text, give me the start tags you finished". TagTokenizer is that contract.
// A tokenizer is fed front to back exactly once and then finished; it can't
// be rewound or reused.
//
// Html5everTokenizer implements it with html5ever's tokenizer (the one
// underneath scraper), without the tree builder. html5ever is
// push-based: it calls our TokenSink for every token, and the sink keeps
// the start tags until feed() hands them out.
//
// Without a tree builder nobody tells the tokenizer that <script> or
// <style> content is raw text, so the sink does that itself. Otherwise
// `document.write('<a href="x">')` inside a script would show up as a link.
// =============================================================================

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

/// A start tag (or self-closing tag) with its attributes in markup order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl TagToken {
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Turns HTML text into start-tag tokens, incrementally
pub trait TagTokenizer {
    /// Feeds the next piece of the document and returns the tags it completed
    fn feed(&mut self, text: &str) -> Vec<TagToken>;

    /// Signals end of input and returns whatever was still pending.
    /// A tag cut off by the end of the document is dropped.
    fn finish(self) -> Vec<TagToken>;
}

pub struct Html5everTokenizer {
    inner: Tokenizer<TagSink>,
    input: BufferQueue,
}

impl Html5everTokenizer {
    pub fn new() -> Self {
        Html5everTokenizer {
            inner: Tokenizer::new(TagSink::default(), TokenizerOpts::default()),
            input: BufferQueue::new(),
        }
    }
}

impl Default for Html5everTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TagTokenizer for Html5everTokenizer {
    fn feed(&mut self, text: &str) -> Vec<TagToken> {
        if !text.is_empty() {
            self.input.push_back(StrTendril::from_slice(text));
        }
        // Our sink never asks to pause for a script, so feed() always runs
        // until the queue is empty
        let _ = self.inner.feed(&mut self.input);
        std::mem::take(&mut self.inner.sink.tags)
    }

    fn finish(mut self) -> Vec<TagToken> {
        let _ = self.inner.feed(&mut self.input);
        self.inner.end();
        std::mem::take(&mut self.inner.sink.tags)
    }
}

#[derive(Default)]
struct TagSink {
    tags: Vec<TagToken>,
}

impl TokenSink for TagSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) if matches!(tag.kind, TagKind::StartTag) => {
                let next_state = content_state(&tag);
                self.tags.push(TagToken {
                    name: tag.name.to_string(),
                    attributes: tag
                        .attrs
                        .into_iter()
                        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                        .collect(),
                });
                next_state
            }
            // End tags, text, comments, doctypes and parse errors carry
            // nothing we want
            _ => TokenSinkResult::Continue,
        }
    }
}

// The tokenizer state for the content that follows a start tag
//
// Decided by the name alone: "/>" means nothing on a non-void element, so
// <script src="x"/> still opens a script body that runs until </script>
fn content_state(tag: &Tag) -> TokenSinkResult<()> {
    match &*tag.name {
        "script" => TokenSinkResult::RawData(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => {
            TokenSinkResult::RawData(RawKind::Rawtext)
        }
        "textarea" | "title" => TokenSinkResult::RawData(RawKind::Rcdata),
        "plaintext" => TokenSinkResult::Plaintext,
        _ => TokenSinkResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(html: &str) -> Vec<TagToken> {
        let mut tokenizer = Html5everTokenizer::new();
        let mut out = tokenizer.feed(html);
        out.extend(tokenizer.finish());
        out
    }

    fn names(html: &str) -> Vec<String> {
        tags(html).into_iter().map(|t| t.name).collect()
    }

    #[test]
    fn test_start_and_self_closing_tags() {
        assert_eq!(
            names(r#"<p><a href="/x">x</a><img src="/y.png"/><br></p>"#),
            vec!["p", "a", "img", "br"]
        );
    }

    #[test]
    fn test_attribute_names_are_lowercased() {
        let tag = &tags(r#"<A HREF="/Upper">"#)[0];
        assert_eq!(tag.name, "a");
        assert_eq!(tag.attributes, vec![("href".to_string(), "/Upper".to_string())]);
    }

    #[test]
    fn test_duplicate_attribute_keeps_first() {
        let tag = &tags(r#"<a href="/one" href="/two">"#)[0];
        assert_eq!(tag.attributes, vec![("href".to_string(), "/one".to_string())]);
    }

    #[test]
    fn test_script_content_is_not_tokenized() {
        let html = r#"<script src="/app.js">document.write('<a href="/fake">')</script><a href="/real">"#;
        assert_eq!(names(html), vec!["script", "a"]);
    }

    #[test]
    fn test_title_and_style_content_is_not_tokenized() {
        let html = "<title><img src=/t.png></title><style>a{}<b></style><i>";
        assert_eq!(names(html), vec!["title", "style", "i"]);
    }

    #[test]
    fn test_self_closing_script_still_opens_raw_text() {
        let html = r#"<script src="/a.js"/><a href="/in"></script><a href="/out">"#;
        let found = tags(html);
        let names: Vec<_> = found.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["script", "a"]);
        assert_eq!(found[1].attributes, vec![("href".to_string(), "/out".to_string())]);
    }

    #[test]
    fn test_self_closing_title_and_textarea_still_open_rcdata() {
        let html = "<title/><img src=/t.png></title><textarea/><a href=/x></textarea><b>";
        assert_eq!(names(html), vec!["title", "textarea", "b"]);
    }

    #[test]
    fn test_tags_split_across_feeds() {
        let mut tokenizer = Html5everTokenizer::new();
        let mut out = tokenizer.feed(r#"<a hr"#);
        assert!(out.is_empty());
        out.extend(tokenizer.feed(r#"ef="/split">"#));
        out.extend(tokenizer.finish());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].attributes, vec![("href".to_string(), "/split".to_string())]);
    }

    #[test]
    fn test_truncated_tag_is_dropped() {
        assert_eq!(names(r#"<a href="/ok"><img src="/cut"#), vec!["a"]);
    }
}
