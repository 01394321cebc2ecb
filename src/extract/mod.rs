// src/extract/mod.rs
// =============================================================================
// This module pulls href/src values out of HTML and sorts them into two
// buckets: full URLs and everything else (paths).
//
// Submodules:
// - classify: the per-tag logic (pure functions, no I/O)
// - tokenizer: the HTML tokenizer we drive, behind the TagTokenizer trait
// - stream: glue that feeds a response body through the tokenizer
//
// No DOM is ever built. The page is tokenized in one forward pass and only
// the attributes of the current tag are held in memory.
// =============================================================================

mod classify;
mod stream;
mod tokenizer;

pub use classify::Extraction;
pub use stream::extract_from_response;
