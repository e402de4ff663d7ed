//! Pure text cleaning and extraction utilities.
//!
//! Everything in this module is synchronous and deterministic: same input,
//! same output, no I/O. The batch processor and the provider adapters use
//! these helpers to sanitize noisy third-party payloads.

mod extract;
mod sentences;

pub use extract::{
    clean_translations, contains_hebrew, extract_hebrew, hebrew_runs, MAX_EXTRACTED,
};
pub use sentences::{clean_sentences, decode_html_entities, fallback_sentences, is_placeholder};
