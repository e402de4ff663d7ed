//! Milon: word-data acquisition pipeline for an English-Hebrew vocabulary app.
//!
//! Milon fills a persisted word collection with translations, example
//! sentences, and sentence translations fetched from free public services,
//! then audits the result.
//!
//! # Core Principles
//!
//! - **Fail soft at the edges**: a provider that is down or rate-limited
//!   yields an empty result, never a crash; placeholders mark the gap
//! - **Resumable**: batch runs checkpoint every few items and pick up
//!   where they stopped
//! - **Offline-safe**: one flag swaps every network adapter for its local
//!   stand-in
//!
//! # Example
//!
//! ```no_run
//! use milon::batch::{BatchOptions, BatchProcessor, Category};
//! use milon::provider::{ProviderSettings, Services};
//!
//! let services = Services::new(ProviderSettings::default());
//! let processor = BatchProcessor::new(
//!     "data/words.json",
//!     services.translator().unwrap(),
//!     services.sentence_generator().unwrap(),
//! );
//!
//! let summary = processor.run(&BatchOptions::new(Category::All)).unwrap();
//! println!("Processed: {}", summary.processed);
//! ```

pub mod batch;
pub mod curated;
pub mod error;
pub mod provider;
pub mod text;
pub mod verify;
pub mod word;

pub use batch::{BatchOptions, BatchProcessor, Category, ProcessingProgress, RunSummary};
pub use error::{MilonError, Result};
pub use provider::{ProviderSettings, Services};
pub use verify::{VerificationReport, VerificationSummary};
pub use word::{CefrLevel, Language, WordCollection, WordEntry};
