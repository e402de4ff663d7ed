//! Batch refill of a persisted word collection.
//!
//! A run selects a slice of the collection by category, drives the
//! provider adapters over it one entry at a time, and checkpoints
//! progress so an interrupted run can resume where it stopped.

pub mod category;
pub mod chain;
pub mod processor;
pub mod progress;

pub use category::{
    has_placeholder_sentences, has_placeholder_translated_sentences,
    has_placeholder_translations, needs_processing, Category,
};
pub use chain::{BatchChain, INTER_BATCH_DELAY};
pub use processor::{BatchOptions, BatchProcessor, RunSummary, CHECKPOINT_INTERVAL, PACING_DELAY};
pub use progress::{progress_path, report_path, ProcessingProgress};
