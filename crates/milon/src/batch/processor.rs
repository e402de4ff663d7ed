//! Single-batch refill runs over a word collection.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::Result;
use crate::provider::sentences::SentenceGenerator;
use crate::provider::translate::Translator;
use crate::text::{clean_sentences, clean_translations, hebrew_runs};
use crate::word::{WordCollection, WordEntry, FAILED_PLACEHOLDER, MAX_SENTENCES};

use super::category::{
    has_placeholder_sentences, has_placeholder_translated_sentences,
    has_placeholder_translations, Category,
};
use super::progress::{progress_path, ProcessingProgress};

/// Collection and checkpoint are persisted after this many processed items.
pub const CHECKPOINT_INTERVAL: usize = 10;

/// Delay inserted after each network call to stay under provider rate limits.
pub const PACING_DELAY: Duration = Duration::from_millis(500);

/// Parameters of one batch invocation.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub category: Category,
    /// Offset into the filtered queue.
    pub start: usize,
    /// Maximum items to process this invocation.
    pub count: usize,
    /// Read the checkpoint and continue from its processed count.
    pub resume: bool,
}

impl BatchOptions {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            start: 0,
            count: usize::MAX,
            resume: false,
        }
    }
}

/// Outcome of one batch invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Items processed this invocation.
    pub processed: usize,
    /// Items whose translation refill came back empty.
    pub failed: usize,
    /// Size of the full filtered queue.
    pub queued: usize,
    /// Cumulative processed count recorded in the checkpoint.
    pub cumulative: usize,
}

impl RunSummary {
    pub fn is_complete(&self) -> bool {
        self.cumulative >= self.queued
    }
}

/// Drives provider adapters over the entries of a persisted collection.
///
/// Items are processed strictly sequentially; fan-out would trip the
/// upstream rate limits the pacing delay exists to respect.
pub struct BatchProcessor {
    dataset: PathBuf,
    translator: Box<dyn Translator>,
    sentences: Box<dyn SentenceGenerator>,
    pacing: Duration,
}

impl BatchProcessor {
    pub fn new(
        dataset: impl Into<PathBuf>,
        translator: Box<dyn Translator>,
        sentences: Box<dyn SentenceGenerator>,
    ) -> Self {
        Self {
            dataset: dataset.into(),
            translator,
            sentences,
            pacing: PACING_DELAY,
        }
    }

    /// Override the inter-call pacing delay.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Run one batch. Setup problems (unreadable dataset, unwritable
    /// checkpoint) are hard errors; per-item provider failures are logged,
    /// counted, and never abort the run.
    pub fn run(&self, options: &BatchOptions) -> Result<RunSummary> {
        let mut collection = WordCollection::load(&self.dataset)?;

        let queue: Vec<usize> = collection
            .words
            .iter()
            .enumerate()
            .filter(|(_, entry)| options.category.matches(entry))
            .map(|(i, _)| i)
            .collect();
        let total = queue.len();

        let start = self.resolve_start(options, total);
        let end = total.min(start.saturating_add(options.count));
        info!(
            category = %options.category,
            start,
            end,
            total,
            "Starting batch run"
        );

        let mut processed = 0usize;
        let mut failed = 0usize;
        for &index in &queue[start.min(total)..end] {
            let entry = &mut collection.words[index];
            let term = entry.term.clone();
            if !self.refill_entry(entry) {
                warn!(term = %term, "Translation refill failed, placeholder stored");
                failed += 1;
            }
            processed += 1;

            if processed % CHECKPOINT_INTERVAL == 0 {
                self.checkpoint(&collection, options, start + processed, total)?;
            }
        }

        self.checkpoint(&collection, options, start + processed, total)?;
        info!(processed, failed, total, "Batch run finished");

        Ok(RunSummary {
            processed,
            failed,
            queued: total,
            cumulative: start + processed,
        })
    }

    fn resolve_start(&self, options: &BatchOptions, total: usize) -> usize {
        if !options.resume {
            return options.start;
        }
        match ProcessingProgress::load(progress_path(&self.dataset)) {
            Ok(progress) if progress.dataset_selector == options.category.to_string() => {
                info!(
                    items_processed = progress.items_processed,
                    "Resuming from checkpoint"
                );
                progress.items_processed.min(total)
            }
            Ok(progress) => {
                warn!(
                    checkpoint_selector = %progress.dataset_selector,
                    requested = %options.category,
                    "Checkpoint is for a different selector, starting fresh"
                );
                options.start
            }
            Err(e) => {
                warn!("No usable checkpoint ({}), starting fresh", e);
                options.start
            }
        }
    }

    fn checkpoint(
        &self,
        collection: &WordCollection,
        options: &BatchOptions,
        cumulative: usize,
        total: usize,
    ) -> Result<()> {
        collection.save(&self.dataset)?;
        ProcessingProgress::new(options.category.to_string(), cumulative, total)
            .save(progress_path(&self.dataset))
    }

    /// Refill whatever the entry is missing. Returns false when the
    /// term-level translation refill produced nothing usable.
    fn refill_entry(&self, entry: &mut WordEntry) -> bool {
        let mut ok = true;

        if has_placeholder_translations(entry) {
            let result =
                self.translator
                    .translate(&entry.term, entry.source_language, entry.target_language);
            self.pace();
            let cleaned = clean_translations(&result.translations);
            if cleaned.is_empty() {
                entry.translations = vec![FAILED_PLACEHOLDER.to_string()];
                ok = false;
            } else {
                entry.translations = cleaned;
            }
        }

        let mut sentences_refreshed = false;
        if has_placeholder_sentences(entry) {
            let raw = self.sentences.sentences(&entry.term, MAX_SENTENCES);
            self.pace();
            entry.example_sentences = clean_sentences(&raw, &entry.term);
            sentences_refreshed = true;
        }

        if sentences_refreshed || has_placeholder_translated_sentences(entry) {
            entry.translated_sentences = entry
                .example_sentences
                .iter()
                .map(|sentence| {
                    let result = self.translator.translate(
                        sentence,
                        entry.source_language,
                        entry.target_language,
                    );
                    self.pace();
                    result
                        .translations
                        .first()
                        .and_then(|t| hebrew_runs(t))
                        .unwrap_or_default()
                })
                .collect();
        }

        ok
    }

    fn pace(&self) {
        if !self.pacing.is_zero() {
            thread::sleep(self.pacing);
        }
    }
}
