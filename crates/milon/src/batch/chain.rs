//! Chained batch runs covering an entire work queue.

use std::thread;
use std::time::Duration;

use tracing::{error, info};

use crate::error::Result;

use super::processor::{BatchOptions, BatchProcessor, RunSummary};

/// Pause between consecutive batches.
pub const INTER_BATCH_DELAY: Duration = Duration::from_secs(2);

/// Run fixed-size batches back to back until the checkpoint reports the
/// whole queue processed.
///
/// Each iteration resumes from the previous checkpoint, so a chain killed
/// midway can itself be resumed with the same invocation. A failing batch
/// aborts the chain; the logged message tells the operator how to pick up
/// where it stopped.
pub struct BatchChain {
    processor: BatchProcessor,
    batch_size: usize,
    delay: Duration,
}

impl BatchChain {
    pub fn new(processor: BatchProcessor, batch_size: usize) -> Self {
        Self {
            processor,
            batch_size,
            delay: INTER_BATCH_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn run(&self, mut options: BatchOptions) -> Result<RunSummary> {
        options.count = self.batch_size;

        let mut totals = RunSummary {
            processed: 0,
            failed: 0,
            queued: 0,
            cumulative: 0,
        };
        loop {
            let summary = match self.processor.run(&options) {
                Ok(summary) => summary,
                Err(e) => {
                    error!(
                        category = %options.category,
                        "Batch failed: {}. Re-run with --resume to continue from the last checkpoint.",
                        e
                    );
                    return Err(e);
                }
            };

            totals.processed += summary.processed;
            totals.failed += summary.failed;
            totals.queued = summary.queued;
            totals.cumulative = summary.cumulative;

            if summary.is_complete() || summary.processed == 0 {
                break;
            }
            info!(
                cumulative = summary.cumulative,
                queued = summary.queued,
                "Batch complete, continuing"
            );

            // Subsequent batches pick up from the checkpoint just written.
            options.resume = true;
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }

        info!(
            processed = totals.processed,
            failed = totals.failed,
            "Chain finished"
        );
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::category::Category;
    use crate::provider::sentences::SentenceGenerator;
    use crate::provider::translate::{TranslationResult, Translator};
    use crate::word::{CefrLevel, Language, WordCollection, WordEntry, TRANSLATION_PLACEHOLDER};

    struct OneWord;

    impl Translator for OneWord {
        fn translate(&self, _term: &str, _source: Language, _target: Language) -> TranslationResult {
            let mut result = TranslationResult::empty();
            result.push_unique("מילה", 95);
            result
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct NoSentences;

    impl SentenceGenerator for NoSentences {
        fn sentences(&self, _term: &str, _max: usize) -> Vec<String> {
            Vec::new()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_chain_covers_whole_queue() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");

        let mut collection = WordCollection::new();
        for i in 0..23 {
            let mut entry =
                WordEntry::new(format!("w{}", i), format!("word{}", i)).with_level(CefrLevel::A2);
            entry.translations = vec![TRANSLATION_PLACEHOLDER.to_string()];
            collection.add(entry).unwrap();
        }
        collection.save(&path).unwrap();

        let processor = BatchProcessor::new(&path, Box::new(OneWord), Box::new(NoSentences))
            .with_pacing(Duration::ZERO);
        let summary = BatchChain::new(processor, 10)
            .with_delay(Duration::ZERO)
            .run(BatchOptions::new(Category::All))
            .unwrap();

        assert_eq!(summary.processed, 23);
        assert_eq!(summary.cumulative, 23);
        assert!(summary.is_complete());

        let stored = WordCollection::load(&path).unwrap();
        assert!(stored.words.iter().all(|w| w.translations == vec!["מילה"]));
    }
}
