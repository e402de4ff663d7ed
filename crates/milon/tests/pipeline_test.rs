//! End-to-end tests over the public API: selection, batch refill,
//! checkpoint resume, and verification, with scripted providers.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use milon::batch::{
    progress_path, report_path, BatchOptions, BatchProcessor, Category, ProcessingProgress,
};
use milon::provider::sentences::SentenceGenerator;
use milon::provider::translate::{TranslationResult, Translator};
use milon::provider::{ProviderSettings, Services};
use milon::verify::verify;
use milon::word::{CefrLevel, Language, WordCollection, WordEntry, TRANSLATION_PLACEHOLDER};

/// Translator scripted per term; unknown terms get nothing.
struct ScriptedTranslator {
    answers: HashMap<String, String>,
}

impl ScriptedTranslator {
    fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            answers: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Translator for ScriptedTranslator {
    fn translate(&self, term: &str, _source: Language, _target: Language) -> TranslationResult {
        let mut result = TranslationResult::empty();
        if let Some(answer) = self.answers.get(term) {
            result.push_unique(answer, 95);
        }
        result
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

struct ScriptedSentences;

impl SentenceGenerator for ScriptedSentences {
    fn sentences(&self, term: &str, max: usize) -> Vec<String> {
        vec![
            format!("The word {} appears in context.", term),
            format!("People often say {} aloud.", term),
            format!("A third sentence about {}.", term),
        ]
        .into_iter()
        .take(max.max(2))
        .collect()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn seed_dataset(path: &Path, count: usize) {
    let mut collection = WordCollection::new();
    for i in 0..count {
        let mut entry =
            WordEntry::new(format!("w{}", i), format!("word{}", i)).with_level(CefrLevel::A1);
        entry.translations = vec![TRANSLATION_PLACEHOLDER.to_string()];
        collection.add(entry).unwrap();
    }
    collection.save(path).unwrap();
}

fn scripted_processor(path: &Path, count: usize) -> BatchProcessor {
    // Answers are pure Hebrew (the cleaning pass strips everything else)
    // and distinct per term, so redone work would be visible.
    let pairs: Vec<(String, String)> = (0..count)
        .map(|i| (format!("word{}", i), "מ".repeat(i + 1)))
        .collect();
    let refs: Vec<(&str, &str)> = pairs
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let mut translator = ScriptedTranslator::new(&refs);
    for (term, answer) in &pairs {
        // Sentences mention the term, so sentence translation hits too.
        translator.answers.insert(
            format!("The word {} appears in context.", term),
            format!("משפט על {}", answer),
        );
        translator.answers.insert(
            format!("People often say {} aloud.", term),
            format!("עוד משפט על {}", answer),
        );
    }
    BatchProcessor::new(
        path,
        Box::new(translator),
        Box::new(ScriptedSentences),
    )
    .with_pacing(Duration::ZERO)
}

#[test]
fn test_interrupted_run_resumes_without_redoing_work() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.json");
    seed_dataset(&path, 25);

    // A level selector keeps the queue stable across runs, which is what
    // makes checkpoint offsets meaningful.
    let mut options = BatchOptions::new(Category::Level(CefrLevel::A1));
    options.count = 10;

    // First run covers items 1-10 and leaves a checkpoint behind.
    let summary = scripted_processor(&path, 25).run(&options).unwrap();
    assert_eq!(summary.processed, 10);
    assert_eq!(summary.queued, 25);

    let progress = ProcessingProgress::load(progress_path(&path)).unwrap();
    assert_eq!(progress.items_processed, 10);
    assert_eq!(progress.items_total, 25);

    // Resumed run covers 11-20, not 1-10 again.
    options.resume = true;
    let summary = scripted_processor(&path, 25).run(&options).unwrap();
    assert_eq!(summary.processed, 10);
    assert_eq!(summary.cumulative, 20);

    let collection = WordCollection::load(&path).unwrap();
    let filled = collection
        .words
        .iter()
        .filter(|w| w.translations != vec![TRANSLATION_PLACEHOLDER])
        .count();
    assert_eq!(filled, 20);
    // The first slice was not redone with different content: ids 0-9 keep
    // their original scripted translations.
    assert_eq!(collection.words[0].translations, vec!["מ"]);
    assert_eq!(collection.words[19].translations, vec!["מ".repeat(20)]);
    assert_eq!(
        collection.words[24].translations,
        vec![TRANSLATION_PLACEHOLDER]
    );
}

#[test]
fn test_refilled_dataset_passes_verification() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.json");
    seed_dataset(&path, 5);

    scripted_processor(&path, 5)
        .run(&BatchOptions::new(Category::Placeholders))
        .unwrap();

    let collection = WordCollection::load(&path).unwrap();
    let report = verify(&collection);
    assert_eq!(report.summary.words_with_issues, 0);
    assert_eq!(report.summary.words_without_issues, 5);

    report.save(report_path(&path)).unwrap();
    assert!(report_path(&path).exists());
}

#[test]
fn test_offline_services_never_reach_the_network() {
    let services = Services::new(ProviderSettings::offline_mode());
    assert_eq!(services.translator().unwrap().name(), "offline");
    assert_eq!(services.sentence_generator().unwrap().name(), "offline");
    assert_eq!(services.speech().unwrap().name(), "device");
}

#[test]
fn test_offline_batch_fills_placeholders_not_garbage() {
    let dir = dir_with_one_word();
    let path = dir.path().join("words.json");

    let services = Services::new(ProviderSettings::offline_mode());
    let processor = BatchProcessor::new(
        &path,
        services.translator().unwrap(),
        services.sentence_generator().unwrap(),
    )
    .with_pacing(Duration::ZERO);

    let summary = processor
        .run(&BatchOptions::new(Category::Placeholders))
        .unwrap();
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);

    let collection = WordCollection::load(&path).unwrap();
    let entry = &collection.words[0];
    // Offline adapters return nothing, so the gaps are marked, aligned,
    // and the run still completes.
    assert_eq!(entry.translations, vec!["[Failed to translate]"]);
    assert_eq!(entry.example_sentences.len(), 2);
    assert_eq!(
        entry.translated_sentences.len(),
        entry.example_sentences.len()
    );
}

fn dir_with_one_word() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.json");
    seed_dataset(&path, 1);
    dir
}
