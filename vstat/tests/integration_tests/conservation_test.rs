// tests/integration_tests/conservation_test.rs
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::rc::Rc;
use vstat::core::extract::Extractor;
use vstat::core::metadata::{MetadataProvider, parse};
use vstat::core::store::DocumentStore;
use vstat::models::{DocumentClassifier, DocumentKind, DocumentStat, StructuralMetadata};
use vstat::{Collector, DocumentId, ExtractError, LifecycleEvent};

const VOCABULARY: [&str; 8] = [
    "alpha", "**bold**", "[[link]]", "中文", "42", "==mark==", "`code`", "word.",
];

/// In-memory vault shared between the test and the collector.
#[derive(Clone, Default)]
struct MemoryVault {
    documents: Rc<RefCell<BTreeMap<DocumentId, String>>>,
    classifier: DocumentClassifier,
}

impl MemoryVault {
    fn ids(&self) -> Vec<DocumentId> {
        self.documents.borrow().keys().cloned().collect()
    }
}

impl DocumentStore for MemoryVault {
    fn documents(&self) -> Result<Vec<DocumentId>> {
        Ok(self.ids())
    }

    fn stat(&self, id: &DocumentId) -> io::Result<Option<DocumentStat>> {
        Ok(self.documents.borrow().get(id).map(|content| DocumentStat {
            size: content.len() as u64,
        }))
    }

    fn read(&self, id: &DocumentId) -> io::Result<String> {
        self.documents
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}

impl MetadataProvider for MemoryVault {
    fn metadata(&self, id: &DocumentId) -> Result<StructuralMetadata, ExtractError> {
        let documents = self.documents.borrow();
        let content = documents
            .get(id)
            .ok_or_else(|| ExtractError::MetadataUnavailable { id: id.clone() })?;
        Ok(match self.classifier.classify(id) {
            DocumentKind::Note => parse(content),
            DocumentKind::Attachment => StructuralMetadata::default(),
        })
    }
}

fn collector(vault: &MemoryVault) -> Collector<MemoryVault, MemoryVault> {
    Collector::new(Extractor::new(
        vault.clone(),
        vault.clone(),
        DocumentClassifier::default(),
    ))
}

fn random_content(rng: &mut StdRng) -> String {
    let paragraphs = rng.random_range(1..4);
    let mut content = String::new();
    for _ in 0..paragraphs {
        let words = rng.random_range(0..12);
        let line: Vec<&str> = (0..words)
            .map(|_| VOCABULARY[rng.random_range(0..VOCABULARY.len())])
            .collect();
        content.push_str(&line.join(" "));
        content.push_str("\n\n");
    }
    content
}

fn random_id(rng: &mut StdRng) -> DocumentId {
    let folder = ["", "daily/", "projects/"][rng.random_range(0..3)];
    let extension = if rng.random_bool(0.8) { "md" } else { "png" };
    DocumentId::new(format!("{folder}doc{}.{extension}", rng.random_range(0..20)))
}

/// Applies one random change to the vault and reports it, sometimes twice.
fn mutate(rng: &mut StdRng, vault: &MemoryVault, collector: &mut Collector<MemoryVault, MemoryVault>) {
    let existing = vault.ids();
    let event = match rng.random_range(0..4) {
        0 if !existing.is_empty() => {
            let id = existing[rng.random_range(0..existing.len())].clone();
            vault.documents.borrow_mut().remove(&id);
            LifecycleEvent::Deleted(id)
        }
        1 if !existing.is_empty() => {
            let from = existing[rng.random_range(0..existing.len())].clone();
            let to = random_id(rng);
            let mut documents = vault.documents.borrow_mut();
            if let Some(content) = documents.remove(&from) {
                documents.insert(to.clone(), content);
            }
            LifecycleEvent::Renamed { from, to }
        }
        2 if !existing.is_empty() => {
            let id = existing[rng.random_range(0..existing.len())].clone();
            let content = random_content(rng);
            vault.documents.borrow_mut().insert(id.clone(), content);
            LifecycleEvent::Modified(id)
        }
        _ => {
            let id = random_id(rng);
            let content = random_content(rng);
            vault.documents.borrow_mut().insert(id.clone(), content);
            LifecycleEvent::Created(id)
        }
    };

    if rng.random_bool(0.2) {
        collector.handle(event.clone());
    }
    collector.handle(event);
}

#[test]
fn test_aggregate_matches_rescan() -> Result<()> {
    for seed in [1, 7, 42, 1234, 99_999] {
        let mut rng = StdRng::seed_from_u64(seed);
        let vault = MemoryVault::default();
        for _ in 0..10 {
            let id = random_id(&mut rng);
            let content = random_content(&mut rng);
            vault.documents.borrow_mut().insert(id, content);
        }

        let mut incremental = collector(&vault);
        incremental.start()?;

        for _ in 0..200 {
            mutate(&mut rng, &vault, &mut incremental);
            if rng.random_bool(0.3) {
                incremental.drain();
                assert_eq!(
                    incremental.totals(),
                    incremental.cached_total(),
                    "seed {seed}: totals drifted from the cache"
                );
            }
        }
        incremental.drain();
        assert_eq!(incremental.backlog_len(), 0);

        let mut rescan = collector(&vault);
        rescan.start()?;
        rescan.drain();

        assert_eq!(
            incremental.totals(),
            rescan.totals(),
            "seed {seed}: incremental totals differ from a full rescan"
        );
        assert_eq!(incremental.cache_len(), vault.ids().len());
    }
    Ok(())
}

#[test]
fn test_no_events_means_no_change() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(3);
    let vault = MemoryVault::default();
    for _ in 0..20 {
        let id = random_id(&mut rng);
        let content = random_content(&mut rng);
        vault.documents.borrow_mut().insert(id, content);
    }
    let mut collector = collector(&vault);
    collector.start()?;
    collector.drain();
    let settled = collector.totals();

    for _ in 0..3 {
        assert_eq!(collector.drain(), 0);
        assert_eq!(collector.totals(), settled);
    }
    Ok(())
}
