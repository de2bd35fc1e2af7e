use paperdesk_core::{
    AnalysisProvider, CitationStyle, CitationValidationError, CoherenceRating, CoherenceResult,
    ContentEngine, DocumentAnalysis, EngineConfig, EngineError, KeywordResult,
    MemoryCollectionStore, NewCitation, PaperOutline, ProviderError, ProviderKind,
    ProviderResult, SqliteCollectionStore, StorageError, ValidationError,
    OUTLINE_SECTION_TITLES,
};
use uuid::Uuid;

fn draft(title: &str) -> NewCitation {
    NewCitation::new(title, vec!["Jane Mary Doe".to_string()], 2019, "Cortex")
}

#[test]
fn engine_state_survives_restart_on_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.sqlite3");

    let (citation, outline) = {
        let store = SqliteCollectionStore::open(&path).unwrap();
        let mut engine = ContentEngine::new(store, EngineConfig::default());
        let citation = engine.add_citation(draft("Memory replay")).unwrap();
        let outline = engine.generate_outline("Memory", "Replay in sleep").unwrap();
        (citation, outline)
    };

    let store = SqliteCollectionStore::open(&path).unwrap();
    let collections = store.collection_names().unwrap();
    assert_eq!(collections, vec!["citations", "paper_outlines"]);

    let engine = ContentEngine::new(store, EngineConfig::default());
    assert_eq!(engine.list_citations(), vec![citation.clone()]);
    assert_eq!(engine.get_citation(citation.id), Some(citation));
    assert_eq!(engine.list_outlines(), vec![outline.clone()]);
    assert_eq!(engine.get_outline(outline.id), Some(outline));
}

#[test]
fn custom_collection_names_are_used() {
    let config = EngineConfig {
        citations_collection: "refs_v2".to_string(),
        outlines_collection: "plans_v2".to_string(),
        ..EngineConfig::default()
    };
    let store = std::rc::Rc::new(MemoryCollectionStore::new());
    let mut engine = ContentEngine::new(std::rc::Rc::clone(&store), config);
    engine.add_citation(draft("Named")).unwrap();
    engine.generate_outline("Topic", "").unwrap();

    assert_eq!(store.slot_names(), vec!["plans_v2", "refs_v2"]);
}

#[test]
fn delete_citation_unknown_id_is_noop() {
    let mut engine = ContentEngine::new(MemoryCollectionStore::new(), EngineConfig::default());
    engine.add_citation(draft("Stays")).unwrap();

    let before = engine.list_citations();
    assert!(!engine.delete_citation(Uuid::new_v4()).unwrap());
    assert_eq!(engine.list_citations(), before);
}

#[test]
fn citation_validation_maps_to_validation_error() {
    let mut engine = ContentEngine::new(MemoryCollectionStore::new(), EngineConfig::default());
    let err = engine.add_citation(draft(" ")).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::Citation(
            CitationValidationError::EmptyTitle
        ))
    ));
    assert!(engine.list_citations().is_empty());
}

#[test]
fn storage_error_propagates_unchanged() {
    let mut engine = ContentEngine::new(MemoryCollectionStore::with_quota(32), EngineConfig::default());

    let err = engine.add_citation(draft("Will not fit")).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Storage(StorageError::QuotaExceeded { .. })
    ));

    let err = engine.generate_outline("Topic", "Desc").unwrap_err();
    assert!(matches!(
        err,
        EngineError::Storage(StorageError::QuotaExceeded { .. })
    ));
}

#[test]
fn find_and_format_citations() {
    let mut engine = ContentEngine::new(MemoryCollectionStore::new(), EngineConfig::default());
    let citation = engine.add_citation(draft("Hippocampal Replay")).unwrap();
    engine.add_citation(draft("Cortical Oscillations")).unwrap();

    let hits = engine.find_citations(&["replay"]);
    assert_eq!(hits, vec![citation.clone()]);

    let mla = engine.format_citation(&citation, CitationStyle::Mla);
    assert!(mla.starts_with("Doe, Jane Mary"));
    let apa = engine.format_citation(&citation, CitationStyle::Apa);
    assert_eq!(apa, "Jane Mary Doe (2019). Hippocampal Replay. Cortex");
}

#[test]
fn outline_lifecycle_through_facade() {
    let mut engine = ContentEngine::new(MemoryCollectionStore::new(), EngineConfig::default());
    let outline = engine.generate_outline("Topic", "Desc").unwrap();
    let titles: Vec<&str> = outline.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, OUTLINE_SECTION_TITLES);

    let mut edited = outline.clone();
    edited.title = "Renamed".to_string();
    assert!(engine.update_outline(edited).unwrap());
    assert_eq!(engine.get_outline(outline.id).unwrap().title, "Renamed");

    assert!(engine.delete_outline(outline.id).unwrap());
    assert!(!engine.delete_outline(outline.id).unwrap());
    assert!(engine.list_outlines().is_empty());

    let err = engine.generate_outline("", "Desc").unwrap_err();
    assert!(matches!(err, EngineError::Validation(ValidationError::Outline(_))));
}

#[test]
fn keyword_limits_come_from_config() {
    let engine = ContentEngine::new(MemoryCollectionStore::new(), EngineConfig::default());
    let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo";

    assert_eq!(engine.extract_keywords(text).unwrap().len(), 8);
    let analysis = engine.analyze_document(text).unwrap();
    assert_eq!(analysis.keywords.len(), 5);
    assert_eq!(analysis.coherence, 75);
    assert_eq!(analysis.suggestions.len(), 3);

    let narrow = ContentEngine::new(
        MemoryCollectionStore::new(),
        EngineConfig {
            keyword_limit: 2,
            ..EngineConfig::default()
        },
    );
    let keywords = narrow.extract_keywords(text).unwrap();
    assert_eq!(keywords.len(), 2);
    assert_eq!(keywords[0].keyword, "alpha");
}

#[test]
fn paragraph_analysis_scores_sentences() {
    let engine = ContentEngine::new(MemoryCollectionStore::new(), EngineConfig::default());
    let result = engine.analyze_paragraph("A. B. C.").unwrap();
    assert_eq!(result.score, 65);
    assert_eq!(result.rating(), CoherenceRating::Moderate);
    assert_eq!(result.suggestions.len(), 3);
}

#[test]
fn analysis_rejects_text_below_minimum() {
    let engine = ContentEngine::new(
        MemoryCollectionStore::new(),
        EngineConfig {
            min_analysis_chars: 10,
            ..EngineConfig::default()
        },
    );

    for result in [
        engine.analyze_paragraph("Too short").map(|_| ()),
        engine.analyze_document("   ").map(|_| ()),
        engine.extract_keywords("tiny").map(|_| ()),
    ] {
        assert!(matches!(
            result,
            Err(EngineError::Validation(ValidationError::TextTooShort {
                min_chars: 10,
                ..
            }))
        ));
    }

    let default_engine = ContentEngine::new(MemoryCollectionStore::new(), EngineConfig::default());
    assert!(default_engine.analyze_paragraph("").is_err());
    assert!(default_engine.analyze_paragraph("Fine.").is_ok());
}

struct OverconfidentProvider;

impl AnalysisProvider for OverconfidentProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::RemoteModel
    }

    fn generate_outline(&self, _topic: &str, _description: &str) -> ProviderResult<PaperOutline> {
        Err(ProviderError::Unavailable("offline".to_string()))
    }

    fn analyze_text(&self, _text: &str, _keyword_limit: usize) -> ProviderResult<DocumentAnalysis> {
        Ok(DocumentAnalysis {
            suggestions: Vec::new(),
            coherence: 140,
            keywords: Vec::new(),
        })
    }

    fn analyze_paragraph(&self, _text: &str) -> ProviderResult<CoherenceResult> {
        Ok(CoherenceResult {
            score: 90,
            suggestions: vec!["Looks good.".to_string()],
        })
    }
}

#[test]
fn swapped_provider_is_used_and_checked() {
    let mut engine = ContentEngine::with_provider(
        MemoryCollectionStore::new(),
        EngineConfig::default(),
        Box::new(OverconfidentProvider),
    );
    assert_eq!(engine.provider_kind(), ProviderKind::RemoteModel);

    let paragraph = engine.analyze_paragraph("Anything.").unwrap();
    assert_eq!(paragraph.score, 90);
    assert_eq!(paragraph.rating(), CoherenceRating::Strong);

    let err = engine.analyze_document("Anything at all.").unwrap_err();
    assert!(matches!(
        err,
        EngineError::Provider(ProviderError::InvalidResponse(_))
    ));

    let err = engine.generate_outline("Topic", "Desc").unwrap_err();
    assert!(matches!(err, EngineError::Provider(ProviderError::Unavailable(_))));
    assert!(engine.list_outlines().is_empty());
}

struct FixedKeywordsProvider {
    keywords: Vec<KeywordResult>,
}

impl AnalysisProvider for FixedKeywordsProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::RemoteModel
    }

    fn generate_outline(&self, _topic: &str, _description: &str) -> ProviderResult<PaperOutline> {
        Err(ProviderError::Unavailable("offline".to_string()))
    }

    fn analyze_text(&self, _text: &str, _keyword_limit: usize) -> ProviderResult<DocumentAnalysis> {
        Ok(DocumentAnalysis {
            suggestions: Vec::new(),
            coherence: 75,
            keywords: self.keywords.clone(),
        })
    }

    fn analyze_paragraph(&self, _text: &str) -> ProviderResult<CoherenceResult> {
        Err(ProviderError::Unavailable("offline".to_string()))
    }
}

fn keyword(word: &str, relevance: u8) -> KeywordResult {
    KeywordResult {
        keyword: word.to_string(),
        relevance,
        frequency: 2,
        suggestions: Vec::new(),
    }
}

fn document_with_keywords(keywords: Vec<KeywordResult>) -> Result<DocumentAnalysis, EngineError> {
    let engine = ContentEngine::with_provider(
        MemoryCollectionStore::new(),
        EngineConfig::default(),
        Box::new(FixedKeywordsProvider { keywords }),
    );
    engine.analyze_document("Sleep helps memory.")
}

#[test]
fn provider_keywords_are_checked() {
    let analysis =
        document_with_keywords(vec![keyword("sleep", 20), keyword("memory", 20)]).unwrap();
    assert_eq!(analysis.keywords.len(), 2);

    let over_relevant = document_with_keywords(vec![keyword("sleep", 101)]).unwrap_err();
    assert!(matches!(
        over_relevant,
        EngineError::Provider(ProviderError::InvalidResponse(_))
    ));

    let duplicated =
        document_with_keywords(vec![keyword("sleep", 20), keyword("sleep", 10)]).unwrap_err();
    assert!(matches!(
        duplicated,
        EngineError::Provider(ProviderError::InvalidResponse(_))
    ));

    let limit = EngineConfig::default().document_keyword_limit;
    let too_many: Vec<KeywordResult> = (0..=limit)
        .map(|index| keyword(&format!("word{index}"), 10))
        .collect();
    assert!(matches!(
        document_with_keywords(too_many).unwrap_err(),
        EngineError::Provider(ProviderError::InvalidResponse(_))
    ));
}
