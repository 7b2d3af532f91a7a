//! Corpus loading from memory and from a site root on disk.

use super::common::sample_corpus;
use sifter::config::DEFAULT_CORPUS_PATHS;
use sifter::testing::sample_corpus_json;
use sifter::{search, FileSource, IndexLoader, LoadError, LoadOutcome, MemorySource, Tokenizer};

#[tokio::test]
async fn test_loads_from_site_root() {
    let site = tempfile::tempdir().unwrap();
    std::fs::write(site.path().join("search-index.json"), sample_corpus_json()).unwrap();

    let loader = IndexLoader::new(FileSource::new(site.path()), DEFAULT_CORPUS_PATHS.iter().copied());
    let corpus = loader.load_corpus().await.unwrap();

    assert_eq!(corpus.location, "/search-index.json");
    assert_eq!(corpus.index.doc_count(), sample_corpus().len());
    assert_eq!(corpus.bytes, sample_corpus_json().into_bytes());
    assert_eq!(search(&corpus.index, "wasm", 10)[0].url, "/wasm");
}

#[tokio::test]
async fn test_nested_relative_candidate() {
    let site = tempfile::tempdir().unwrap();
    std::fs::create_dir(site.path().join("docs")).unwrap();
    std::fs::write(site.path().join("docs/index.json"), sample_corpus_json()).unwrap();

    let loader = IndexLoader::new(
        FileSource::new(site.path()),
        ["/search-index.json", "./docs/index.json"],
    );
    let corpus = loader.load_corpus().await.unwrap();
    assert_eq!(corpus.location, "./docs/index.json");
}

#[tokio::test]
async fn test_missing_site_root_is_unavailable() {
    let site = tempfile::tempdir().unwrap();
    let loader = IndexLoader::new(FileSource::new(site.path()), ["/search-index.json"]);

    match loader.load().await {
        LoadOutcome::Unavailable(failures) => {
            assert_eq!(failures.len(), 1);
            assert!(matches!(failures[0], LoadError::Fetch { .. }));
        }
        LoadOutcome::Ready(_) => panic!("nothing to load"),
    }
}

#[tokio::test]
async fn test_falls_back_in_order() {
    let source = MemorySource::new()
        .with_status("/search-index.json", 404)
        .with_body("./search-index.json", "<!doctype html><p>Not here</p>")
        .with_body("../search-index.json", sample_corpus_json());

    let loader = IndexLoader::new(source, DEFAULT_CORPUS_PATHS.iter().copied());
    let corpus = loader.load_corpus().await.unwrap();
    assert_eq!(corpus.location, "../search-index.json");
    assert_eq!(corpus.index.doc_count(), 4);
}

#[tokio::test]
async fn test_first_working_candidate_wins() {
    let source = MemorySource::new()
        .with_body("/a.json", r#"[{"title": "A", "content": "alpha", "url": "/a"}]"#)
        .with_body("/b.json", sample_corpus_json());

    let loader = IndexLoader::new(source, ["/a.json", "/b.json"]);
    let corpus = loader.load_corpus().await.unwrap();
    assert_eq!(corpus.location, "/a.json");
    assert_eq!(corpus.index.doc_count(), 1);
}

#[tokio::test]
async fn test_every_candidate_failing_reports_each() {
    let source = MemorySource::new()
        .with_status("/search-index.json", 500)
        .with_body("./search-index.json", "{not json");

    let loader = IndexLoader::new(source, DEFAULT_CORPUS_PATHS.iter().copied());
    let failures = loader.load_corpus().await.unwrap_err();

    let locations: Vec<&str> = failures.iter().map(LoadError::location).collect();
    assert_eq!(locations, DEFAULT_CORPUS_PATHS);
    assert!(matches!(failures[0], LoadError::Status { status: 500, .. }));
    assert!(matches!(failures[1], LoadError::Parse { .. }));
    assert!(matches!(failures[2], LoadError::Fetch { .. }));
}

#[tokio::test]
async fn test_object_payload_is_not_a_corpus() {
    let source = MemorySource::new().with_body("/index.json", r#"{"documents": []}"#);
    let loader = IndexLoader::new(source, ["/index.json"]);

    let failures = loader.load_corpus().await.unwrap_err();
    assert!(matches!(failures[0], LoadError::NotAnArray { .. }));
}

#[tokio::test]
async fn test_malformed_entries_skipped() {
    let body = r#"[
        {"title": "Kept", "content": "useful text", "url": "/kept", "description": "ignored"},
        {"content": "no title or url"},
        42,
        {"title": "Also Kept", "content": "more text", "url": "/also", "headings": null}
    ]"#;
    let source = MemorySource::new().with_body("/index.json", body);
    let loader = IndexLoader::new(source, ["/index.json"]);

    let corpus = loader.load_corpus().await.unwrap();
    let stats = corpus.index.stats();
    assert_eq!(stats.documents, 2);
    assert_eq!(stats.skipped, 2);
    assert_eq!(corpus.index.docs()[1].url, "/also");
    assert_eq!(corpus.index.docs()[1].id.get(), 1);
}

#[tokio::test]
async fn test_empty_array_is_ready() {
    let source = MemorySource::new().with_body("/index.json", "[]");
    let loader = IndexLoader::new(source, ["/index.json"]);

    let outcome = loader.load().await;
    assert!(outcome.is_ready());
    let index = outcome.index().unwrap();
    assert_eq!(index.doc_count(), 0);
    assert!(search(index, "anything", 10).is_empty());
}

#[tokio::test]
async fn test_custom_tokenizer_applies() {
    let body = r#"[{"title": "Go", "content": "go to it", "url": "/go"}]"#;
    let source = MemorySource::new().with_body("/index.json", body);
    let loader =
        IndexLoader::new(source, ["/index.json"]).with_tokenizer(Tokenizer::new(3));

    let corpus = loader.load_corpus().await.unwrap();
    assert_eq!(corpus.index.term_count(), 0);
    assert!(search(&corpus.index, "go", 10).is_empty());
}
