//! Integration tests for documentation resolution.
//!
//! These tests run the loader, sources and chain against the pages under
//! `testdata/docs` and against the built-in documentation pack.

use std::path::PathBuf;
use std::sync::Arc;

use shelldoc::config::{self, Config};
use shelldoc::diagnostics::{Level, RecordingSink};
use shelldoc::docs::{BundledDocSource, DocumentationChain, DocumentationSource, FnPolicy};
use shelldoc::resource::{DirectoryStore, ReadError, TextLoader};
use shelldoc::{Construct, ConstructKind, Span};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

/// A source over `testdata/docs/commands` keyed by the command text.
fn command_source() -> (BundledDocSource, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let loader = TextLoader::new(Arc::new(DirectoryStore::new(testdata_path())), sink.clone());
    let policy = FnPolicy::new(
        |e: &Construct, _: Option<&Construct>| e.is_command(),
        |e: &Construct| Some(e.text.clone()),
    );
    (
        BundledDocSource::new("commands", "docs/commands", policy, loader),
        sink,
    )
}

#[test]
fn test_existing_page_is_returned_verbatim() {
    let (source, sink) = command_source();

    let doc = source.documentation(&Construct::command("echo"), None);
    assert_eq!(doc.as_deref(), Some("<p>echo writes text</p>"));
    assert!(sink.is_empty());
}

#[test]
fn test_missing_page_is_absent_without_diagnostics() {
    let (source, sink) = command_source();

    assert_eq!(source.documentation(&Construct::command("foo"), None), None);
    assert!(sink.is_empty(), "a missing page is not a problem");
}

#[test]
fn test_undecodable_page_is_absent_and_logged() {
    let (source, sink) = command_source();

    assert_eq!(source.documentation(&Construct::command("broken"), None), None);

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::Debug);
    assert!(events[0].message.contains("broken.html"));
}

#[test]
fn test_try_load_distinguishes_absent_from_error() {
    let loader = TextLoader::new(
        Arc::new(DirectoryStore::new(testdata_path())),
        Arc::new(RecordingSink::new()),
    );

    assert!(matches!(loader.try_load("docs/commands", "foo"), Ok(None)));
    assert!(matches!(
        loader.try_load("docs/commands", "broken"),
        Err(ReadError::Decode { .. })
    ));
    assert!(matches!(loader.try_load("docs/commands", "echo"), Ok(Some(_))));
}

#[test]
fn test_prefix_through_regular_file_is_absent_without_diagnostics() {
    let sink = Arc::new(RecordingSink::new());
    let loader = TextLoader::new(Arc::new(DirectoryStore::new(testdata_path())), sink.clone());

    assert!(matches!(loader.try_load("docs/commands/echo.html", "foo"), Ok(None)));
    assert_eq!(loader.load("docs/commands/echo.html", "foo"), None);
    assert!(sink.is_empty());
}

#[test]
fn test_inapplicable_construct_is_absent() {
    let (source, _) = command_source();
    let keyword = Construct::new(ConstructKind::Keyword, "echo", Span::new(0, 4));
    assert_eq!(source.documentation(&keyword, None), None);
}

#[test]
fn test_keyword_source_in_chain() {
    let loader = TextLoader::new(
        Arc::new(DirectoryStore::new(testdata_path())),
        Arc::new(RecordingSink::new()),
    );
    let keywords = BundledDocSource::new(
        "keywords",
        "docs/keywords",
        FnPolicy::new(
            |e: &Construct, _: Option<&Construct>| e.kind == ConstructKind::Keyword,
            |e: &Construct| Some(e.text.clone()),
        ),
        loader,
    );
    let (commands, _) = command_source();
    let chain = DocumentationChain::new()
        .with_source(commands)
        .with_source(keywords);

    let while_kw = Construct::new(ConstructKind::Keyword, "while", Span::new(10, 15));
    assert_eq!(
        chain.resolve_with_source(&while_kw, None),
        Some((
            "keywords",
            "<p>while loops until the condition fails</p>".to_string()
        ))
    );
    assert_eq!(
        chain.resolve(&Construct::command("echo"), None).as_deref(),
        Some("<p>echo writes text</p>")
    );
}

#[test]
fn test_configured_chain_from_testdata() {
    let config = Config::parse_file(testdata_path().join("shelldoc.yaml")).expect("should parse config");
    config::validate(&config).expect("config should be valid");

    let sink = Arc::new(RecordingSink::new());
    let chain = config.build_chain(sink.clone());
    assert_eq!(chain.len(), 2);

    // echo is a builtin, so only the second source applies.
    assert_eq!(
        chain.resolve_with_source(&Construct::command("echo"), None),
        Some(("builtins", "<p>echo writes text</p>".to_string()))
    );

    // broken is external: the first source logs and declines, the second
    // never applies.
    assert_eq!(chain.resolve(&Construct::command("broken"), None), None);
    assert_eq!(sink.events().len(), 1);
}

#[test]
fn test_builtin_pack_resolution() {
    let chain = shelldoc::builtin_chain();

    for name in ["cd", "echo", "export", "read", "trap"] {
        let (source, text) = chain
            .resolve_with_source(&Construct::command(name), None)
            .unwrap_or_else(|| panic!("no documentation for {}", name));
        assert_eq!(source, "builtin");
        assert!(text.contains(name));
    }

    for name in ["grep", "ls", "sed"] {
        let (source, _) = chain
            .resolve_with_source(&Construct::command(name), None)
            .unwrap_or_else(|| panic!("no documentation for {}", name));
        assert_eq!(source, "external");
    }
}

#[test]
fn test_builtin_pack_matches_resource_files() {
    let on_disk = TextLoader::new(
        Arc::new(DirectoryStore::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources"))),
        Arc::new(RecordingSink::new()),
    );
    let embedded = TextLoader::new(
        Arc::new(shelldoc::EmbeddedStore::builtin()),
        Arc::new(RecordingSink::new()),
    );

    let keys = embedded.store().keys("documentation/internal");
    assert!(!keys.is_empty());
    assert_eq!(keys, on_disk.store().keys("documentation/internal"));
    for key in &keys {
        assert_eq!(
            embedded.load("documentation/internal", key),
            on_disk.load("documentation/internal", key),
            "page {} differs",
            key
        );
    }
}

#[test]
fn test_repeated_resolution_is_stable() {
    let chain = shelldoc::builtin_chain();
    let echo = Construct::command("echo");
    let first = chain.resolve(&echo, None);
    for _ in 0..5 {
        assert_eq!(chain.resolve(&echo, None), first);
    }
}
