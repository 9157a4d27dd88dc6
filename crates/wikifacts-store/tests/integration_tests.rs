//! Integration tests for wikifacts-store
//!
//! These tests run the same put/get/find/list cycle against both stores.

use wikifacts_domain::traits::ArticleStore;
use wikifacts_domain::{ArticleRecord, Fact, Keyword};
use wikifacts_store::{JsonDirStore, SqliteStore, StoreError, StoredArticle};

fn record(title: &str, source_id: u64) -> ArticleRecord {
    ArticleRecord {
        text: format!("{} is a city. {} has a river.", title, title),
        title: title.to_string(),
        facts: vec![
            Fact::new(format!("{} is a city.", title)),
            Fact::new(format!("{} has a river.", title)),
        ],
        keywords: vec![
            Keyword::new(title.to_lowercase(), 0.04),
            Keyword::new("river", 0.31),
        ],
        source_id,
    }
}

fn exercise_round_trip<S: ArticleStore<Error = StoreError>>(store: &mut S) {
    let paris = record("Paris", 22989);
    store.put_article(paris.clone()).unwrap();

    let retrieved = store.get_article("Paris").unwrap();
    assert_eq!(retrieved, Some(paris));
    assert!(store.get_article("paris").unwrap().is_none(), "get is exact");
}

fn exercise_duplicates<S: ArticleStore<Error = StoreError>>(store: &mut S) {
    store.put_article(record("Rome", 1)).unwrap();

    let result = store.put_article(record("Rome", 2));
    assert!(matches!(result, Err(StoreError::Duplicate(ref t)) if t == "Rome"));

    // The first write is untouched
    assert_eq!(store.get_article("Rome").unwrap().unwrap().source_id, 1);
}

fn exercise_find_and_list<S: ArticleStore<Error = StoreError>>(store: &mut S) {
    store.put_article(record("New York City", 1)).unwrap();
    store.put_article(record("York", 2)).unwrap();
    store.put_article(record("Berlin", 3)).unwrap();

    assert_eq!(
        store.find_article("york").unwrap().unwrap().title,
        "New York City",
        "first match in insertion order"
    );
    assert_eq!(store.find_article("BERL").unwrap().unwrap().title, "Berlin");
    assert!(store.find_article("Madrid").unwrap().is_none());

    assert_eq!(
        store.list_titles().unwrap(),
        vec!["New York City", "York", "Berlin"]
    );
}

fn exercise_empty_record<S: ArticleStore<Error = StoreError>>(store: &mut S) {
    let empty = ArticleRecord {
        text: String::new(),
        title: "Blank".to_string(),
        facts: Vec::new(),
        keywords: Vec::new(),
        source_id: 9,
    };
    store.put_article(empty.clone()).unwrap();
    assert_eq!(store.get_article("Blank").unwrap(), Some(empty));
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
    assert_eq!(store.unwrap().count().unwrap(), 0);
}

#[test]
fn test_sqlite_round_trip() {
    exercise_round_trip(&mut SqliteStore::new(":memory:").unwrap());
}

#[test]
fn test_sqlite_duplicate_detection() {
    exercise_duplicates(&mut SqliteStore::new(":memory:").unwrap());
}

#[test]
fn test_sqlite_find_and_list() {
    exercise_find_and_list(&mut SqliteStore::new(":memory:").unwrap());
}

#[test]
fn test_sqlite_empty_record() {
    exercise_empty_record(&mut SqliteStore::new(":memory:").unwrap());
}

#[test]
fn test_sqlite_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wikifacts.db");

    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.put_article(record("Paris", 1)).unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    assert_eq!(store.count().unwrap(), 1);
    assert!(store.get_article("Paris").unwrap().is_some());
}

#[test]
fn test_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    exercise_round_trip(&mut JsonDirStore::open(dir.path()).unwrap());
}

#[test]
fn test_json_duplicate_detection() {
    let dir = tempfile::tempdir().unwrap();
    exercise_duplicates(&mut JsonDirStore::open(dir.path()).unwrap());
}

#[test]
fn test_json_find_and_list() {
    let dir = tempfile::tempdir().unwrap();
    exercise_find_and_list(&mut JsonDirStore::open(dir.path()).unwrap());
}

#[test]
fn test_json_empty_record() {
    let dir = tempfile::tempdir().unwrap();
    exercise_empty_record(&mut JsonDirStore::open(dir.path()).unwrap());
}

#[test]
fn test_json_file_shape_and_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = JsonDirStore::open(dir.path()).unwrap();
        store.put_article(record("AC/DC", 42)).unwrap();
    }

    let written = std::fs::read_to_string(dir.path().join("AC_DC.json")).unwrap();
    let stored: StoredArticle = serde_json::from_str(&written).unwrap();
    assert_eq!(stored.title, "AC/DC");
    assert_eq!(stored.keywords[0], ("ac/dc".to_string(), 0.04));

    let store = JsonDirStore::open(dir.path()).unwrap();
    assert_eq!(store.list_titles().unwrap(), vec!["AC/DC"]);
    assert_eq!(store.get_article("AC/DC").unwrap().unwrap().source_id, 42);
}

#[test]
fn test_json_sanitised_name_collision_keeps_both() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = JsonDirStore::open(dir.path()).unwrap();
        store.put_article(record("AC/DC", 1)).unwrap();
        store.put_article(record("AC_DC", 2)).unwrap();
        assert!(matches!(
            store.put_article(record("AC_DC", 3)),
            Err(StoreError::Duplicate(_))
        ));
    }

    let first: StoredArticle =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("AC_DC.json")).unwrap())
            .unwrap();
    assert_eq!(first.title, "AC/DC");

    let store = JsonDirStore::open(dir.path()).unwrap();
    assert_eq!(store.list_titles().unwrap(), vec!["AC/DC", "AC_DC"]);
    assert_eq!(store.get_article("AC/DC").unwrap().unwrap().source_id, 1);
    assert_eq!(store.get_article("AC_DC").unwrap().unwrap().source_id, 2);
}
