use fleetboard::record::{FieldValue, Normalization};
use fleetboard::source::{
    source_for, CachePolicy, FileCache, FileSource, LoadOrigin, RecordCache, RecordRepository,
    RecordSource,
};
use std::time::Duration;

const PAYLOAD: &str = r#"{"data": [
    {"username": "asha", "zone": "A", "sdk_int": "30"},
    {"username": "ben", "zone": "B", "sdk_int": 29}
]}"#;

#[test]
fn test_repository_caches_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("source.json");
    let cache_path = dir.path().join("cache/records.json");
    std::fs::write(&source_path, PAYLOAD).unwrap();

    let repo = RecordRepository::new(
        FileSource::new(&source_path),
        Some(FileCache::new(&cache_path)),
        CachePolicy::never_stale(),
    );

    let (records, origin) = repo.load().unwrap();
    assert_eq!(origin, LoadOrigin::Source);
    assert_eq!(records.len(), 2);
    assert!(cache_path.exists());

    // Source disappears; the cache still serves
    std::fs::remove_file(&source_path).unwrap();
    let (records, origin) = repo.load().unwrap();
    assert_eq!(origin, LoadOrigin::Cache);
    assert_eq!(records.len(), 2);

    // Refresh needs the source
    assert!(repo.refresh().is_err());
}

#[test]
fn test_corrupt_cache_counts_as_miss() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("source.json");
    let cache_path = dir.path().join("records.json");
    std::fs::write(&source_path, PAYLOAD).unwrap();
    std::fs::write(&cache_path, "{ broken").unwrap();

    let repo = RecordRepository::new(
        FileSource::new(&source_path),
        Some(FileCache::new(&cache_path)),
        CachePolicy::with_ttl(Duration::from_secs(60)),
    );

    let (records, origin) = repo.load().unwrap();
    assert_eq!(origin, LoadOrigin::Source);
    assert_eq!(records.len(), 2);

    // The miss rewrote a valid entry
    assert!(FileCache::new(&cache_path).load().unwrap().is_some());
}

#[test]
fn test_normalization_policy() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("source.json");
    std::fs::write(&source_path, PAYLOAD).unwrap();

    let exact: RecordRepository<_, FileCache> =
        RecordRepository::new(FileSource::new(&source_path), None, CachePolicy::never_stale());
    let (records, _) = exact.load().unwrap();
    assert_eq!(records[0].get("sdk_int"), &FieldValue::from("30"));

    let normalized: RecordRepository<_, FileCache> =
        RecordRepository::new(FileSource::new(&source_path), None, CachePolicy::never_stale())
            .with_normalization(Normalization::NumericStrings);
    let (records, _) = normalized.load().unwrap();
    assert_eq!(records[0].get("sdk_int"), &FieldValue::from(30i64));
}

#[test]
fn test_source_for_picks_kind() {
    let remote = source_for("http://localhost:5000/records", Duration::from_secs(5)).unwrap();
    assert_eq!(remote.describe(), "http://localhost:5000/records");

    let local = source_for("records.json", Duration::from_secs(5)).unwrap();
    assert_eq!(local.describe(), "records.json");
}

#[test]
fn test_invalid_payload_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("source.json");
    std::fs::write(&source_path, r#"{"items": []}"#).unwrap();

    assert!(FileSource::new(&source_path).fetch().is_err());
}
