//! Tests for the cookie stores and the takeover handoff.

use super::*;
use tempfile::TempDir;

#[test]
fn test_memory_cookie_round_trip() {
    let mut store = MemoryCookieStore::new();

    store.set("blogpostunlock", "v", Duration::from_millis(1000)).unwrap();
    assert_eq!(store.get("blogpostunlock").as_deref(), Some("v"));

    store.del("blogpostunlock").unwrap();
    assert_eq!(store.get("blogpostunlock"), None);
}

#[test]
fn test_zero_ttl_deletes() {
    let mut store = MemoryCookieStore::new();
    store.set("flag", "1", Duration::from_secs(60)).unwrap();

    store.set("flag", "1", Duration::ZERO).unwrap();

    assert_eq!(store.get("flag"), None);
}

#[test]
fn test_expired_cookie_reads_as_missing() {
    let mut store = MemoryCookieStore::new();
    store.set("flag", "1", Duration::from_millis(1)).unwrap();

    std::thread::sleep(Duration::from_millis(20));

    assert_eq!(store.get("flag"), None);
}

#[test]
fn test_del_missing_cookie_is_ok() {
    let mut store = MemoryCookieStore::new();
    assert!(store.del("never-set").is_ok());
}

#[test]
fn test_file_jar_persists_across_opens() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".formlock").join("cookies.json");

    let mut jar = FileCookieJar::open(&path).unwrap();
    jar.set("blogpostunlock", "1", Duration::from_secs(60)).unwrap();

    let reopened = FileCookieJar::open(&path).unwrap();
    assert_eq!(reopened.get("blogpostunlock").as_deref(), Some("1"));
}

#[test]
fn test_file_jar_del_persists() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cookies.json");

    let mut jar = FileCookieJar::open(&path).unwrap();
    jar.set("a", "1", Duration::from_secs(60)).unwrap();
    jar.del("a").unwrap();

    let reopened = FileCookieJar::open(&path).unwrap();
    assert_eq!(reopened.get("a"), None);
}

#[test]
fn test_file_jar_handles_share_one_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cookies.json");

    let mut session = FileCookieJar::open(&path).unwrap();
    let mut listing = FileCookieJar::open(&path).unwrap();

    listing
        .set("blogcommentunlock", "1", Duration::from_secs(60))
        .unwrap();
    assert_eq!(session.get("blogcommentunlock").as_deref(), Some("1"));

    session
        .set("blogpostunlock", "1", Duration::from_secs(60))
        .unwrap();
    session.del("blogpostunlock").unwrap();

    let reopened = FileCookieJar::open(&path).unwrap();
    assert_eq!(reopened.get("blogcommentunlock").as_deref(), Some("1"));
    assert_eq!(reopened.get("blogpostunlock"), None);
}

#[test]
fn test_file_jar_missing_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let jar = FileCookieJar::open(temp_dir.path().join("nope.json")).unwrap();
    assert_eq!(jar.get("anything"), None);
}

#[test]
fn test_file_jar_rejects_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cookies.json");
    std::fs::write(&path, "not json").unwrap();

    let err = FileCookieJar::open(&path).unwrap_err();
    assert!(err.to_string().contains("failed to parse cookie jar"));
}

#[test]
fn test_takeover_cookie_name() {
    let intent = TakeoverIntent::for_model(&ModelKey::new("blog", "post"));
    assert_eq!(intent.cookie_name(), "blogpostunlock");
}

#[test]
fn test_takeover_intent_is_consumed_once() {
    let mut store = MemoryCookieStore::new();
    let intent = TakeoverIntent::for_model(&ModelKey::new("blog", "post"));

    intent.record(&mut store).unwrap();
    assert_eq!(store.get("blogpostunlock").as_deref(), Some("1"));

    assert!(intent.consume(&mut store).unwrap());
    assert_eq!(store.get("blogpostunlock"), None);
    assert!(!intent.consume(&mut store).unwrap());
}

#[test]
fn test_unexpected_intent_value_is_still_deleted() {
    let mut store = MemoryCookieStore::new();
    let intent = TakeoverIntent::for_model(&ModelKey::new("blog", "post"));
    store.set("blogpostunlock", "0", Duration::from_secs(60)).unwrap();

    assert!(!intent.consume(&mut store).unwrap());
    assert_eq!(store.get("blogpostunlock"), None);
}

#[test]
fn test_intent_is_scoped_per_model() {
    let mut store = MemoryCookieStore::new();
    TakeoverIntent::for_model(&ModelKey::new("blog", "post"))
        .record(&mut store)
        .unwrap();

    let other = TakeoverIntent::for_model(&ModelKey::new("blog", "comment"));
    assert!(!other.consume(&mut store).unwrap());
    assert_eq!(store.get("blogpostunlock").as_deref(), Some("1"));
}
