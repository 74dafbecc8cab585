//! LinkService tests
//!
//! Service-level behaviour across the store, the journal and the
//! confirmation gate: reload from disk, failed journal writes, and
//! concurrent readers and writers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

use relinker::errors::{RelinkerError, Result};
use relinker::services::{
    CreateOutcome, CreateRequest, ExpiryParams, LinkService, ManualClock, RandomTokenGenerator,
};
use relinker::storage::{FileJournal, Journal, LinkStore, NullJournal, Record};

// =============================================================================
// Test Setup
// =============================================================================

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn confirmed(code: &str, url: &str) -> CreateRequest {
    CreateRequest {
        code: code.to_string(),
        url: url.to_string(),
        query_token: Some("t".to_string()),
        cookie_token: Some("t".to_string()),
        ..Default::default()
    }
}

fn service_with(journal: Arc<dyn Journal>, clock: Arc<ManualClock>) -> LinkService {
    let store = LinkStore::restore(journal.as_ref()).unwrap();
    LinkService::new(
        Arc::new(store),
        journal,
        clock,
        Arc::new(RandomTokenGenerator),
    )
}

fn expect_created(outcome: CreateOutcome) -> Record {
    match outcome {
        CreateOutcome::Created(record) => record,
        other => panic!("expected Created, got {:?}", other),
    }
}

/// Journal whose writes can be switched off.
#[derive(Default)]
struct FlakyJournal {
    failing: AtomicBool,
}

impl Journal for FlakyJournal {
    fn append(&self, _record: &Record) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RelinkerError::file_operation("disk full"))
        } else {
            Ok(())
        }
    }

    fn load(&self) -> Result<Vec<Record>> {
        Ok(Vec::new())
    }

    fn backend_name(&self) -> &'static str {
        "flaky"
    }
}

// =============================================================================
// Journal reload
// =============================================================================

#[test]
fn test_reload_reproduces_histories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("links.jsonl");
    let clock = Arc::new(ManualClock::new(t0()));

    let before_reload = {
        let journal: Arc<dyn Journal> = Arc::new(FileJournal::open(&path).unwrap());
        let service = service_with(journal, clock.clone());

        expect_created(service.create(confirmed("a", "https://a1.example.com")).unwrap());
        clock.advance(Duration::minutes(5));
        expect_created(service.create(confirmed("b", "https://b.example.com")).unwrap());
        clock.advance(Duration::minutes(5));
        let mut day = confirmed("a", "https://a2.example.com");
        day.expiry = ExpiryParams {
            day: true,
            ..Default::default()
        };
        expect_created(service.create(day).unwrap());

        (service.history("a").unwrap(), service.history("b").unwrap())
    };

    let journal: Arc<dyn Journal> = Arc::new(FileJournal::open(&path).unwrap());
    let reloaded = service_with(journal, clock.clone());

    assert_eq!(reloaded.history("a").unwrap(), before_reload.0);
    assert_eq!(reloaded.history("b").unwrap(), before_reload.1);
    assert_eq!(reloaded.history("a").unwrap().len(), 2);
    assert_eq!(reloaded.resolve("a").as_deref(), Some("https://a2.example.com"));

    // 过期判断在重载后依然基于原始时间戳
    clock.advance(Duration::days(1));
    assert_eq!(reloaded.resolve("a"), None);
    assert_eq!(reloaded.resolve("b").as_deref(), Some("https://b.example.com"));
}

#[test]
fn test_malformed_journal_line_fails_restore() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("links.jsonl");
    std::fs::write(&path, "{\"code\":\"a\"\n").unwrap();

    let journal = FileJournal::open(&path).unwrap();
    let err = LinkStore::restore(&journal).unwrap_err();
    assert!(matches!(err, RelinkerError::Serialization(_)));
    assert!(err.message().contains(":1:"));
}

#[test]
fn test_torn_journal_tail_is_dropped_on_restore() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("links.jsonl");
    let clock = Arc::new(ManualClock::new(t0()));

    {
        let journal: Arc<dyn Journal> = Arc::new(FileJournal::open(&path).unwrap());
        let service = service_with(journal, clock.clone());
        expect_created(service.create(confirmed("a", "https://a1.example.com")).unwrap());
    }

    // 模拟写入中途崩溃留下的半行
    let mut content = std::fs::read_to_string(&path).unwrap();
    content.push_str("{\"code\":\"a\",\"url\":\"https://a2.ex");
    std::fs::write(&path, content).unwrap();

    let journal: Arc<dyn Journal> = Arc::new(FileJournal::open(&path).unwrap());
    let service = service_with(journal, clock.clone());
    assert_eq!(service.history("a").unwrap().len(), 1);

    clock.advance(Duration::minutes(1));
    expect_created(service.create(confirmed("a", "https://a3.example.com")).unwrap());

    let journal: Arc<dyn Journal> = Arc::new(FileJournal::open(&path).unwrap());
    let reloaded = service_with(journal, clock);
    let urls: Vec<_> = reloaded
        .history("a")
        .unwrap()
        .into_iter()
        .map(|record| record.url)
        .collect();
    assert_eq!(urls, vec!["https://a1.example.com", "https://a3.example.com"]);
}

#[test]
fn test_challenged_create_writes_nothing_to_journal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("links.jsonl");
    let journal: Arc<dyn Journal> = Arc::new(FileJournal::open(&path).unwrap());
    let service = service_with(journal.clone(), Arc::new(ManualClock::new(t0())));

    let mut request = confirmed("a", "https://a.example.com");
    request.cookie_token = None;
    let outcome = service.create(request).unwrap();
    assert!(matches!(outcome, CreateOutcome::NeedsConfirmation(_)));

    assert!(journal.load().unwrap().is_empty());
}

// =============================================================================
// Journal failure
// =============================================================================

#[test]
fn test_failed_journal_write_leaves_store_unchanged() {
    let journal = Arc::new(FlakyJournal::default());
    let service = service_with(journal.clone(), Arc::new(ManualClock::new(t0())));

    expect_created(service.create(confirmed("a", "https://a1.example.com")).unwrap());

    journal.failing.store(true, Ordering::SeqCst);
    let err = service
        .create(confirmed("a", "https://a2.example.com"))
        .unwrap_err();
    assert!(matches!(err, RelinkerError::FileOperation(_)));

    assert_eq!(service.history("a").unwrap().len(), 1);
    assert_eq!(service.resolve("a").as_deref(), Some("https://a1.example.com"));

    journal.failing.store(false, Ordering::SeqCst);
    expect_created(service.create(confirmed("a", "https://a3.example.com")).unwrap());
    assert_eq!(service.history("a").unwrap().len(), 2);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_writers_and_readers() {
    const WRITERS: usize = 8;
    const PER_WRITER: usize = 25;

    let service = Arc::new(LinkService::new(
        Arc::new(LinkStore::default()),
        Arc::new(NullJournal),
        Arc::new(ManualClock::new(t0())),
        Arc::new(RandomTokenGenerator),
    ));

    let mut handles = Vec::new();
    for w in 0..WRITERS {
        let service = Arc::clone(&service);
        handles.push(thread::spawn(move || {
            for i in 0..PER_WRITER {
                let url = format!("https://w{}.example.com/{}", w, i);
                expect_created(service.create(confirmed("shared", &url)).unwrap());
            }
        }));
    }
    for _ in 0..4 {
        let service = Arc::clone(&service);
        handles.push(thread::spawn(move || {
            for _ in 0..PER_WRITER {
                // 读者只能看到完整写入的版本
                if let Some(url) = service.resolve("shared") {
                    assert!(url.starts_with("https://w"));
                }
                let _ = service.list_current();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let history = service.history("shared").unwrap();
    assert_eq!(history.len(), WRITERS * PER_WRITER);
    assert!(
        history
            .windows(2)
            .all(|pair| pair[0].created_at <= pair[1].created_at)
    );
    assert_eq!(
        service.resolve("shared").as_deref(),
        Some(history.last().unwrap().url.as_str())
    );
}
