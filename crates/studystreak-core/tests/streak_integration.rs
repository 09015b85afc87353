//! Integration tests for the streak tracker over on-disk storage.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use studystreak_core::{
    current_streak_length, Config, FixedClock, KeyValueStore, SqliteStore, StreakTracker,
    StreakWindow, StudyDayRecord, DEFAULT_STREAK_KEY,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_week_of_study_survives_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studystreak.db");
    let clock = Arc::new(FixedClock::new(date(2024, 10, 1)));

    // Each "day" opens a fresh store, as an app restart would.
    for day in 0..5 {
        let store = SqliteStore::open_at(&path).unwrap();
        let tracker = StreakTracker::new(store, clock.clone());
        let window = tracker.mark_today(Some(1.0 + day as f64)).await.unwrap();
        assert_eq!(window.current_streak(), day + 1);
        clock.advance_days(1);
    }

    let tracker = StreakTracker::new(SqliteStore::open_at(&path).unwrap(), clock.clone());
    let window = tracker.get_window().await;
    assert_eq!(window.last_date(), date(2024, 10, 6));
    assert_eq!(window.current_streak(), 0);

    let summary = tracker.summary().await;
    assert_eq!(summary.completed_days, 5);
    assert_eq!(summary.max_study_hours, 5.0);
    assert_eq!(summary.total_study_hours, 15.0);
    assert_eq!(summary.completed_this_month, 5);
}

#[tokio::test]
async fn test_persisted_json_matches_storage_contract() {
    let store = Arc::new(SqliteStore::open_memory().unwrap());
    let tracker = StreakTracker::new(store.clone(), FixedClock::new(date(2024, 10, 7)));
    tracker.mark_today(Some(2.5)).await.unwrap();

    let raw = store.get(DEFAULT_STREAK_KEY).await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let days = value.as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0], serde_json::json!({"date": "2024-10-01", "completed": false}));
    assert_eq!(
        days[6],
        serde_json::json!({"date": "2024-10-07", "completed": true, "studyHours": 2.5})
    );
}

#[tokio::test]
async fn test_reads_window_written_by_older_client() {
    // Layout written by an earlier app build: no studyHours on most days.
    let raw = r#"[
        {"date":"2024-10-01","completed":true,"studyHours":3},
        {"date":"2024-10-02","completed":false},
        {"date":"2024-10-03","completed":true,"studyHours":0},
        {"date":"2024-10-04","completed":true},
        {"date":"2024-10-05","completed":false},
        {"date":"2024-10-06","completed":true,"studyHours":2},
        {"date":"2024-10-07","completed":true,"studyHours":1}
    ]"#;
    let store = Arc::new(SqliteStore::open_memory().unwrap());
    store.set(DEFAULT_STREAK_KEY, raw).await.unwrap();

    let tracker = StreakTracker::new(store.clone(), FixedClock::new(date(2024, 10, 9)));
    let window = tracker.get_window().await;

    assert_eq!(window.first_date(), date(2024, 10, 3));
    assert_eq!(window.last_date(), date(2024, 10, 9));
    assert_eq!(
        window.get(date(2024, 10, 3)),
        Some(&StudyDayRecord {
            date: date(2024, 10, 3),
            completed: true,
            study_hours: Some(0.0),
        })
    );
    assert!(!window.get(date(2024, 10, 8)).unwrap().completed);
    assert_eq!(current_streak_length(&window), 0);

    let persisted: StreakWindow =
        serde_json::from_str(&store.get(DEFAULT_STREAK_KEY).await.unwrap().unwrap()).unwrap();
    assert_eq!(persisted, window);
}

#[tokio::test]
async fn test_same_day_reload_is_structurally_equal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studystreak.db");
    let today = date(2024, 12, 31);

    let first = {
        let tracker = StreakTracker::new(SqliteStore::open_at(&path).unwrap(), FixedClock::new(today));
        tracker.mark_today(Some(4.0)).await.unwrap()
    };

    let tracker = StreakTracker::new(SqliteStore::open_at(&path).unwrap(), FixedClock::new(today));
    let stamp_before = tracker.store().updated_at(DEFAULT_STREAK_KEY).unwrap();
    assert_eq!(tracker.get_window().await, first);
    assert_eq!(tracker.store().updated_at(DEFAULT_STREAK_KEY).unwrap(), stamp_before);
}

#[tokio::test]
async fn test_tracker_built_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let mut config = Config::load_from(&config_path).unwrap();
    config.set("storage.key", "streak_alt").unwrap();
    config.set("clock.timezone", "utc").unwrap();
    config.save_to(&config_path).unwrap();

    let config = Config::load_from(&config_path).unwrap();
    let store = SqliteStore::open_at(dir.path().join(&config.storage.database)).unwrap();
    let tracker = StreakTracker::with_key(store, config.clock(), config.storage.key.clone());

    let window = tracker.get_window().await;
    assert_eq!(window.last_date(), tracker.today());
    assert_eq!(window.first_date(), tracker.today() - Duration::days(6));
    assert!(tracker.store().get("streak_alt").await.unwrap().is_some());
}
