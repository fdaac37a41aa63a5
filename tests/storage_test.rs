//! Repository behavior shared by both storage backends

mod common;

use common::{create_entry_days_ago, create_entry_with_emotions, create_test_entry};
use kokoro::models::SentimentLabel;
use kokoro::storage::{InMemoryMoodRepository, MoodRepository, SqliteMoodRepository};

fn backends() -> Vec<Box<dyn MoodRepository>> {
    vec![
        Box::new(SqliteMoodRepository::in_memory().unwrap()),
        Box::new(InMemoryMoodRepository::new()),
    ]
}

#[test]
fn append_then_history_roundtrip() {
    for repo in backends() {
        repo.append(&create_entry_days_ago("alice", 6.0, 3)).unwrap();
        repo.append(&create_entry_days_ago("alice", 7.0, 1)).unwrap();

        let history = repo.history("alice", 7).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].mood_score, 6.0);
        assert_eq!(history[1].mood_score, 7.0);
    }
}

#[test]
fn history_is_windowed_and_ascending() {
    for repo in backends() {
        repo.append(&create_entry_days_ago("alice", 2.0, 60)).unwrap();
        repo.append(&create_entry_days_ago("alice", 5.0, 5)).unwrap();
        repo.append(&create_entry_days_ago("alice", 8.0, 1)).unwrap();

        let history = repo.history("alice", 30).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].recorded_at <= history[1].recorded_at);
    }
}

#[test]
fn users_are_isolated() {
    for repo in backends() {
        repo.append(&create_test_entry("alice", 6.0)).unwrap();
        repo.append(&create_test_entry("bob", 4.0)).unwrap();

        assert_eq!(repo.history("alice", 7).unwrap().len(), 1);
        assert_eq!(repo.history("bob", 7).unwrap().len(), 1);
        assert!(repo.history("carol", 7).unwrap().is_empty());
        assert_eq!(repo.user_count().unwrap(), 2);
    }
}

#[test]
fn latest_returns_most_recent() {
    for repo in backends() {
        repo.append(&create_entry_days_ago("alice", 3.0, 10)).unwrap();
        repo.append(&create_entry_days_ago("alice", 9.0, 0)).unwrap();

        let latest = repo.latest("alice").unwrap().unwrap();
        assert_eq!(latest.mood_score, 9.0);
    }
}

#[test]
fn sentiment_and_emotions_survive_sqlite() {
    let repo = SqliteMoodRepository::in_memory().unwrap();
    let entry = create_entry_with_emotions(
        "alice",
        7.5,
        SentimentLabel::Positive,
        &[("joy", 0.8), ("calm", 0.3)],
    );
    repo.append(&entry).unwrap();

    let loaded = repo.latest("alice").unwrap().unwrap();
    assert_eq!(loaded.sentiment.label, SentimentLabel::Positive);
    assert_eq!(loaded.emotions.get("joy"), Some(&0.8));
    assert_eq!(loaded.source_text, "test entry");
}

#[test]
fn sqlite_file_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kokoro.db");

    {
        let repo = SqliteMoodRepository::new(&path).unwrap();
        repo.append(&create_test_entry("alice", 5.5)).unwrap();
    }

    let repo = SqliteMoodRepository::new(&path).unwrap();
    assert_eq!(repo.count().unwrap(), 1);
    let loaded = repo.latest("alice").unwrap().unwrap();
    assert_eq!(loaded.mood_score, 5.5);
}

#[test]
fn counts_track_appends() {
    for repo in backends() {
        assert_eq!(repo.count().unwrap(), 0);
        repo.append(&create_test_entry("alice", 5.0)).unwrap();
        repo.append(&create_test_entry("alice", 6.0)).unwrap();
        assert_eq!(repo.count().unwrap(), 2);
        assert_eq!(repo.user_count().unwrap(), 1);
    }
}
