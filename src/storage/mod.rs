//! Persistence layer for mood entries

pub mod repository;

pub use repository::{InMemoryMoodRepository, MoodRepository, SqliteMoodRepository};
