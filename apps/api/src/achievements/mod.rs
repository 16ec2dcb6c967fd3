// Semantic Achievement Deduplication
// Implements: normalization, metric extraction, similarity scoring, clustering, canonical selection.
// Pure and synchronous; handlers run it inside tokio::task::spawn_blocking.

pub mod canonical;
pub mod cluster;
pub mod engine;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod similarity;

pub use engine::AchievementDeduplicator;
