use crate::achievements::AchievementDeduplicator;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stateless engine value; one per process, no interior mutability.
    pub deduplicator: AchievementDeduplicator,
}
