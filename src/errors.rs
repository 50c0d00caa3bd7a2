//! Error types for the fixture factory.

use std::sync::Arc;

/// Result alias used throughout the crate.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Fixture-factory errors. Engine failures are carried unchanged; nothing
/// is retried or downgraded.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(
        "no context constructor configured: FactoryConfig::context needs a \
         `Fn(SharedConnection) -> C` closure"
    )]
    MissingContextConstructor,

    /// The one-shot prototype build failed. The failure is memoized, so the
    /// factory reports it on every later call as well.
    #[error("prototype build failed, factory is poisoned")]
    BuildPoisoned(#[source] Arc<FixtureError>),

    #[error("connection mutex poisoned by a panicked holder")]
    LockPoisoned,
}
