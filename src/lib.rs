//! # sqlite-fixture
//!
//! Test-fixture accelerator for SQLite-backed tests. A lazily initialized
//! prototype database is migrated and seeded once per factory; every test
//! then receives an independent clone of it through SQLite's online backup
//! API instead of re-running the setup.
//!
//! ```no_run
//! use sqlite_fixture::{FactoryConfig, SharedConnection};
//!
//! struct AppContext {
//!     conn: SharedConnection,
//! }
//!
//! let factory = FactoryConfig::new()
//!     .context(|conn| AppContext { conn })
//!     .migrate(|_ctx| { /* apply schema */ Ok(()) })
//!     .seed(|_ctx| { /* insert baseline rows */ Ok(()) })
//!     .build()?;
//!
//! let ctx = factory.create_context()?; // isolated, pre-seeded
//! # Ok::<(), sqlite_fixture::FixtureError>(())
//! ```

pub mod cloning;
pub mod config;
pub mod connection;
pub mod errors;
pub mod factory;
pub mod prototype;
pub mod snapshot;

pub use config::{ContextOptions, ContextRole, FactoryConfig, DEFAULT_ADDRESS};
pub use connection::{open_connection, SharedConnection};
pub use errors::{FixtureError, FixtureResult};
pub use factory::TestDbFactory;
pub use prototype::default_should_prepare;
pub use snapshot::locate_snapshot;
