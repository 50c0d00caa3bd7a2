//! The context factory: build-once prototype latch plus per-request cloning
//! and handle construction.

use std::sync::{Arc, OnceLock};

use crate::cloning;
use crate::config::{ContextRole, Hooks};
use crate::connection::{self, SharedConnection};
use crate::errors::{FixtureError, FixtureResult};
use crate::prototype;

/// Hands out fully migrated, seeded, mutually isolated database instances.
///
/// The prototype is built lazily on the first request and memoized for the
/// factory's lifetime; every request after that pays only the backup-speed
/// clone cost. Shareable across threads: concurrent first callers block
/// while one of them runs the build, and later reads of the latch are
/// lock-free. Dropping the factory closes the prototype connection; issued
/// instance connections stay with their callers.
pub struct TestDbFactory<C> {
    prototype_address: String,
    instance_address: String,
    hooks: Hooks<C>,
    /// Build-once latch. Memoizes the build outcome, failure included: a
    /// failed build permanently poisons the factory.
    prototype: OnceLock<Result<SharedConnection, Arc<FixtureError>>>,
}

impl<C> TestDbFactory<C> {
    pub(crate) fn from_parts(
        prototype_address: String,
        instance_address: String,
        hooks: Hooks<C>,
    ) -> Self {
        Self {
            prototype_address,
            instance_address,
            hooks,
            prototype: OnceLock::new(),
        }
    }

    /// Address of the prototype database.
    pub fn prototype_address(&self) -> &str {
        &self.prototype_address
    }

    /// Address template for cloned instance connections.
    pub fn instance_address(&self) -> &str {
        &self.instance_address
    }

    /// The prototype connection, building it on first use. No clone ever
    /// observes a partially built prototype: callers arriving during the
    /// build block on the latch until it completes.
    fn prototype(&self) -> FixtureResult<&SharedConnection> {
        let outcome = self.prototype.get_or_init(|| {
            prototype::build(&self.prototype_address, &self.hooks).map_err(Arc::new)
        });
        match outcome {
            Ok(conn) => Ok(conn),
            Err(cause) => Err(FixtureError::BuildPoisoned(Arc::clone(cause))),
        }
    }

    /// Clone the prototype into a fresh, independent instance connection.
    /// First call triggers the prototype build; every call performs exactly
    /// one backup-speed copy. The caller owns the returned connection.
    pub fn create_connection(&self) -> FixtureResult<SharedConnection> {
        let prototype = self.prototype()?;
        let instance = {
            let guard = connection::lock(prototype)?;
            cloning::clone_into(&guard, &self.instance_address)?
        };
        tracing::debug!(address = %self.instance_address, "cloned instance connection");
        Ok(connection::share(instance))
    }

    /// [`create_connection`](Self::create_connection) plus wrapping the
    /// clone in a mapped-access handle.
    pub fn create_context(&self) -> FixtureResult<C> {
        let conn = self.create_connection()?;
        self.hooks.build_context(&conn, ContextRole::Instance)
    }

    /// Wrap a connection the caller already holds in a new handle, without
    /// cloning or building anything. The handle's connection is the same
    /// `Arc` as the one supplied, so a second view can assert state written
    /// through the first.
    pub fn wrap_connection(&self, conn: &SharedConnection) -> FixtureResult<C> {
        self.hooks.build_context(conn, ContextRole::Instance)
    }
}
