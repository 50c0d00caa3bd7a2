//! One-shot prototype build: preparation decision, migration, seeding, and
//! the single commit that turns the connection into an immutable template.

use std::path::Path;

use crate::config::{ContextRole, Hooks};
use crate::connection::{self, SharedConnection};
use crate::errors::FixtureResult;

/// Default preparation decision: prepare when the address is in-memory or
/// names a file that does not exist yet. An existing file is trusted as an
/// already-prepared snapshot and opened directly.
pub fn default_should_prepare(address: &str) -> bool {
    connection::is_memory_address(address)
        || !Path::new(connection::file_path_of(address)).exists()
}

/// Build the prototype connection. Runs at most once per factory, under the
/// factory's build-once latch.
///
/// The decision is evaluated before the connection is opened, because
/// opening a file address creates the file. On the prepare path: open, wrap
/// in a prototype-role context, migrate, then seed inside one transaction
/// and commit. Any failure propagates as-is; the half-built connection is
/// dropped by the caller.
pub(crate) fn build<C>(address: &str, hooks: &Hooks<C>) -> FixtureResult<SharedConnection> {
    let prepare = match &hooks.should_prepare {
        Some(decide) => decide(address),
        None => default_should_prepare(address),
    };

    let conn = connection::share(connection::open_connection(address)?);
    if !prepare {
        tracing::info!(address = %address, "reusing existing prototype snapshot");
        return Ok(conn);
    }

    tracing::info!(address = %address, "building prototype database");
    let context = hooks.build_context(&conn, ContextRole::Prototype)?;
    if let Some(migrate) = &hooks.migrate {
        migrate(&context)?;
    }

    // Seed inside one explicit transaction so the baseline rows land as a
    // single logical save. The guard is released between statements; the
    // hooks re-lock the connection through the context handle.
    connection::lock(&conn)?.execute_batch("BEGIN")?;
    if let Some(seed) = &hooks.seed {
        seed(&context)?;
    }
    connection::lock(&conn)?.execute_batch("COMMIT")?;
    drop(context);

    if let Some(prepared) = &hooks.on_prepared {
        prepared();
    }
    tracing::info!(address = %address, "prototype database ready");
    Ok(conn)
}
