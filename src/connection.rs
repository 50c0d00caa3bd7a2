//! Connection provider: open a live connection from a database address.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::errors::{FixtureError, FixtureResult};

/// A connection shared between the factory and the context handles built on
/// top of it. Dropping a handle never closes the connection; the last owner
/// does.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Open a connection at the given address. The address uses rusqlite's
/// native syntax: a filesystem path, `:memory:`, or a `file:` URI (the
/// default open flags include `SQLITE_OPEN_URI`). The connection is ready
/// for use on return; engine errors propagate unchanged.
pub fn open_connection(address: &str) -> FixtureResult<Connection> {
    Ok(Connection::open(address)?)
}

/// Wrap a freshly opened connection for sharing.
pub fn share(conn: Connection) -> SharedConnection {
    Arc::new(Mutex::new(conn))
}

/// Lock a shared connection, mapping mutex poisoning to a fixture error.
pub(crate) fn lock(conn: &SharedConnection) -> FixtureResult<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|_| FixtureError::LockPoisoned)
}

/// True when the address names a transient in-memory database rather than
/// a file on disk.
pub fn is_memory_address(address: &str) -> bool {
    address.eq_ignore_ascii_case(":memory:") || address.contains("mode=memory")
}

/// The filesystem path portion of an address: strips a `file:` scheme and
/// any URI query string.
pub(crate) fn file_path_of(address: &str) -> &str {
    let trimmed = address.strip_prefix("file:").unwrap_or(address);
    trimmed.split('?').next().unwrap_or(trimmed)
}
