//! Page-level cloning of the prototype into a fresh instance connection,
//! via SQLite's online backup API. Copying pages is what makes a clone
//! cheap relative to replaying migration and seed logic.

use std::time::Duration;

use rusqlite::backup::Backup;
use rusqlite::Connection;

use crate::connection::open_connection;
use crate::errors::FixtureResult;

/// Pages copied per backup step.
const PAGES_PER_STEP: std::os::raw::c_int = 100;

/// Pause between steps when the source reports busy.
const STEP_PAUSE: Duration = Duration::from_millis(10);

/// Open a new connection at `instance_address` and copy the prototype's
/// entire page content into it. The returned connection is open, fully
/// populated, and completely independent: writes on either side are never
/// visible on the other.
pub fn clone_into(prototype: &Connection, instance_address: &str) -> FixtureResult<Connection> {
    let mut instance = open_connection(instance_address)?;
    {
        let backup = Backup::new(prototype, &mut instance)?;
        backup.run_to_completion(PAGES_PER_STEP, STEP_PAUSE, None)?;
    }
    Ok(instance)
}
