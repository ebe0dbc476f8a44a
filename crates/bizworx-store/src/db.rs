use rusqlite::Connection;

use crate::error::Result;

/// Initialise the store schema in `conn`.
///
/// Safe to call on every startup — uses `IF NOT EXISTS` throughout. The
/// `(business_id, scheduled_start)` index keeps the per-day queries cheap
/// even with years of job history.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS businesses (
            id          TEXT NOT NULL PRIMARY KEY,
            name        TEXT NOT NULL,
            created_at  TEXT NOT NULL
        ) STRICT;

        CREATE TABLE IF NOT EXISTS jobs (
            id              TEXT NOT NULL PRIMARY KEY,
            business_id     TEXT NOT NULL REFERENCES businesses(id),
            title           TEXT NOT NULL,
            status          TEXT NOT NULL DEFAULT 'scheduled',
            scheduled_start TEXT NOT NULL,   -- RFC 3339 UTC
            scheduled_end   TEXT NOT NULL,   -- RFC 3339 UTC
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL
        ) STRICT;

        CREATE INDEX IF NOT EXISTS idx_jobs_business_start
            ON jobs (business_id, scheduled_start);
        ",
    )?;
    Ok(())
}
