use rusqlite::Connection;
use tracing::info;

use crate::Result;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          TEXT PRIMARY KEY,
                email       TEXT NOT NULL UNIQUE,
                password    TEXT NOT NULL,
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE TABLE profiles (
                id          TEXT PRIMARY KEY REFERENCES users(id),
                username    TEXT,
                role        TEXT NOT NULL CHECK (role IN ('founder', 'seeker')),
                avatar_url  TEXT,
                email       TEXT NOT NULL
            );

            CREATE TABLE items (
                id                TEXT PRIMARY KEY,
                title             TEXT NOT NULL,
                category          TEXT,
                description       TEXT,
                image_url         TEXT,
                founder_id        TEXT NOT NULL REFERENCES profiles(id),
                questions         TEXT,
                status            TEXT NOT NULL DEFAULT 'found' CHECK (status IN ('found', 'claimed')),
                winning_claim_id  TEXT,
                created_at        TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE INDEX idx_items_founder ON items(founder_id, created_at);
            CREATE INDEX idx_items_status ON items(status, created_at);

            CREATE TABLE claims (
                id          TEXT PRIMARY KEY,
                item_id     TEXT NOT NULL REFERENCES items(id),
                seeker_id   TEXT NOT NULL REFERENCES profiles(id),
                answers     TEXT NOT NULL,
                is_winner   INTEGER NOT NULL DEFAULT 0,
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
                UNIQUE(item_id, seeker_id)
            );

            CREATE INDEX idx_claims_seeker ON claims(seeker_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
