//! Transcript log: every chat bubble appended to a local SQLite file.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use sqlite::State;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

use crate::chat::ChatTurn;

// ---------------------------------------------------------------------------
// Shared database handle
// ---------------------------------------------------------------------------

pub type SharedDb = Arc<Mutex<sqlite::Connection>>;

/// Open (or create) the transcript database and ensure the schema exists.
pub fn open_db(path: &str) -> Result<SharedDb> {
    let conn = sqlite::open(path)?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS turns (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            session    TEXT    NOT NULL,
            role       TEXT    NOT NULL,
            category   TEXT    NOT NULL DEFAULT '',
            source     TEXT    NOT NULL DEFAULT '',
            text       TEXT    NOT NULL,
            created_at INTEGER NOT NULL
         );
         CREATE INDEX IF NOT EXISTS turns_created_at ON turns (created_at);",
    )?;
    info!("Transcript DB opened at {path}");
    Ok(Arc::new(Mutex::new(conn)))
}

fn lock(db: &SharedDb) -> Result<MutexGuard<'_, sqlite::Connection>> {
    db.lock().map_err(|_| anyhow!("transcript DB lock poisoned"))
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One persisted bubble, as written to JSONL dumps.  Empty `category` /
/// `source` mean "not set".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTurn {
    pub session: String,
    pub role: String,
    pub category: String,
    pub source: String,
    pub text: String,
    pub created_at: i64,
}

pub fn save_turn(db: &SharedDb, session: &str, turn: &ChatTurn) -> Result<()> {
    let db = lock(db)?;
    let mut stmt = db.prepare(
        "INSERT INTO turns (session, role, category, source, text, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )?;
    stmt.bind((1, session))?;
    stmt.bind((2, turn.role.as_str()))?;
    stmt.bind((3, turn.category.map_or("", |c| c.variant_name())))?;
    stmt.bind((4, turn.source.map_or("", |s| s.as_str())))?;
    stmt.bind((5, turn.text.as_str()))?;
    stmt.bind((6, turn.timestamp))?;
    stmt.next()?;
    Ok(())
}

/// All turns written at or after `since_ts` (unix seconds), oldest first.
pub fn turns_since(db: &SharedDb, since_ts: i64) -> Result<Vec<StoredTurn>> {
    let db = lock(db)?;
    let mut stmt = db.prepare(
        "SELECT session, role, category, source, text, created_at
         FROM turns WHERE created_at >= ? ORDER BY created_at, id",
    )?;
    stmt.bind((1, since_ts))?;
    let mut rows = Vec::new();
    while let State::Row = stmt.next()? {
        rows.push(StoredTurn {
            session: stmt.read::<String, _>(0)?,
            role: stmt.read::<String, _>(1)?,
            category: stmt.read::<String, _>(2)?,
            source: stmt.read::<String, _>(3)?,
            text: stmt.read::<String, _>(4)?,
            created_at: stmt.read::<i64, _>(5)?,
        });
    }
    Ok(rows)
}

pub fn count_turns(db: &SharedDb) -> Result<i64> {
    let db = lock(db)?;
    let mut stmt = db.prepare("SELECT COUNT(*) FROM turns")?;
    match stmt.next()? {
        State::Row => Ok(stmt.read::<i64, _>(0)?),
        State::Done => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatSession, Role};
    use crate::dispatch::Category;

    #[test]
    fn saves_and_reads_back_turns() {
        let db = open_db(":memory:").unwrap();
        let mut chat = ChatSession::new("Cebu");
        chat.respond("may sunog!").unwrap();
        for turn in chat.transcript() {
            save_turn(&db, "s1", turn).unwrap();
        }

        assert_eq!(count_turns(&db).unwrap(), 2);
        let rows = turns_since(&db, 0).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].role, "user");
        assert_eq!(rows[0].text, "may sunog!");
        assert_eq!(rows[0].source, "");
        assert_eq!(rows[1].role, "bot");
        assert_eq!(rows[1].source, "matcher");
        assert_eq!(rows[1].category, Category::Fire.variant_name());
    }

    #[test]
    fn filters_by_timestamp() {
        let db = open_db(":memory:").unwrap();
        for (ts, text) in [(100, "old"), (200, "new"), (300, "newer")] {
            let turn = ChatTurn {
                role: Role::User,
                text: text.into(),
                timestamp: ts,
                category: None,
                source: None,
            };
            save_turn(&db, "s1", &turn).unwrap();
        }
        let rows = turns_since(&db, 200).unwrap();
        let texts: Vec<_> = rows.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["new", "newer"]);
        assert_eq!(rows[0].category, "");
    }

    #[test]
    fn empty_db_counts_zero() {
        let db = open_db(":memory:").unwrap();
        assert_eq!(count_turns(&db).unwrap(), 0);
        assert!(turns_since(&db, 0).unwrap().is_empty());
    }
}
