use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::entry::Entry;

const DB_PATH: &str = "data/sozluk.sqlite";

pub fn connect() -> Result<Connection> {
    connect_at(Path::new(DB_PATH))
}

pub fn connect_at(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS sources (
            identifier      TEXT PRIMARY KEY,
            name            TEXT NOT NULL,
            url_pattern     TEXT NOT NULL,
            language        TEXT NOT NULL,
            priority        INTEGER NOT NULL DEFAULT 0,
            allows_scraping BOOLEAN NOT NULL DEFAULT 1,
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS words (
            id                INTEGER PRIMARY KEY,
            source_identifier TEXT NOT NULL REFERENCES sources(identifier),
            word              TEXT NOT NULL,
            details           TEXT NOT NULL,
            created_at        TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(source_identifier, word)
        );
        CREATE INDEX IF NOT EXISTS idx_words_word ON words(word);
        ",
    )?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Source {
    pub identifier: String,
    pub name: String,
    pub url_pattern: String,
    pub language: String,
    pub priority: i64,
    pub allows_scraping: bool,
}

/// Register the built-in sources; existing rows are left untouched.
pub fn seed_sources(conn: &Connection) -> Result<usize> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO sources (identifier, name, url_pattern, language, priority)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            crate::extract::WIKTIONARY_TR_EN,
            "Wiktionary (Turkish-English)",
            "https://en.wiktionary.org/wiki/%s",
            "Turkish",
            0,
        ],
    )?;
    Ok(inserted)
}

/// Scrapable sources in priority order.
pub fn fetch_sources(conn: &Connection) -> Result<Vec<Source>> {
    let mut stmt = conn.prepare(
        "SELECT identifier, name, url_pattern, language, priority, allows_scraping
         FROM sources WHERE allows_scraping = 1 ORDER BY priority, identifier",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Source {
                identifier: row.get(0)?,
                name: row.get(1)?,
                url_pattern: row.get(2)?,
                language: row.get(3)?,
                priority: row.get(4)?,
                allows_scraping: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Cached entry for a word, preferring the highest-priority source.
pub fn get_cached(conn: &Connection, word: &str) -> Result<Option<(String, Entry)>> {
    let row: Option<(String, String)> = conn
        .query_row(
            "SELECT w.source_identifier, w.details
             FROM words w JOIN sources s ON s.identifier = w.source_identifier
             WHERE w.word = ?1
             ORDER BY s.priority, s.identifier
             LIMIT 1",
            [word],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;
    match row {
        Some((source, details)) => {
            let entry: Entry = serde_json::from_str(&details)
                .with_context(|| format!("corrupt cached entry for '{}'", word))?;
            Ok(Some((source, entry)))
        }
        None => Ok(None),
    }
}

pub fn save_word(conn: &Connection, source: &str, word: &str, entry: &Entry) -> Result<()> {
    let details = serde_json::to_string(entry)?;
    conn.execute(
        "INSERT OR REPLACE INTO words (source_identifier, word, details)
         VALUES (?1, ?2, ?3)",
        rusqlite::params![source, word, details],
    )?;
    Ok(())
}

// ── Stats ──

pub struct Stats {
    pub sources: usize,
    pub cached_words: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let sources: usize = conn.query_row("SELECT COUNT(*) FROM sources", [], |r| r.get(0))?;
    let cached_words: usize = conn.query_row("SELECT COUNT(*) FROM words", [], |r| r.get(0))?;
    Ok(Stats { sources, cached_words })
}
