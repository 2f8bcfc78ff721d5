//! Lookup dispatch: cache first, then configured sources in priority order.
//!
//! The connection sits behind a tokio mutex so the same path serves both the
//! CLI and the HTTP handlers; it is locked only around the synchronous
//! database calls, never across a fetch.

use anyhow::Result;
use rusqlite::Connection;
use tokio::sync::Mutex;
use tracing::info;

use crate::entry::Entry;
use crate::{db, extract, fetch};

#[derive(Debug)]
pub enum LookupOutcome {
    Found { source: String, entry: Entry, cached: bool },
    NotFound,
}

/// Normalized lookup key, standing in for the user's raw input.
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

pub async fn lookup(
    conn: &Mutex<Connection>,
    client: &reqwest::Client,
    word: &str,
    refresh: bool,
) -> Result<LookupOutcome> {
    let word = normalize(word);

    if !refresh {
        let cached = {
            let conn = conn.lock().await;
            db::get_cached(&conn, &word)?
        };
        if let Some((source, entry)) = cached {
            info!(word, source, "cache hit");
            return Ok(LookupOutcome::Found { source, entry, cached: true });
        }
    }

    let sources = {
        let conn = conn.lock().await;
        db::fetch_sources(&conn)?
    };

    for source in sources {
        let Some(html) = fetch::fetch_document(client, &source.url_pattern, &word).await? else {
            continue;
        };
        let entry = extract::extract_entry(&source.identifier, &html, &source.language);
        {
            let conn = conn.lock().await;
            db::save_word(&conn, &source.identifier, &word, &entry)?;
        }
        info!(word, source = source.identifier, meanings = entry.meanings.len(), "extracted");
        return Ok(LookupOutcome::Found { source: source.identifier, entry, cached: false });
    }

    Ok(LookupOutcome::NotFound)
}
