use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

use crate::error::Result;

/// Response bodies keyed by request method and URL.
pub struct ResponseCache {
    conn: Connection,
}

impl ResponseCache {
    /// Open (or create) the cache database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let cache = Self {
            conn: Connection::open(path)?,
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Create an in-memory cache (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let cache = Self {
            conn: Connection::open_in_memory()?,
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS responses (
                method TEXT NOT NULL,
                url TEXT NOT NULL,
                body BLOB NOT NULL,
                fetched_at TEXT NOT NULL,
                PRIMARY KEY (method, url)
            )",
            [],
        )?;

        Ok(())
    }

    pub fn get(&self, method: &str, url: &str) -> Result<Option<Vec<u8>>> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM responses WHERE method = ?1 AND url = ?2",
                params![method, url],
                |row| row.get(0),
            )
            .optional()?;

        Ok(body)
    }

    pub fn put(&self, method: &str, url: &str, body: &[u8]) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO responses (method, url, body, fetched_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![method, url, body, chrono::Local::now().to_rfc3339()],
        )?;

        Ok(())
    }

    /// Drop every stored response, returning how many were removed.
    pub fn clear(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM responses", [])?)
    }

    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_and_clear() {
        let cache = ResponseCache::open_in_memory().unwrap();
        assert!(cache.is_empty().unwrap());

        cache.put("GET", "https://example.com/", b"<html></html>").unwrap();
        assert_eq!(
            cache.get("GET", "https://example.com/").unwrap().as_deref(),
            Some(&b"<html></html>"[..])
        );
        assert!(cache.get("HEAD", "https://example.com/").unwrap().is_none());

        assert_eq!(cache.clear().unwrap(), 1);
        assert!(cache.get("GET", "https://example.com/").unwrap().is_none());
    }

    #[test]
    fn test_cache_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("http_cache.sqlite");

        ResponseCache::open(&path)
            .unwrap()
            .put("GET", "https://example.com/a", b"body")
            .unwrap();

        let reopened = ResponseCache::open(&path).unwrap();
        assert_eq!(reopened.len().unwrap(), 1);
    }
}
