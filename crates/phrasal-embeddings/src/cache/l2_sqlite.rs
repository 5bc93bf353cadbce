//! L2 SQLite-backed embedding cache.
//!
//! Persists embeddings as `content_hash → embedding` rows so a corpus run
//! can resume without re-embedding. The hash covers a namespace (provider
//! name and dimensions) plus the text, so switching models never serves
//! vectors from the previous one.

use std::path::Path;
use std::sync::Mutex;

use phrasal_core::errors::{EmbeddingError, PhrasalResult};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS embedding_cache (
    content_hash TEXT PRIMARY KEY,
    embedding    BLOB NOT NULL
)";

/// L2 persistent embedding cache.
pub struct L2SqliteCache {
    conn: Mutex<Connection>,
    namespace: String,
}

impl L2SqliteCache {
    /// Open (or create) the cache database at `path`.
    pub fn open(path: &Path, namespace: &str) -> PhrasalResult<Self> {
        let conn = Connection::open(path).map_err(|e| EmbeddingError::CacheFailure {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::init(conn, namespace)
    }

    /// In-memory database, for tests and throwaway runs.
    pub fn open_in_memory(namespace: &str) -> PhrasalResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| EmbeddingError::CacheFailure {
            reason: e.to_string(),
        })?;
        Self::init(conn, namespace)
    }

    fn init(conn: Connection, namespace: &str) -> PhrasalResult<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| EmbeddingError::CacheFailure {
                reason: format!("schema: {e}"),
            })?;
        Ok(Self {
            conn: Mutex::new(conn),
            namespace: namespace.to_string(),
        })
    }

    /// Hash a text under this cache's namespace.
    pub fn content_hash(&self, text: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.namespace.as_bytes());
        hasher.update(&[0]);
        hasher.update(text.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    /// Look up an embedding. Read errors and corrupt blobs count as misses.
    pub fn get(&self, text: &str) -> Option<Vec<f32>> {
        let hash = self.content_hash(text);
        let conn = self.conn.lock().ok()?;
        let blob: Option<Vec<u8>> = match conn
            .query_row(
                "SELECT embedding FROM embedding_cache WHERE content_hash = ?1",
                params![hash],
                |row| row.get(0),
            )
            .optional()
        {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "L2 cache read failed");
                return None;
            }
        };
        let bytes = blob?;
        if bytes.len() % 4 != 0 {
            warn!(hash = %hash, len = bytes.len(), "corrupt L2 cache entry ignored");
            return None;
        }
        Some(
            bytes
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        )
    }

    /// Store an embedding. Last write wins.
    pub fn insert(&self, text: &str, embedding: &[f32]) {
        let hash = self.content_hash(text);
        let bytes: Vec<u8> = embedding.iter().flat_map(|f| f.to_le_bytes()).collect();
        let Ok(conn) = self.conn.lock() else {
            warn!("L2 cache lock poisoned, skipping insert");
            return;
        };
        match conn.execute(
            "INSERT OR REPLACE INTO embedding_cache (content_hash, embedding) VALUES (?1, ?2)",
            params![hash, bytes],
        ) {
            Ok(_) => debug!(hash = %hash, "L2 cache insert"),
            Err(e) => warn!(error = %e, "L2 cache insert failed"),
        }
    }

    /// Number of cached embeddings.
    pub fn len(&self) -> usize {
        let Ok(conn) = self.conn.lock() else {
            return 0;
        };
        conn.query_row("SELECT COUNT(*) FROM embedding_cache", [], |row| {
            row.get::<_, i64>(0)
        })
        .map(|n| n as usize)
        .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
