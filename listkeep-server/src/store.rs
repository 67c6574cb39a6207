//! SQLite item store
//!
//! One table, `items (id INTEGER PRIMARY KEY AUTOINCREMENT, text TEXT)`.
//! Writes go through an in-process gate so id assignment and delete counts
//! stay exact under concurrent requests; reads share the pool.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::models::{Item, ItemText};

/// Kept low; SQLite has a single writer anyway.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT
)
"#;

/// Shared handle to the item table. Clones share one pool.
#[derive(Clone, Debug)]
pub struct ItemStore {
    pool: SqlitePool,
    write_gate: Arc<Mutex<()>>,
    path: PathBuf,
}

impl ItemStore {
    /// Open or create the data file at `path` and ensure the table exists.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        Self::init(pool, path).await
    }

    /// Open a private in-memory store (for testing)
    pub async fn open_in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        // Every in-memory connection is its own database, so pin exactly one.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::init(pool, PathBuf::from(":memory:")).await
    }

    async fn init(pool: SqlitePool, path: PathBuf) -> StoreResult<Self> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        info!(path = %path.display(), "item store ready");

        Ok(Self {
            pool,
            write_gate: Arc::new(Mutex::new(())),
            path,
        })
    }

    /// Data file location (`:memory:` for in-memory stores)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All items in id order.
    pub async fn list(&self) -> StoreResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>("SELECT id, text FROM items ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    /// Insert a row and return the id SQLite assigned to it.
    ///
    /// AUTOINCREMENT keeps ids strictly increasing; ids of deleted rows are
    /// never handed out again.
    pub async fn insert(&self, text: &ItemText) -> StoreResult<i64> {
        let _gate = self.write_gate.lock().await;

        let id: i64 = sqlx::query_scalar("INSERT INTO items (text) VALUES (?) RETURNING id")
            .bind(text.as_str())
            .fetch_one(&self.pool)
            .await?;

        debug!(id, "item inserted");
        Ok(id)
    }

    /// Remove the item with `id`. Returns the number of rows removed (0 or 1).
    pub async fn delete_by_id(&self, id: i64) -> StoreResult<u64> {
        let _gate = self.write_gate.lock().await;

        let deleted = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        debug!(id, deleted, "item delete");
        Ok(deleted)
    }

    /// Close every connection. Waits for in-flight writes, then checkpoints
    /// the WAL into the data file. Later calls fail with a store error.
    pub async fn close(&self) {
        let _gate = self.write_gate.lock().await;
        self.pool.close().await;
        info!(path = %self.path.display(), "item store closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ItemText {
        ItemText::new(s).unwrap()
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = ItemStore::open_in_memory().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = ItemStore::open_in_memory().await.unwrap();

        let first = store.insert(&text("buy milk")).await.unwrap();
        let second = store.insert(&text("walk dog")).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let items = store.list().await.unwrap();
        assert_eq!(
            items,
            vec![
                Item { id: 1, text: Some("buy milk".into()) },
                Item { id: 2, text: Some("walk dog".into()) },
            ]
        );
    }

    #[tokio::test]
    async fn delete_reports_rows_removed() {
        let store = ItemStore::open_in_memory().await.unwrap();
        let id = store.insert(&text("buy milk")).await.unwrap();

        assert_eq!(store.delete_by_id(id).await.unwrap(), 1);
        assert_eq!(store.delete_by_id(id).await.unwrap(), 0);
        assert_eq!(store.delete_by_id(987_654_321).await.unwrap(), 0);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = ItemStore::open_in_memory().await.unwrap();
        let a = store.insert(&text("a")).await.unwrap();
        let b = store.insert(&text("b")).await.unwrap();
        store.delete_by_id(b).await.unwrap();

        let c = store.insert(&text("c")).await.unwrap();
        assert!(c > b && b > a);
    }

    #[tokio::test]
    async fn null_text_rows_are_listed() {
        let store = ItemStore::open_in_memory().await.unwrap();
        sqlx::query("INSERT INTO items (text) VALUES (NULL)")
            .execute(&store.pool)
            .await
            .unwrap();

        let items = store.list().await.unwrap();
        assert_eq!(items, vec![Item { id: 1, text: None }]);
    }

    #[tokio::test]
    async fn calls_after_close_fail() {
        let store = ItemStore::open_in_memory().await.unwrap();
        store.close().await;

        assert!(store.is_closed());
        assert!(store.list().await.is_err());
        assert!(store.insert(&text("late")).await.is_err());
    }
}
