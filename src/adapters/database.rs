use crate::domain::ports::{Connection, Database};
use crate::utils::error::Fault;
use rusqlite::OpenFlags;
use url::Url;

/// 依 URL scheme 選擇驅動，目前只有 sqlite
///
/// - `sqlite::memory:` 開啟記憶體資料庫
/// - `sqlite:<path>` 開啟既有檔案，不會自動建立
#[derive(Debug, Clone, Default)]
pub struct SqliteDatabase;

impl SqliteDatabase {
    pub fn new() -> Self {
        Self
    }
}

impl Database for SqliteDatabase {
    fn connect(&self, url: &Url) -> Result<Box<dyn Connection>, Fault> {
        if url.scheme() != "sqlite" {
            return Err(Fault::query(format!("No suitable driver found for {}", url)));
        }

        let conn = match url.path() {
            ":memory:" | "" => rusqlite::Connection::open_in_memory(),
            path => rusqlite::Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE),
        }
        .map_err(|e| Fault::query(e.to_string()))?;

        tracing::debug!("Connected to {}", url);
        Ok(Box::new(SqliteConnection { conn }))
    }
}

pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl Connection for SqliteConnection {
    fn query(&mut self, sql: &str) -> Result<usize, Fault> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| Fault::query(e.to_string()))?;
        let mut rows = stmt.query([]).map_err(|e| Fault::query(e.to_string()))?;

        let mut count = 0;
        while rows
            .next()
            .map_err(|e| Fault::query(e.to_string()))?
            .is_some()
        {
            count += 1;
        }
        Ok(count)
    }
}
