// 轉接層：檔案系統、資料庫與符號查詢的實際實作

pub mod database;
pub mod fs;
pub mod symbols;

pub use database::SqliteDatabase;
pub use fs::LocalFileSystem;
pub use symbols::SymbolRegistry;
