use crate::utils::error::Fault;
use std::any::TypeId;
use std::io::{self, Read};
use std::path::Path;
use url::Url;

/// 檔案系統協作者，回傳的讀取器在離開作用域時自動釋放
pub trait FileSystem {
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read>>;
}

pub trait Database {
    fn connect(&self, url: &Url) -> Result<Box<dyn Connection>, Fault>;
}

pub trait Connection {
    /// 執行查詢並回傳讀到的列數
    fn query(&mut self, sql: &str) -> Result<usize, Fault>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub type_id: TypeId,
}

pub trait SymbolResolver {
    fn resolve(&self, name: &str) -> Result<Symbol, Fault>;
}
