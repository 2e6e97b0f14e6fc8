use crate::domain::model::{Diagnostic, FaultKind, Priority};
use crate::domain::ports::{Symbol, SymbolResolver};
use crate::utils::error::Fault;
use std::any::{type_name, TypeId};
use std::collections::HashMap;

/// 以名稱查詢已註冊型別的登錄表
#[derive(Debug, Clone, Default)]
pub struct SymbolRegistry {
    symbols: HashMap<String, TypeId>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 預先註冊常用的標準型別與本 crate 的型別
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register::<String>()
            .register::<i32>()
            .register::<i64>()
            .register::<f64>()
            .register::<bool>()
            .register::<Vec<u8>>()
            .register::<FaultKind>()
            .register::<Diagnostic>()
            .register::<Priority>();
        registry
    }

    pub fn register<T: 'static>(&mut self) -> &mut Self {
        self.register_as::<T>(type_name::<T>())
    }

    pub fn register_as<T: 'static>(&mut self, name: &str) -> &mut Self {
        self.symbols.insert(name.to_string(), TypeId::of::<T>());
        self
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }
}

impl SymbolResolver for SymbolRegistry {
    fn resolve(&self, name: &str) -> Result<Symbol, Fault> {
        self.symbols
            .get(name)
            .map(|type_id| Symbol {
                name: name.to_string(),
                type_id: *type_id,
            })
            .ok_or_else(|| Fault::SymbolNotFound(name.to_string()))
    }
}
