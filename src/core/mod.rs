pub mod routines;
pub mod runner;
pub mod utf_codec;

pub use crate::domain::model::{Diagnostic, FaultKind, Outcome};
pub use crate::domain::ports::{Connection, Database, FileSystem, SymbolResolver};
pub use crate::utils::error::Result;
