pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{LocalFileSystem, SqliteDatabase, SymbolRegistry};
pub use crate::config::{CliConfig, DemoConfig};
pub use crate::core::runner::{FaultDemoRunner, OutputFormat, RunReport, ROUTINES};
pub use crate::domain::model::{Diagnostic, FaultKind, Outcome};
pub use crate::utils::error::{DemoError, Fault, Result};
