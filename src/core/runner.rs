use crate::adapters::{LocalFileSystem, SqliteDatabase, SymbolRegistry};
use crate::config::DemoConfig;
use crate::core::routines;
use crate::domain::model::{Outcome, RoutineReport};
use crate::domain::ports::{Database, FileSystem, SymbolResolver};
use crate::utils::error::{DemoError, Result};
use std::io::Write;

/// 例程執行時可用的協作者與輸入
pub struct Environment<'a> {
    pub fs: &'a dyn FileSystem,
    pub database: &'a dyn Database,
    pub symbols: &'a dyn SymbolResolver,
    pub config: &'a DemoConfig,
}

pub type RoutineFn = fn(&Environment<'_>) -> Outcome;

#[derive(Clone, Copy)]
pub struct RoutineEntry {
    pub name: &'static str,
    pub run: RoutineFn,
}

impl std::fmt::Debug for RoutineEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutineEntry").field("name", &self.name).finish()
    }
}

/// 固定的執行順序
pub const ROUTINES: [RoutineEntry; 11] = [
    RoutineEntry { name: "io-failure", run: routines::io_failure },
    RoutineEntry { name: "missing-file", run: routines::missing_file },
    RoutineEntry { name: "end-of-stream", run: routines::end_of_stream },
    RoutineEntry { name: "query-failure", run: routines::query_failure },
    RoutineEntry { name: "missing-symbol", run: routines::missing_symbol },
    RoutineEntry { name: "division-by-zero", run: routines::division_by_zero },
    RoutineEntry { name: "null-reference", run: routines::null_reference },
    RoutineEntry { name: "index-out-of-bounds", run: routines::index_out_of_bounds },
    RoutineEntry { name: "invalid-cast", run: routines::invalid_cast },
    RoutineEntry { name: "illegal-argument", run: routines::illegal_argument },
    RoutineEntry { name: "number-format", run: routines::number_format },
];

/// 依表格順序挑出指定的例程，空清單代表全部
pub fn select_routines(names: &[String]) -> Result<Vec<RoutineEntry>> {
    if let Some(unknown) = names
        .iter()
        .find(|name| !ROUTINES.iter().any(|entry| entry.name == name.as_str()))
    {
        return Err(DemoError::UnknownRoutineError {
            name: unknown.clone(),
        });
    }

    Ok(ROUTINES
        .iter()
        .filter(|entry| names.is_empty() || names.iter().any(|name| name == entry.name))
        .copied()
        .collect())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<(&'static str, Outcome)>,
}

impl RunReport {
    pub fn lines(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|(_, outcome)| outcome.diagnostic())
            .map(|diagnostic| diagnostic.to_string())
            .collect()
    }

    pub fn caught_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, Outcome::Caught(_)))
            .count()
    }

    pub fn outcome(&self, name: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|(routine, _)| *routine == name)
            .map(|(_, outcome)| outcome)
    }
}

pub struct FaultDemoRunner<F: FileSystem, D: Database, R: SymbolResolver> {
    fs: F,
    database: D,
    symbols: R,
    config: DemoConfig,
    format: OutputFormat,
}

impl FaultDemoRunner<LocalFileSystem, SqliteDatabase, SymbolRegistry> {
    pub fn local(config: DemoConfig) -> Self {
        Self::new(
            LocalFileSystem::new(),
            SqliteDatabase::new(),
            SymbolRegistry::with_builtins(),
            config,
        )
    }
}

impl<F: FileSystem, D: Database, R: SymbolResolver> FaultDemoRunner<F, D, R> {
    pub fn new(fs: F, database: D, symbols: R, config: DemoConfig) -> Self {
        Self {
            fs,
            database,
            symbols,
            config,
            format: OutputFormat::Text,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    fn environment(&self) -> Environment<'_> {
        Environment {
            fs: &self.fs,
            database: &self.database,
            symbols: &self.symbols,
            config: &self.config,
        }
    }

    /// 依序執行全部十一個例程
    pub fn run<W: Write>(&self, out: &mut W) -> Result<RunReport> {
        self.run_routines(&ROUTINES, out)
    }

    pub fn run_routines<W: Write>(&self, entries: &[RoutineEntry], out: &mut W) -> Result<RunReport> {
        let env = self.environment();
        let mut report = RunReport::default();

        for entry in entries {
            let span = tracing::debug_span!("routine", name = entry.name);
            let _guard = span.enter();

            let outcome = (entry.run)(&env);
            match &outcome {
                Outcome::Caught(diagnostic) => {
                    tracing::debug!("Caught {}", diagnostic.kind);
                }
                Outcome::Completed => {
                    tracing::warn!("⚠️ {} did not fault", entry.name);
                }
                Outcome::Escaped(fault) => {
                    tracing::error!(
                        "❌ {} raised an unhandled {} fault: {}",
                        entry.name,
                        fault.kind(),
                        fault
                    );
                }
            }

            self.emit(entry.name, &outcome, out)?;
            report.outcomes.push((entry.name, outcome));
        }

        out.flush()?;
        tracing::info!(
            "✅ Ran {} routines, {} faults caught",
            report.outcomes.len(),
            report.caught_count()
        );
        Ok(report)
    }

    fn emit<W: Write>(&self, name: &str, outcome: &Outcome, out: &mut W) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                if let Some(diagnostic) = outcome.diagnostic() {
                    writeln!(out, "{}", diagnostic)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &RoutineReport::from_outcome(name, outcome))?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}
