use crate::utils::error::Fault;
use crate::utils::validation::check_range;
use serde::{Deserialize, Serialize};
use std::any::{type_name, Any};
use std::fmt;

/// 十一種可辨識的錯誤分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultKind {
    Io,
    FileNotFound,
    EndOfStream,
    Query,
    SymbolNotFound,
    DivisionByZero,
    NullReference,
    IndexOutOfBounds,
    InvalidCast,
    IllegalArgument,
    NumberFormat,
}

impl FaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::Io => "IoError",
            FaultKind::FileNotFound => "FileNotFound",
            FaultKind::EndOfStream => "EndOfStream",
            FaultKind::Query => "QueryError",
            FaultKind::SymbolNotFound => "SymbolNotFound",
            FaultKind::DivisionByZero => "DivisionByZero",
            FaultKind::NullReference => "NullReference",
            FaultKind::IndexOutOfBounds => "IndexOutOfBounds",
            FaultKind::InvalidCast => "InvalidCast",
            FaultKind::IllegalArgument => "IllegalArgument",
            FaultKind::NumberFormat => "NumberFormat",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 攔截到錯誤時產生的單行診斷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: FaultKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    // 一律以句點結尾，動態訊息本身帶句點時不重複
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message.trim_end();
        if message.ends_with('.') {
            write!(f, "{} caught: {}", self.kind, message)
        } else {
            write!(f, "{} caught: {}.", self.kind, message)
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Caught(Diagnostic),
    /// 預期會失敗的操作竟然成功
    Completed,
    /// 不在攔截範圍內的錯誤
    Escaped(Fault),
}

impl Outcome {
    pub fn caught(kind: FaultKind, message: impl Into<String>) -> Self {
        Outcome::Caught(Diagnostic::new(kind, message))
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Outcome::Caught(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }

    pub fn status(&self) -> RoutineStatus {
        match self {
            Outcome::Caught(_) => RoutineStatus::Caught,
            Outcome::Completed => RoutineStatus::Completed,
            Outcome::Escaped(_) => RoutineStatus::Escaped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutineStatus {
    Caught,
    Completed,
    Escaped,
}

/// `--json` 輸出用的單一例程結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineReport {
    pub routine: String,
    pub status: RoutineStatus,
    pub kind: Option<String>,
    pub message: Option<String>,
}

impl RoutineReport {
    pub fn from_outcome(routine: &str, outcome: &Outcome) -> Self {
        let (kind, message) = match outcome {
            Outcome::Caught(diagnostic) => (
                Some(diagnostic.kind.to_string()),
                Some(diagnostic.message.clone()),
            ),
            Outcome::Completed => (None, None),
            Outcome::Escaped(fault) => (Some(fault.kind().to_string()), Some(fault.to_string())),
        };

        Self {
            routine: routine.to_string(),
            status: outcome.status(),
            kind,
            message,
        }
    }
}

/// 執行緒優先權，合法範圍 1..=10
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(u8);

impl Priority {
    pub const MIN: u8 = 1;
    pub const NORM: u8 = 5;
    pub const MAX: u8 = 10;

    pub fn new(value: i32) -> Result<Self, Fault> {
        let value = check_range(value, Self::MIN as i32, Self::MAX as i32)
            .map_err(Fault::IllegalArgument)?;
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(Self::NORM)
    }
}

/// 執行期才知道實際型別的值，轉型失敗時可回報原本的型別名稱
pub struct DynValue {
    value: Box<dyn Any>,
    type_name: &'static str,
}

impl DynValue {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    pub fn downcast<T: Any>(self) -> Result<T, Fault> {
        let from = self.type_name;
        self.value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| Fault::InvalidCast {
                from,
                to: type_name::<T>(),
            })
    }
}

impl fmt::Debug for DynValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_line_format() {
        let fixed = Diagnostic::new(FaultKind::DivisionByZero, "Cannot divide by zero.");
        assert_eq!(
            fixed.to_string(),
            "DivisionByZero caught: Cannot divide by zero."
        );

        let dynamic = Diagnostic::new(FaultKind::SymbolNotFound, "com.example.NonExistentClass");
        assert_eq!(
            dynamic.to_string(),
            "SymbolNotFound caught: com.example.NonExistentClass."
        );
    }

    #[test]
    fn test_priority_domain() {
        assert_eq!(Priority::new(1).unwrap().value(), 1);
        assert_eq!(Priority::new(10).unwrap().value(), 10);
        assert_eq!(Priority::default().value(), 5);

        let err = Priority::new(11).unwrap_err();
        assert_eq!(err.kind(), FaultKind::IllegalArgument);
        assert!(err.to_string().contains("between 1 and 10"));
        assert!(Priority::new(0).is_err());
    }

    #[test]
    fn test_report_from_outcomes() {
        let caught = Outcome::caught(FaultKind::NumberFormat, "Invalid number format.");
        let report = RoutineReport::from_outcome("number-format", &caught);
        assert_eq!(report.status, RoutineStatus::Caught);
        assert_eq!(report.kind.as_deref(), Some("NumberFormat"));
        assert_eq!(report.message.as_deref(), Some("Invalid number format."));

        let completed = RoutineReport::from_outcome("io-failure", &Outcome::Completed);
        assert_eq!(completed.status, RoutineStatus::Completed);
        assert!(completed.message.is_none());

        let escaped = RoutineReport::from_outcome("null-reference", &Outcome::Escaped(Fault::NullReference));
        assert_eq!(escaped.status, RoutineStatus::Escaped);
        assert_eq!(escaped.kind.as_deref(), Some("NullReference"));
        assert_eq!(escaped.message.as_deref(), Some("null reference accessed"));
    }

    #[test]
    fn test_dyn_value_downcast() {
        assert_eq!(DynValue::new(2.5_f64).downcast::<f64>().unwrap(), 2.5);

        let fault = DynValue::new(2.5_f64).downcast::<i32>().unwrap_err();
        assert_eq!(fault.kind(), FaultKind::InvalidCast);
        assert_eq!(fault.to_string(), "cannot cast f64 to i32");
    }
}
