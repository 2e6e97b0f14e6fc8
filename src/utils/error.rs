use crate::domain::model::FaultKind;
use std::io;
use std::num::ParseIntError;
use thiserror::Error;

/// 示範程序會攔截的執行期錯誤分類
#[derive(Error, Debug)]
pub enum Fault {
    #[error("{0}")]
    Io(io::Error),

    #[error("{0}")]
    FileNotFound(io::Error),

    #[error("{0}")]
    EndOfStream(io::Error),

    #[error("{message}")]
    Query { message: String },

    #[error("{0}")]
    SymbolNotFound(String),

    #[error("attempt to divide {numerator} by zero")]
    DivisionByZero { numerator: i32 },

    #[error("null reference accessed")]
    NullReference,

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("cannot cast {from} to {to}")]
    InvalidCast {
        from: &'static str,
        to: &'static str,
    },

    #[error("{0}")]
    IllegalArgument(String),

    #[error("{0}")]
    NumberFormat(#[from] ParseIntError),
}

impl Fault {
    pub fn query(message: impl Into<String>) -> Self {
        Fault::Query {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::Io(_) => FaultKind::Io,
            Fault::FileNotFound(_) => FaultKind::FileNotFound,
            Fault::EndOfStream(_) => FaultKind::EndOfStream,
            Fault::Query { .. } => FaultKind::Query,
            Fault::SymbolNotFound(_) => FaultKind::SymbolNotFound,
            Fault::DivisionByZero { .. } => FaultKind::DivisionByZero,
            Fault::NullReference => FaultKind::NullReference,
            Fault::IndexOutOfBounds { .. } => FaultKind::IndexOutOfBounds,
            Fault::InvalidCast { .. } => FaultKind::InvalidCast,
            Fault::IllegalArgument(_) => FaultKind::IllegalArgument,
            Fault::NumberFormat(_) => FaultKind::NumberFormat,
        }
    }

    /// 檔案不存在與串流結尾都屬於 I/O 家族
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Fault::Io(_) | Fault::FileNotFound(_) | Fault::EndOfStream(_)
        )
    }
}

impl From<io::Error> for Fault {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Fault::FileNotFound(err),
            io::ErrorKind::UnexpectedEof => Fault::EndOfStream(err),
            _ => Fault::Io(err),
        }
    }
}

/// 示範以外的應用程式錯誤（設定、輸出等）
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown routine: {name}")]
    UnknownRoutineError { name: String },
}

pub type Result<T> = std::result::Result<T, DemoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_classification() {
        let missing: Fault = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(missing.kind(), FaultKind::FileNotFound);

        let eof: Fault = io::Error::new(io::ErrorKind::UnexpectedEof, "short").into();
        assert_eq!(eof.kind(), FaultKind::EndOfStream);

        let denied: Fault = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
        assert_eq!(denied.kind(), FaultKind::Io);
        assert_eq!(denied.to_string(), "nope");
    }

    #[test]
    fn test_io_family() {
        let eof: Fault = io::Error::new(io::ErrorKind::UnexpectedEof, "short").into();
        assert!(eof.is_io());
        assert!(!Fault::NullReference.is_io());
        assert!(!Fault::query("bad").is_io());
    }

    #[test]
    fn test_number_format_from_parse_error() {
        let fault: Fault = "abc".parse::<i32>().unwrap_err().into();
        assert_eq!(fault.kind(), FaultKind::NumberFormat);
    }
}
