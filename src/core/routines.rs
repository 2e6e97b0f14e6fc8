use crate::core::runner::Environment;
use crate::core::utf_codec::read_utf;
use crate::domain::model::{DynValue, FaultKind, Outcome, Priority};
use crate::utils::error::Fault;
use std::io::{self, Read};

pub fn io_failure(env: &Environment<'_>) -> Outcome {
    let path = &env.config.files.write_target;
    tracing::debug!("Writing to {}", path.display());

    match env.fs.write(path, b"Testing IOException") {
        Ok(()) => Outcome::Completed,
        Err(e) => {
            tracing::debug!("Write failed: {}", e);
            Outcome::caught(FaultKind::Io, "Unable to write to file.")
        }
    }
}

pub fn missing_file(env: &Environment<'_>) -> Outcome {
    let path = &env.config.files.missing_file;
    tracing::debug!("Opening {} for reading", path.display());

    let attempt = env.fs.open_read(path).and_then(|mut reader| {
        let mut byte = [0u8; 1];
        reader.read(&mut byte).map(|_| ())
    });

    match attempt.map_err(Fault::from) {
        Ok(()) => Outcome::Completed,
        Err(Fault::FileNotFound(_)) => Outcome::caught(FaultKind::FileNotFound, "File not found."),
        Err(fault) if fault.is_io() => Outcome::caught(FaultKind::Io, fault.to_string()),
        Err(fault) => Outcome::Escaped(fault),
    }
}

fn drain_records(reader: &mut dyn Read) -> io::Result<usize> {
    let mut count = 0usize;
    loop {
        let record = read_utf(&mut *reader)?;
        count += 1;
        tracing::debug!("Record {}: {} bytes", count, record.len());
    }
}

pub fn end_of_stream(env: &Environment<'_>) -> Outcome {
    let path = &env.config.files.data_file;
    tracing::debug!("Reading records from {}", path.display());

    let attempt = env
        .fs
        .open_read(path)
        .and_then(|mut reader| drain_records(reader.as_mut()));

    match attempt.map_err(Fault::from) {
        Ok(_) => Outcome::Completed,
        Err(Fault::EndOfStream(_)) => Outcome::caught(FaultKind::EndOfStream, "Reached end of file."),
        Err(fault) if fault.is_io() => Outcome::caught(FaultKind::Io, fault.to_string()),
        Err(fault) => Outcome::Escaped(fault),
    }
}

pub fn query_failure(env: &Environment<'_>) -> Outcome {
    let attempt = env
        .config
        .database_url()
        .map_err(|e| Fault::query(e.to_string()))
        .and_then(|url| env.database.connect(&url))
        .and_then(|mut conn| conn.query(&env.config.database.query));

    match attempt {
        Ok(rows) => {
            tracing::debug!("Query returned {} rows", rows);
            Outcome::Completed
        }
        Err(fault @ Fault::Query { .. }) => Outcome::caught(FaultKind::Query, fault.to_string()),
        Err(fault) => Outcome::Escaped(fault),
    }
}

pub fn missing_symbol(env: &Environment<'_>) -> Outcome {
    match env.symbols.resolve(&env.config.symbols.name) {
        Ok(symbol) => {
            tracing::debug!("Resolved {} to {:?}", symbol.name, symbol.type_id);
            Outcome::Completed
        }
        Err(Fault::SymbolNotFound(name)) => Outcome::caught(FaultKind::SymbolNotFound, name),
        Err(fault) => Outcome::Escaped(fault),
    }
}

/// 除數為零時回報錯誤；`i32::MIN / -1` 以環繞結果處理
pub fn divide(numerator: i32, divisor: i32) -> Result<i32, Fault> {
    if divisor == 0 {
        return Err(Fault::DivisionByZero { numerator });
    }
    Ok(numerator.wrapping_div(divisor))
}

pub fn division_by_zero(env: &Environment<'_>) -> Outcome {
    let arithmetic = &env.config.arithmetic;
    match divide(arithmetic.numerator, arithmetic.divisor) {
        Ok(result) => {
            tracing::debug!("Division result: {}", result);
            Outcome::Completed
        }
        Err(Fault::DivisionByZero { .. }) => {
            Outcome::caught(FaultKind::DivisionByZero, "Cannot divide by zero.")
        }
        Err(fault) => Outcome::Escaped(fault),
    }
}

pub fn text_length(text: Option<&str>) -> Result<usize, Fault> {
    text.map(str::len).ok_or(Fault::NullReference)
}

pub fn null_reference(_env: &Environment<'_>) -> Outcome {
    let text: Option<String> = None;
    match text_length(text.as_deref()) {
        Ok(len) => {
            tracing::debug!("Text length: {}", len);
            Outcome::Completed
        }
        Err(Fault::NullReference) => {
            Outcome::caught(FaultKind::NullReference, "Null reference accessed.")
        }
        Err(fault) => Outcome::Escaped(fault),
    }
}

pub fn element_at(values: &[i32], index: usize) -> Result<i32, Fault> {
    values
        .get(index)
        .copied()
        .ok_or(Fault::IndexOutOfBounds {
            index,
            len: values.len(),
        })
}

pub fn index_out_of_bounds(env: &Environment<'_>) -> Outcome {
    let sequence = &env.config.sequence;
    match element_at(&sequence.values, sequence.index) {
        Ok(value) => {
            tracing::debug!("Element {}: {}", sequence.index, value);
            Outcome::Completed
        }
        Err(Fault::IndexOutOfBounds { .. }) => {
            Outcome::caught(FaultKind::IndexOutOfBounds, "Invalid array index.")
        }
        Err(fault) => Outcome::Escaped(fault),
    }
}

pub fn invalid_cast(_env: &Environment<'_>) -> Outcome {
    let value = DynValue::new(2.5_f64);
    match value.downcast::<i32>() {
        Ok(num) => {
            tracing::debug!("Cast result: {}", num);
            Outcome::Completed
        }
        Err(Fault::InvalidCast { from, to }) => {
            tracing::debug!("Rejected cast from {} to {}", from, to);
            Outcome::caught(FaultKind::InvalidCast, "Invalid type casting.")
        }
        Err(fault) => Outcome::Escaped(fault),
    }
}

pub fn illegal_argument(env: &Environment<'_>) -> Outcome {
    match Priority::new(env.config.priority.value) {
        Ok(priority) => {
            let builder = std::thread::Builder::new().name(format!("worker-p{}", priority.value()));
            tracing::debug!("Configured thread builder {:?}", builder);
            Outcome::Completed
        }
        Err(Fault::IllegalArgument(reason)) => {
            tracing::debug!("Priority rejected: {}", reason);
            Outcome::caught(FaultKind::IllegalArgument, "Invalid argument passed.")
        }
        Err(fault) => Outcome::Escaped(fault),
    }
}

pub fn number_format(env: &Environment<'_>) -> Outcome {
    match env.config.parse.input.parse::<i32>().map_err(Fault::from) {
        Ok(num) => {
            tracing::debug!("Parsed {}", num);
            Outcome::Completed
        }
        Err(Fault::NumberFormat(e)) => {
            tracing::debug!("Parse failed: {}", e);
            Outcome::caught(FaultKind::NumberFormat, "Invalid number format.")
        }
        Err(fault) => Outcome::Escaped(fault),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide() {
        assert_eq!(divide(50, 5).unwrap(), 10);
        assert!(matches!(
            divide(50, 0),
            Err(Fault::DivisionByZero { numerator: 50 })
        ));
        assert_eq!(divide(i32::MIN, -1).unwrap(), i32::MIN);
    }

    #[test]
    fn test_text_length() {
        assert_eq!(text_length(Some("abc")).unwrap(), 3);
        assert!(matches!(text_length(None), Err(Fault::NullReference)));
    }

    #[test]
    fn test_element_at() {
        let numbers = [10, 20, 30];
        assert_eq!(element_at(&numbers, 2).unwrap(), 30);
        let fault = element_at(&numbers, 5).unwrap_err();
        assert_eq!(fault.to_string(), "index 5 out of bounds for length 3");
    }

    #[test]
    fn test_drain_records_ends_with_eof() {
        let mut buf = Vec::new();
        crate::core::utf_codec::write_utf(&mut buf, "one").unwrap();
        crate::core::utf_codec::write_utf(&mut buf, "two").unwrap();

        let mut cursor = io::Cursor::new(buf);
        let err = drain_records(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
