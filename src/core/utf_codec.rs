//! 長度前綴字串記錄：big-endian `u16` 位元組長度，後接 UTF-8 內容。

use std::io::{self, Read, Write};

pub fn read_utf<R: Read + ?Sized>(reader: &mut R) -> io::Result<String> {
    let mut len_buf = [0u8; 2];
    reader.read_exact(&mut len_buf)?;
    let len = u16::from_be_bytes(len_buf) as usize;

    let mut bytes = vec![0u8; len];
    reader.read_exact(&mut bytes)?;

    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub fn write_utf<W: Write + ?Sized>(writer: &mut W, value: &str) -> io::Result<()> {
    let len = u16::try_from(value.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("encoded string too long: {} bytes", value.len()),
        )
    })?;
    writer.write_all(&len.to_be_bytes())?;
    writer.write_all(value.as_bytes())
}
