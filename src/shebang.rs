use crate::error::{PrimeError, Result};
use crate::lexer::split_preserving_quotes;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const SHEBANG_MARKER: &[u8; 2] = b"#!";

/// Tokens of a file's interpreter directive. Empty when the file has none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShebangDirective(Vec<String>);

impl ShebangDirective {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    pub fn into_parts(self) -> Vec<String> {
        self.0
    }
}

/// Read the interpreter directive of `path`, if it has one.
///
/// Only the first two bytes are inspected before deciding; the rest of the
/// first line is read only when they are `#!`.
pub fn read_shebang(path: &Path) -> Result<ShebangDirective> {
    let file = File::open(path).map_err(|err| PrimeError::io(path, err))?;
    let mut reader = BufReader::new(file);

    let mut marker = [0u8; 2];
    match reader.read_exact(&mut marker) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Ok(ShebangDirective::default());
        }
        Err(err) => return Err(PrimeError::io(path, err)),
    }
    if &marker != SHEBANG_MARKER {
        return Ok(ShebangDirective::default());
    }

    let mut line = Vec::new();
    reader
        .read_until(b'\n', &mut line)
        .map_err(|err| PrimeError::io(path, err))?;
    let line = String::from_utf8_lossy(&line);
    let parts = split_preserving_quotes(line.trim())?;
    Ok(ShebangDirective(parts))
}
