//! JSON I/O handling for CLI
//!
//! - Input: one JSON object per line
//! - Output: one JSON envelope per line
//! - Logs go to stderr and never mix with output

use std::io::{BufRead, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read non-blank raw lines, without the line terminator.
///
/// Lines are not decoded here; a line that is not UTF-8 is the caller's
/// per-line problem, not a read failure.
pub fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<Vec<u8>>> {
    reader
        .split(b'\n')
        .map(|line| {
            line.map(|mut l| {
                if l.last() == Some(&b'\r') {
                    l.pop();
                }
                l
            })
            .map_err(CliError::from)
        })
        .filter(|line| !matches!(line, Ok(l) if l.iter().all(u8::is_ascii_whitespace)))
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    write_value(out, &ok_envelope(data))
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    write_value(out, &error_envelope(code, message))
}

fn ok_envelope(data: Value) -> Value {
    serde_json::json!({
        "status": "ok",
        "data": data
    })
}

fn error_envelope(code: &str, message: &str) -> Value {
    serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

fn write_value<W: Write>(out: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}
