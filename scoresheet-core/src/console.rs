//! Line oriented output for the interactive driver.
//!
//! Diagnostics are `info string` lines. Every line is flushed when written.

use std::io::{self, Write};

/// Write a line and flush.
pub fn write_line<W: Write>(writer: &mut W, s: &str) -> io::Result<()> {
    writer.write_all(s.as_bytes())?;
    if !s.ends_with('\n') {
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Write a debug info string, only if debugging is enabled.
pub fn write_debug<W: Write>(writer: &mut W, can_debug: bool, s: &str) -> io::Result<()> {
    if can_debug {
        write_line(writer, &format!("info string debug {s}"))
    } else {
        Ok(())
    }
}

/// Write an error info string.
pub fn write_error<W: Write>(writer: &mut W, s: &str) -> io::Result<()> {
    write_line(writer, &format!("info string error {s}"))
}

/// Send a line over stdout.
pub fn send(s: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_line(&mut handle, s)
}

/// Send a debug info string over stdout.
pub fn debug(can_debug: bool, s: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_debug(&mut handle, can_debug, s)
}

/// Send an error info string over stdout.
pub fn error(s: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_error(&mut handle, s)
}
