//! Console output device.
//!
//! The console is the host side of the `PUTC` trap vector: each byte written by
//! guest code is forwarded to a host `Write` sink. Writes block until the byte
//! has been handed to the sink and flushed, so guest output interleaves
//! correctly with the simulator's own diagnostics.

use std::io::{self, Write};

/// Character output device backed by any `Write` sink (stdout by default).
#[derive(Debug)]
pub struct Console<W: Write> {
    sink: W,
    bytes_written: u64,
}

impl Console<io::Stdout> {
    /// Creates a console that writes to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    /// Creates a console that writes to `sink`.
    pub const fn new(sink: W) -> Self {
        Self {
            sink,
            bytes_written: 0,
        }
    }

    /// Writes one byte and flushes the sink.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from the sink.
    pub fn put(&mut self, byte: u8) -> io::Result<()> {
        self.sink.write_all(&[byte])?;
        self.sink.flush()?;
        self.bytes_written += 1;
        Ok(())
    }

    /// Number of bytes successfully written.
    pub const fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Borrows the underlying sink.
    pub const fn sink(&self) -> &W {
        &self.sink
    }

    /// Consumes the console and returns the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}
