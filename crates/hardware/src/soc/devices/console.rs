//! Console device used by the I/O syscalls.
//!
//! Implements the character and token I/O behind the print/read syscalls. Bytes pass
//! through unchanged; no text encoding is assumed. It provides:
//! 1. **Trait:** `Console`, so the engine never touches stdin/stdout directly.
//! 2. **StdConsole:** Process stdin/stdout, flushed after every print.
//! 3. **BufferConsole:** Scripted input and captured output for tests and embedding.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::rc::Rc;

/// Character and token I/O for the simulated program.
pub trait Console {
    /// Writes `bytes` to the output as-is.
    fn print(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Reads a single byte of input.
    fn read_char(&mut self) -> io::Result<u8>;

    /// Reads one whitespace-delimited token of input.
    fn read_token(&mut self) -> io::Result<Vec<u8>>;
}

/// Collects a whitespace-delimited token from a byte source.
fn collect_token(mut next: impl FnMut() -> io::Result<Option<u8>>) -> io::Result<Vec<u8>> {
    let mut token = Vec::new();
    while let Some(byte) = next()? {
        if byte.is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            break;
        }
        token.push(byte);
    }
    if token.is_empty() {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no input token"));
    }
    Ok(token)
}

/// Console bound to the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    /// Reads one byte from stdin, `None` at end of input.
    fn next_byte() -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match io::stdin().lock().read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}

impl Console for StdConsole {
    fn print(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(bytes)?;
        out.flush()
    }

    fn read_char(&mut self) -> io::Result<u8> {
        Self::next_byte()?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))
    }

    fn read_token(&mut self) -> io::Result<Vec<u8>> {
        collect_token(Self::next_byte)
    }
}

/// In-memory console with scripted input.
///
/// Output is shared through [`BufferConsole::output`] so it can be inspected after
/// the console has been handed to the CPU.
#[derive(Debug, Default)]
pub struct BufferConsole {
    input: VecDeque<u8>,
    output: Rc<RefCell<Vec<u8>>>,
}

impl BufferConsole {
    /// Creates a console whose input is `input`.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.bytes().collect(),
            output: Rc::default(),
        }
    }

    /// Handle to everything printed so far.
    pub fn output(&self) -> Rc<RefCell<Vec<u8>>> {
        Rc::clone(&self.output)
    }
}

impl Console for BufferConsole {
    fn print(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.output.borrow_mut().extend_from_slice(bytes);
        Ok(())
    }

    fn read_char(&mut self) -> io::Result<u8> {
        self.input
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input exhausted"))
    }

    fn read_token(&mut self) -> io::Result<Vec<u8>> {
        let input = &mut self.input;
        collect_token(|| Ok(input.pop_front()))
    }
}
