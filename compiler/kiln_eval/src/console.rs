//! Console for the `print` and `input` built-ins.
//!
//! Output is directed either to the process's stdio or to an in-memory
//! buffer with scripted input lines, used by tests and by embedders that
//! want to capture what a program prints.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use parking_lot::Mutex;

/// In-memory console: captured output plus a queue of input lines.
#[derive(Default)]
pub struct BufferConsole {
    output: Mutex<String>,
    input: Mutex<VecDeque<String>>,
}

impl BufferConsole {
    /// Empty buffer with no scripted input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `msg` and a newline to the captured output.
    pub fn println(&self, msg: &str) {
        let mut buf = self.output.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    /// Next scripted line, or `""` once the script is exhausted.
    pub fn read_line(&self) -> String {
        self.input.lock().pop_front().unwrap_or_default()
    }

    /// Queue a line for a later `input()` call.
    pub fn push_input(&self, line: impl Into<String>) {
        self.input.lock().push_back(line.into());
    }

    /// Everything printed so far.
    pub fn output(&self) -> String {
        self.output.lock().clone()
    }
}

/// Console implementation using enum dispatch.
#[derive(Default)]
pub enum Console {
    #[default]
    Stdio,
    Buffer(BufferConsole),
}

impl Console {
    /// Console backed by the process's stdin and stdout.
    pub fn stdio() -> Self {
        Console::Stdio
    }

    /// In-memory console with no scripted input.
    pub fn buffer() -> Self {
        Console::Buffer(BufferConsole::new())
    }

    /// Buffer console whose `input()` calls return `lines` in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let buffer = BufferConsole::new();
        for line in lines {
            buffer.push_input(line);
        }
        Console::Buffer(buffer)
    }

    /// Write `msg` followed by a newline.
    pub fn println(&self, msg: &str) -> io::Result<()> {
        match self {
            Console::Stdio => writeln!(io::stdout().lock(), "{msg}"),
            Console::Buffer(buffer) => {
                buffer.println(msg);
                Ok(())
            }
        }
    }

    /// Read one line without its terminator. End of input reads as `""`.
    pub fn read_line(&self) -> io::Result<String> {
        match self {
            Console::Stdio => {
                let mut line = String::new();
                io::stdin().lock().read_line(&mut line)?;
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Ok(line)
            }
            Console::Buffer(buffer) => Ok(buffer.read_line()),
        }
    }

    /// Captured output; empty for stdio.
    pub fn output(&self) -> String {
        match self {
            Console::Stdio => String::new(),
            Console::Buffer(buffer) => buffer.output(),
        }
    }
}
