//! Line acquisition: the byte-at-a-time stream reader and the line sources
//! the interpreter loop pulls from.

use crate::buffer;
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, ErrorKind, Write};

/// Initial size of the line buffer, in bytes.
pub const LINE_BUFFER_SIZE: usize = 1024;

/// Reads newline-terminated lines from a byte stream.
///
/// The line buffer starts at [`LINE_BUFFER_SIZE`] bytes and doubles whenever
/// it fills up, so lines have no length limit.
pub struct LineReader<R> {
    input: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Reads the next line without its trailing newline.
    ///
    /// Returns `Ok(None)` at end of input when nothing has been read, so an
    /// empty line (`Some("")`) and end of input are never confused. A final
    /// line with no newline is returned as is.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line: Vec<u8> = buffer::with_capacity(LINE_BUFFER_SIZE);
        let mut read_any = false;

        while let Some(byte) = self.next_byte()? {
            read_any = true;
            if byte == b'\n' {
                break;
            }
            buffer::grow(&mut line, LINE_BUFFER_SIZE);
            line.push(byte);
        }

        if !read_any {
            return Ok(None);
        }
        Ok(Some(match String::from_utf8(line) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }))
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.input.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(available) => {
                    let byte = available[0];
                    self.input.consume(1);
                    return Ok(Some(byte));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Where the interpreter loop gets its lines from.
pub trait LineSource {
    /// Shows `prompt` and returns the next line, or `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// A [`LineReader`] that writes the prompt to an output stream before each read.
pub struct PromptedReader<R, W> {
    reader: LineReader<R>,
    output: W,
}

impl<R: BufRead, W: Write> PromptedReader<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            reader: LineReader::new(input),
            output,
        }
    }
}

impl<R: BufRead, W: Write> LineSource for PromptedReader<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;
        Ok(self.reader.read_line()?)
    }
}

/// Line source backed by the rustyline editor, with in-memory history.
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let line = editor_line(self.editor.readline(prompt))?;
        if let Some(line) = &line {
            if !line.trim().is_empty() {
                self.editor.add_history_entry(line.as_str())?;
            }
        }
        Ok(line)
    }
}

/// Maps what the editor returned onto the [`LineSource`] contract.
fn editor_line(result: rustyline::Result<String>) -> Result<Option<String>> {
    match result {
        Ok(line) => Ok(Some(line)),
        // Ctrl-C drops the current line and prompts again
        Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
        Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
