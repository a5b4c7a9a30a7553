use anyhow::{Context, Result};
use crossterm::style::{StyledContent, Stylize};
use std::{
    io::{stderr, stdout, IsTerminal, Stderr, Stdout, StdoutLock, Write},
    ops::Drop,
};

/// Traditional block size in bytes
const BLOCK_SIZE: usize = 512;

/// Contains behavior to write report lines to output.
pub trait OutputWriter {
    fn writeln(&mut self, txt: &str) -> Result<()>;

    /// Writes `name` with its verdict, followed by `reason` when there is one.
    fn write_verdict(&mut self, name: &str, reason: Option<&str>) -> Result<()> {
        match reason {
            None => self.writeln(&format!("{} {name}", verdict(true))),
            Some(reason) => self.writeln(&format!("{} {name}: {reason}", verdict(false))),
        }
    }
}

/// Writes directly to stdout, one line at a time.
pub struct LineBufferedOutputWriter<'a> {
    stdout_lock: StdoutLock<'a>,
}

/// Writes to stdout a block at a time. Anything left in the buffer is flushed on drop.
pub struct BlockBufferedOutputWriter<'a> {
    stdout_lock: StdoutLock<'a>,
    buffer: Vec<u8>,
}

/// Entry-point for the rest of the application to access handlers to stdout and stderr.
/// Colorization is enabled only when stdout is a terminal and `NO_COLOR` is blank.
#[derive(Debug)]
pub struct TtyContext {
    pub stdout: Stdout,
    pub stderr: Stderr,
}

impl Default for TtyContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TtyContext {
    pub fn new() -> Self {
        let stdout = stdout();
        let stdout_is_terminal = stdout.is_terminal();
        log::debug!("stdout is terminal: {stdout_is_terminal}");

        let enable_color =
            stdout_is_terminal && std::env::var("NO_COLOR").unwrap_or_default().is_empty();
        log::debug!("color enabled: {enable_color}");
        crossterm::style::force_color_output(enable_color);

        Self {
            stdout,
            stderr: stderr(),
        }
    }

    pub fn write_err(&mut self, err: &str) -> Result<()> {
        writeln!(self.stderr, "{err}")?;
        Ok(())
    }
}

/// A [LineBufferedOutputWriter] when stdout is a terminal or `line_buffered` is set, and a
/// [BlockBufferedOutputWriter] otherwise.
pub fn init_output_writer(tty: &TtyContext, line_buffered: bool) -> Box<dyn OutputWriter> {
    let stdout = tty.stdout.lock();

    if tty.stdout.is_terminal() || line_buffered {
        log::debug!("line buffered");
        return Box::new(LineBufferedOutputWriter::new(stdout));
    }
    log::debug!("block buffered");
    Box::new(BlockBufferedOutputWriter::new(stdout))
}

impl<'a> LineBufferedOutputWriter<'a> {
    pub fn new(stdout_lock: StdoutLock<'a>) -> Self {
        Self { stdout_lock }
    }
}

impl<'a> BlockBufferedOutputWriter<'a> {
    pub fn new(stdout_lock: StdoutLock<'a>) -> Self {
        Self {
            stdout_lock,
            buffer: Vec::with_capacity(BLOCK_SIZE),
        }
    }

    fn flush_buffer(&mut self) -> Result<()> {
        if !self.buffer.is_empty() {
            self.stdout_lock
                .write_all(&self.buffer)
                .context("failed to write buffer to stdout")?;
            self.buffer.clear();
        }
        Ok(())
    }
}

impl OutputWriter for LineBufferedOutputWriter<'_> {
    fn writeln(&mut self, txt: &str) -> Result<()> {
        writeln!(&mut self.stdout_lock, "{txt}")
            .context("something went wrong while trying to write to stdout")
    }
}

impl OutputWriter for BlockBufferedOutputWriter<'_> {
    fn writeln(&mut self, txt: &str) -> Result<()> {
        if self.buffer.len() + txt.len() + 1 > BLOCK_SIZE {
            self.flush_buffer()?;
        }
        self.buffer.extend_from_slice(txt.as_bytes());
        self.buffer.push(b'\n');

        if self.buffer.len() >= BLOCK_SIZE {
            self.flush_buffer()?;
        }
        Ok(())
    }
}

impl Drop for BlockBufferedOutputWriter<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.flush_buffer() {
            log::warn!("failed to flush buffered verdicts before dropping: {e}");
        }
    }
}

/// `valid` in green or `invalid` in red, subject to the color setting.
pub fn verdict(is_valid: bool) -> StyledContent<&'static str> {
    if is_valid {
        "valid".green()
    } else {
        "invalid".red().bold()
    }
}
