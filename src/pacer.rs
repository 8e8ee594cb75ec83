//! Paced writes to the printer.
//!
//! The printer has no flow control we can rely on, so the host waits after
//! each block of data for the print head to catch up: proportionally to the
//! text length for text, and a fixed time per bitmap row.

use log::trace;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::error::Error;

/// Text is written at most this many characters at a time.
pub const CHUNK_SIZE: usize = 800;

/// Wait per character of text written.
pub const CHAR_DELAY: Duration = Duration::from_millis(5);

/// Wait after each bitmap row.
pub const ROW_DELAY: Duration = Duration::from_millis(34);

/// Byte sink the printer is attached to.
///
/// `close` is called once after the last byte of a document. Dropping the
/// sink without calling it must still release the underlying resource.
pub trait Sink: Write {
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl Sink for Vec<u8> {}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Blocking wait between writes.
pub trait Delay {
    fn delay(&mut self, duration: Duration);
}

/// Waits with [`std::thread::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleep;

impl Delay for ThreadSleep {
    fn delay(&mut self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay(&mut self, duration: Duration) {
        (**self).delay(duration)
    }
}

/// Writes encoded commands to a sink with the waits the hardware needs.
pub struct Pacer<W, D = ThreadSleep> {
    sink: W,
    delay: D,
}

impl<W: Sink> Pacer<W> {
    pub fn new(sink: W) -> Self {
        Self::with_delay(sink, ThreadSleep)
    }
}

impl<W: Sink, D: Delay> Pacer<W, D> {
    pub fn with_delay(sink: W, delay: D) -> Self {
        Pacer { sink, delay }
    }

    /// Write text in chunks of [`CHUNK_SIZE`] characters, waiting
    /// [`CHAR_DELAY`] per character after each chunk.
    ///
    /// A chunk always ends on a character boundary.
    pub fn write_text(&mut self, text: &str) -> Result<(), Error> {
        let mut rest = text;
        while !rest.is_empty() {
            let (end, count) = match rest.char_indices().nth(CHUNK_SIZE) {
                Some((end, _)) => (end, CHUNK_SIZE),
                None => (rest.len(), rest.chars().count()),
            };
            let (chunk, tail) = rest.split_at(end);
            self.write(chunk.as_bytes())?;
            self.delay.delay(CHAR_DELAY * count as u32);
            rest = tail;
        }
        Ok(())
    }

    /// Write one encoded bitmap row, then wait [`ROW_DELAY`].
    pub fn write_image_row(&mut self, row: &[u8]) -> Result<(), Error> {
        self.write(row)?;
        self.delay.delay(ROW_DELAY);
        Ok(())
    }

    /// Write control bytes without waiting.
    pub fn write_raw(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.write(buf)
    }

    pub fn close(&mut self) -> Result<(), Error> {
        self.sink.close()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        trace!("write {} bytes", buf.len());
        self.sink.write_all(buf)?;
        Ok(())
    }
}
