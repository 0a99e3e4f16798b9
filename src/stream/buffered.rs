use std::{io::{Write, Stdout}, sync::{Mutex, MutexGuard, PoisonError, atomic::{AtomicUsize, Ordering}}};
use super::DebugSink;

/// Buffered kernel output stream.\
/// Statements are collected while the kernel runs and written out, one per line, once the launch has completed.
/// Statements longer than `max_statement_size` bytes are truncated, and statements that don't fit in the remaining
/// `total_size` bytes of the buffer are dropped.
pub struct Stream<W: Write + Send = Stdout> {
    total_size: usize,
    max_statement_size: usize,
    buffer: Mutex<String>,
    dropped: AtomicUsize,
    writer: Mutex<W>
}

impl Stream {
    /// Creates a stream that flushes to the standard output
    #[inline(always)]
    pub fn stdout (total_size: usize, max_statement_size: usize) -> Self {
        Self::new(total_size, max_statement_size, std::io::stdout())
    }
}

impl<W: Write + Send> Stream<W> {
    #[inline]
    pub fn new (total_size: usize, max_statement_size: usize, writer: W) -> Self {
        Self {
            total_size,
            max_statement_size,
            buffer: Mutex::new(String::with_capacity(total_size)),
            dropped: AtomicUsize::new(0),
            writer: Mutex::new(writer)
        }
    }

    #[inline(always)]
    pub fn total_size (&self) -> usize {
        self.total_size
    }

    #[inline(always)]
    pub fn max_statement_size (&self) -> usize {
        self.max_statement_size
    }

    /// Number of statements dropped since the last flush.
    #[inline(always)]
    pub fn dropped (&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Locks the underlying writer
    #[inline(always)]
    pub fn writer (&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub fn into_inner (self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> DebugSink for Stream<W> {
    fn write (&self, text: &str) {
        let text = truncate(text, self.max_statement_size);
        let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);

        if buffer.len() + text.len() + 1 > self.total_size {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return;
        }

        buffer.push_str(text);
        buffer.push('\n');
    }

    fn flush (&self) {
        let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut writer = self.writer();

        if let Err(e) = writer.write_all(buffer.as_bytes()).and_then(|_| writer.flush()) {
            log::warn!("failed to flush kernel stream: {e}");
        }
        buffer.clear();

        let dropped = self.dropped.swap(0, Ordering::Relaxed);
        if dropped > 0 {
            log::warn!("kernel stream dropped {dropped} statement(s), buffer size is {} bytes", self.total_size);
        }
    }
}

#[inline]
fn truncate (text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }

    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
