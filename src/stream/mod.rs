flat_mod!(logger, buffered);

use std::{sync::Arc, fmt::Arguments};

/// In-kernel debug output channel.\
/// Statements written from different work items (and groups) arrive in no particular order,
/// and delivery is best-effort: sinks are free to drop output.
pub trait DebugSink: Send + Sync {
    /// Writes a single statement
    fn write (&self, text: &str);

    /// Returns `false` if every statement would be discarded, allowing callers to skip formatting.
    #[inline(always)]
    fn enabled (&self) -> bool {
        true
    }

    /// Called once after every launch has completed.
    #[inline(always)]
    fn flush (&self) {}

    /// Formats and writes a statement, if the sink is enabled.
    #[inline]
    fn write_fmt (&self, args: Arguments<'_>) {
        if !self.enabled() { return }
        match args.as_str() {
            Some(text) => self.write(text),
            None => self.write(&args.to_string())
        }
    }
}

/// Sink that discards everything. Default sink of every queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Noop;

impl DebugSink for Noop {
    #[inline(always)]
    fn write (&self, _: &str) {}

    #[inline(always)]
    fn enabled (&self) -> bool {
        false
    }
}

impl<T: ?Sized + DebugSink> DebugSink for &'_ T {
    #[inline(always)]
    fn write (&self, text: &str) {
        T::write(self, text)
    }

    #[inline(always)]
    fn enabled (&self) -> bool {
        T::enabled(self)
    }

    #[inline(always)]
    fn flush (&self) {
        T::flush(self)
    }
}

impl<T: ?Sized + DebugSink> DebugSink for Arc<T> {
    #[inline(always)]
    fn write (&self, text: &str) {
        T::write(self, text)
    }

    #[inline(always)]
    fn enabled (&self) -> bool {
        T::enabled(self)
    }

    #[inline(always)]
    fn flush (&self) {
        T::flush(self)
    }
}

impl<T: ?Sized + DebugSink> DebugSink for Box<T> {
    #[inline(always)]
    fn write (&self, text: &str) {
        T::write(self, text)
    }

    #[inline(always)]
    fn enabled (&self) -> bool {
        T::enabled(self)
    }

    #[inline(always)]
    fn flush (&self) {
        T::flush(self)
    }
}
