use log::Level;
use super::DebugSink;

/// Log target used by [`LogSink`]
pub const STREAM_TARGET : &str = "ember::stream";

/// Sink that forwards every statement to the [`log`] facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogSink {
    level: Level
}

impl LogSink {
    #[inline(always)]
    pub const fn new (level: Level) -> Self {
        Self { level }
    }

    #[inline(always)]
    pub const fn level (&self) -> Level {
        self.level
    }
}

impl Default for LogSink {
    #[inline(always)]
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

impl DebugSink for LogSink {
    #[inline]
    fn write (&self, text: &str) {
        log::log!(target: STREAM_TARGET, self.level, "{text}")
    }

    #[inline(always)]
    fn enabled (&self) -> bool {
        log::log_enabled!(target: STREAM_TARGET, self.level)
    }
}
