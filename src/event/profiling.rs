use std::time::{Duration, SystemTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct ProfilingInfo<T> {
    /// Time at which the command was handed to the queue.
    pub queued: T,
    /// Time at which the command passed validation and was submitted to the device.
    pub submit: T,
    /// Time at which the device started executing the command.
    pub start: T,
    /// Time at which the device finished executing the command.
    pub end: T
}

impl ProfilingInfo<SystemTime> {
    #[inline(always)]
    pub(crate) fn new (queued: SystemTime, submit: SystemTime, start: SystemTime, end: SystemTime) -> Self {
        Self { queued, submit, start, end }
    }

    /// Time elapsed between [`ProfilingInfo::start`] and [`ProfilingInfo::end`]
    #[inline(always)]
    pub fn duration (&self) -> Duration {
        self.end.duration_since(self.start).unwrap_or_default()
    }

    /// Time elapsed between [`ProfilingInfo::queued`] and [`ProfilingInfo::end`]
    #[inline(always)]
    pub fn total_duration (&self) -> Duration {
        self.end.duration_since(self.queued).unwrap_or_default()
    }

    /// Converts the timestamps to nanoseconds since the unix epoch
    #[inline]
    pub fn as_nanos (&self) -> ProfilingInfo<u64> {
        ProfilingInfo {
            queued: nanos(self.queued),
            submit: nanos(self.submit),
            start: nanos(self.start),
            end: nanos(self.end)
        }
    }
}

impl ProfilingInfo<u64> {
    /// Time elapsed between [`ProfilingInfo::start`] and [`ProfilingInfo::end`]
    #[inline(always)]
    pub fn duration (&self) -> Duration {
        Duration::from_nanos(self.end.saturating_sub(self.start))
    }
}

#[inline(always)]
fn nanos (time: SystemTime) -> u64 {
    time.duration_since(std::time::UNIX_EPOCH)
        .map(|x| u64::try_from(x.as_nanos()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
