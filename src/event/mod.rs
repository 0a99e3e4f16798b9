flat_mod!(profiling);

use std::time::SystemTime;
use crate::core::*;

/// Kind of command an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    /// Launch over an nd-range, with groups and barriers
    NdRangeKernel,
    /// Flat launch, without groups
    Kernel
}

/// Completion token of a kernel launch.\
/// Launches are blocking, so an event always describes a command that has already completed successfully.
#[derive(Debug, Clone)]
pub struct KernelEvent {
    name: String,
    ty: CommandType,
    global_size: usize,
    group_count: usize,
    profiling: Option<ProfilingInfo<SystemTime>>
}

impl KernelEvent {
    #[inline(always)]
    pub(crate) fn new (name: &str, ty: CommandType, global_size: usize, group_count: usize, profiling: Option<ProfilingInfo<SystemTime>>) -> Self {
        Self { name: name.to_string(), ty, global_size, group_count, profiling }
    }

    /// Name of the kernel that was launched
    #[inline(always)]
    pub fn name (&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn command_type (&self) -> CommandType {
        self.ty
    }

    /// Number of work items that were run
    #[inline(always)]
    pub fn global_size (&self) -> usize {
        self.global_size
    }

    /// Number of groups that were run. Flat launches count as a single group.
    #[inline(always)]
    pub fn group_count (&self) -> usize {
        self.group_count
    }

    /// Returns the launch's timestamps.
    /// # Errors
    /// Returns [`ErrorType::ProfilingInfoNotAvailable`] if the queue wasn't created with
    /// [`QueueProperties::PROFILING_ENABLE`]
    #[inline]
    pub fn profiling_info (&self) -> Result<ProfilingInfo<SystemTime>> {
        self.profiling.ok_or_else(|| Error::new(ErrorType::ProfilingInfoNotAvailable, "queue was created without profiling enabled"))
    }
}
