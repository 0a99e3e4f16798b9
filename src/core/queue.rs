use std::{sync::Arc, time::SystemTime, fmt::Debug};
use once_cell::sync::OnceCell;
use crate::{event::{KernelEvent, CommandType, ProfilingInfo}, kernel::{Kernel, SimpleKernel, NdRange, dispatch}, stream::{DebugSink, Noop}};
use super::*;

bitflags::bitflags! {
    /// Command queue properties
    #[derive(Default)]
    pub struct QueueProperties: u32 {
        /// Record timestamps for every launch (see [`KernelEvent::profiling_info`])
        const PROFILING_ENABLE = 1 << 1;
        /// Run groups one at a time, in group order, on the submitting thread
        const SEQUENTIAL_GROUPS = 1 << 8;
    }
}

static GLOBAL : OnceCell<Queue> = OnceCell::new();

/// Submission channel of a [`Device`].\
/// Launches are blocking: they return once every work item has finished, and the returned [`KernelEvent`]
/// acts as the launch's completion token.
#[derive(Clone)]
pub struct Queue {
    device: Device,
    props: QueueProperties,
    sink: Arc<dyn DebugSink>
}

impl Queue {
    #[inline(always)]
    pub fn new (device: Device) -> Self {
        Self::with_properties(device, QueueProperties::default())
    }

    #[inline(always)]
    pub fn with_properties (device: Device, props: QueueProperties) -> Self {
        Self { device, props, sink: Arc::new(Noop) }
    }

    /// Returns the global queue, created on [`Device::host`] the first time it's requested.
    #[inline]
    pub fn global () -> Result<&'static Queue> {
        GLOBAL.get_or_try_init(|| Device::host().map(Queue::new))
    }

    /// Replaces the queue's debug sink. Kernels launched on this queue write their debug output to `sink`.
    #[inline(always)]
    pub fn with_sink (mut self, sink: impl DebugSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    #[inline(always)]
    pub fn device (&self) -> &Device {
        &self.device
    }

    #[inline(always)]
    pub fn properties (&self) -> QueueProperties {
        self.props
    }

    #[inline(always)]
    pub fn sink (&self) -> &dyn DebugSink {
        &*self.sink
    }

    /// Launches `kernel` over `range`, blocking until every work item has finished.
    /// # Errors
    /// - [`ErrorType::InvalidWorkGroupSize`] if the group size exceeds the device's maximum
    /// - [`ErrorType::OutOfResources`] if the kernel's group-local memory doesn't fit the device, or a worker thread couldn't be started
    /// - [`ErrorType::WorkItemPanic`] if a work item panicked
    /// - [`ErrorType::BarrierDivergence`] if work items of a group disagreed on the barriers they reached (`strict` feature)
    pub fn submit<K: ?Sized + Kernel> (&self, range: NdRange, kernel: &K) -> Result<KernelEvent> {
        let queued = SystemTime::now();
        let local_bytes = kernel.local_len(&range)
            .checked_mul(core::mem::size_of::<K::Local>())
            .unwrap_or(usize::MAX);

        self.device.check_launch(range.local_size(), local_bytes)?;
        log::debug!("enqueueing '{}' over {range} ({local_bytes} bytes of local memory)", kernel.name());

        let submit = SystemTime::now();
        let result = dispatch::nd_range(kernel, range, self.workers(), &*self.sink);
        let end = SystemTime::now();
        self.sink.flush();

        if let Err(ref e) = result {
            log::debug!("'{}' failed: {e}", kernel.name());
        }
        result?;

        let profiling = self.profiling(queued, submit, end);
        Ok(KernelEvent::new(kernel.name(), CommandType::NdRangeKernel, range.global_size(), range.group_count(), profiling))
    }

    /// Launches `kernel` over `len` work items, without groups, blocking until every work item has finished.
    /// # Errors
    /// - [`ErrorType::InvalidGlobalWorkSize`] if `len` is zero
    /// - [`ErrorType::WorkItemPanic`] if a work item panicked
    /// - [`ErrorType::OutOfResources`] if a worker thread couldn't be started
    pub fn parallel_for<K: ?Sized + SimpleKernel> (&self, len: usize, kernel: &K) -> Result<KernelEvent> {
        let queued = SystemTime::now();
        if len == 0 {
            return Err(Error::new(ErrorType::InvalidGlobalWorkSize, "global work size must be non-zero"));
        }

        log::debug!("enqueueing '{}' over {len} items", kernel.name());

        let submit = SystemTime::now();
        let result = dispatch::flat(kernel, len, self.workers(), &*self.sink);
        let end = SystemTime::now();
        self.sink.flush();
        result?;

        let profiling = self.profiling(queued, submit, end);
        Ok(KernelEvent::new(kernel.name(), CommandType::Kernel, len, 1, profiling))
    }

    #[inline(always)]
    fn workers (&self) -> usize {
        match self.props.contains(QueueProperties::SEQUENTIAL_GROUPS) {
            true => 1,
            false => self.device.compute_units().get()
        }
    }

    #[inline(always)]
    fn profiling (&self, queued: SystemTime, submit: SystemTime, end: SystemTime) -> Option<ProfilingInfo<SystemTime>> {
        match self.props.contains(QueueProperties::PROFILING_ENABLE) {
            // launches start as soon as they're submitted
            true => Some(ProfilingInfo::new(queued, submit, submit, end)),
            false => None
        }
    }
}

impl Debug for Queue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Queue")
            .field("device", &self.device)
            .field("props", &self.props)
            .field("sink_enabled", &self.sink.enabled())
            .finish()
    }
}
