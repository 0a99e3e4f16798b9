use std::fmt::Arguments;
use crate::stream::DebugSink;
use super::{NdRange, GroupBarrier, LocalMemory};

/// Work item of a flat [`parallel_for`](crate::core::Queue::parallel_for) launch
#[derive(Clone, Copy)]
pub struct Item<'a> {
    id: usize,
    range: usize,
    sink: &'a dyn DebugSink
}

impl<'a> Item<'a> {
    #[inline(always)]
    pub(crate) fn new (id: usize, range: usize, sink: &'a dyn DebugSink) -> Self {
        Self { id, range, sink }
    }

    /// Position of the item within the launch
    #[inline(always)]
    pub fn id (&self) -> usize {
        self.id
    }

    /// Number of items in the launch
    #[inline(always)]
    pub fn range (&self) -> usize {
        self.range
    }

    /// Writes a statement to the launch's debug sink
    #[inline(always)]
    pub fn debug (&self, args: Arguments<'_>) {
        self.sink.write_fmt(args)
    }
}

/// Work item of an nd-range [`submit`](crate::core::Queue::submit) launch.\
/// Besides its position, an item has access to its group's barrier and group-local memory.
pub struct NdItem<'a, L> {
    local_id: usize,
    group_id: usize,
    range: NdRange,
    barrier: &'a GroupBarrier,
    local: &'a LocalMemory<L>,
    sink: &'a dyn DebugSink
}

impl<'a, L> NdItem<'a, L> {
    #[inline(always)]
    pub(crate) fn new (local_id: usize, group_id: usize, range: NdRange, barrier: &'a GroupBarrier, local: &'a LocalMemory<L>, sink: &'a dyn DebugSink) -> Self {
        Self { local_id, group_id, range, barrier, local, sink }
    }

    /// Position of the item within its group
    #[inline(always)]
    pub fn local_id (&self) -> usize {
        self.local_id
    }

    /// Position of the item within the whole launch
    #[inline(always)]
    pub fn global_id (&self) -> usize {
        self.group_id * self.range.local_size() + self.local_id
    }

    /// Position of the item's group within the launch
    #[inline(always)]
    pub fn group_id (&self) -> usize {
        self.group_id
    }

    /// Number of items per group
    #[inline(always)]
    pub fn local_range (&self) -> usize {
        self.range.local_size()
    }

    /// Number of items in the launch
    #[inline(always)]
    pub fn global_range (&self) -> usize {
        self.range.global_size()
    }

    /// Number of groups in the launch
    #[inline(always)]
    pub fn group_range (&self) -> usize {
        self.range.group_count()
    }

    /// Launch geometry
    #[inline(always)]
    pub fn nd_range (&self) -> NdRange {
        self.range
    }

    /// Blocks until every item of the group has reached this point.
    #[inline(always)]
    pub fn barrier (&self) {
        self.barrier.wait()
    }

    /// The group's local memory arena
    #[inline(always)]
    pub fn local_mem (&self) -> &'a LocalMemory<L> {
        self.local
    }

    /// Writes a statement to the launch's debug sink
    #[inline(always)]
    pub fn debug (&self, args: Arguments<'_>) {
        self.sink.write_fmt(args)
    }
}
