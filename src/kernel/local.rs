use std::fmt::Debug;
use crossbeam::atomic::AtomicCell;
use crate::Element;

/// Group-local scratch memory.\
/// Every running group gets its own zero-initialized arena, which is dropped as soon as the group finishes.
/// Writes made by one work item are guaranteed to be visible to the rest of the group after the next
/// [barrier](super::NdItem::barrier).
pub struct LocalMemory<T> {
    slots: Box<[AtomicCell<T>]>
}

impl<T: Element> LocalMemory<T> {
    #[inline]
    pub fn new (len: usize) -> Self {
        let slots = (0..len).map(|_| AtomicCell::new(T::zeroed())).collect();
        Self { slots }
    }

    #[inline(always)]
    pub fn len (&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    pub fn is_empty (&self) -> bool {
        self.slots.is_empty()
    }

    /// # Panics
    /// Panics if `idx` is out of bounds
    #[inline(always)]
    pub fn get (&self, idx: usize) -> T {
        self.slots[idx].load()
    }

    /// # Panics
    /// Panics if `idx` is out of bounds
    #[inline(always)]
    pub fn set (&self, idx: usize, v: T) {
        self.slots[idx].store(v)
    }
}

impl<T: Element> Debug for LocalMemory<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.slots.iter().map(AtomicCell::load)).finish()
    }
}
