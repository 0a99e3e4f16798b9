flat_mod!(range, item, local, barrier);
pub(crate) mod dispatch;

use crate::Element;

/// Kernel launched over an [`NdRange`].\
/// The implementing type is the kernel's parameter block: accessors and plain values the kernel reads,
/// with each accessor's access mode spelled out in its type.
///
/// ```rust
/// use ember_rs::prelude::*;
///
/// /// Reverses every group of `data` in place
/// struct Reverse<'a> {
///     data: Accessor<'a, u32, ReadWrite>
/// }
///
/// impl Kernel for Reverse<'_> {
///     type Local = u32;
///
///     fn local_len (&self, range: &NdRange) -> usize {
///         range.local_size()
///     }
///
///     fn run (&self, item: &NdItem<'_, u32>) {
///         let scratch = item.local_mem();
///         scratch.set(item.local_id(), self.data.get(item.global_id()));
///         item.barrier();
///
///         let mirror = item.local_range() - 1 - item.local_id();
///         self.data.set(item.global_id(), scratch.get(mirror));
///     }
/// }
///
/// # fn main () -> Result<()> {
/// let queue = Queue::new(Device::host()?);
/// let mut buffer = buffer![1, 2, 3, 4, 5, 6];
///
/// let kernel = Reverse { data: buffer.access() };
/// queue.submit(NdRange::new(6, 3)?, &kernel)?;
///
/// assert_eq!(buffer.to_vec(), vec![3, 2, 1, 6, 5, 4]);
/// # Ok(())
/// # }
/// ```
pub trait Kernel: Sync {
    /// Element type of the group-local memory arena
    type Local: Element;

    /// Kernel name, as reported by events and logs
    #[inline(always)]
    fn name (&self) -> &str {
        core::any::type_name::<Self>()
    }

    /// Number of group-local elements every group needs
    fn local_len (&self, range: &NdRange) -> usize;

    /// Runs a single work item
    fn run (&self, item: &NdItem<'_, Self::Local>);
}

/// Kernel launched over a flat range, without groups or barriers.
pub trait SimpleKernel: Sync {
    /// Kernel name, as reported by events and logs
    #[inline(always)]
    fn name (&self) -> &str {
        core::any::type_name::<Self>()
    }

    /// Runs a single work item
    fn run (&self, item: Item<'_>);
}

impl<F: Sync + Fn(Item<'_>)> SimpleKernel for F {
    #[inline(always)]
    fn run (&self, item: Item<'_>) {
        (self)(item)
    }
}
