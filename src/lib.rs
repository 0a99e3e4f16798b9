#![allow(clippy::needless_return)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! A Rustified work-group compute experience.
//!
//! `ember` runs data-parallel kernels on the host with the execution model of an accelerator: work items are
//! partitioned into groups that share a zero-initialized local memory arena and synchronize through barriers,
//! while groups run independently of each other on the device's compute units.
//!
//! ```rust
//! use ember_rs::prelude::*;
//!
//! # fn main () -> Result<()> {
//! let queue = Queue::global()?;
//! let mut a = buffer![1, 2, 3, 4];
//! let mut b = buffer![0; 4];
//!
//! let src = a.access::<Read>();
//! let dst = b.access::<DiscardWrite>();
//! queue.parallel_for(4, &|item: Item<'_>| dst.set(item.id(), 2 * src.get(item.id())))?;
//!
//! assert_eq!(b.to_vec(), vec![2, 4, 6, 8]);
//! # Ok(())
//! # }
//! ```

use std::fmt::Debug;
use bytemuck::Zeroable;

macro_rules! flat_mod {
    ($($i:ident),+) => {
        $(
            mod $i;
            pub use $i::*;
        )+
    };
}

pub mod prelude {
    pub use crate::buffer::{Buffer, Accessor, AccessMode, MemAccess, Read, ReadWrite, DiscardWrite};
    pub use crate::core::*;
    pub use crate::event::{KernelEvent, ProfilingInfo};
    pub use crate::kernel::{Kernel, SimpleKernel, NdRange, NdItem, Item, LocalMemory};
    pub use crate::stream::{DebugSink, Noop, LogSink, Stream};
    pub use crate::{buffer, Element};
}

/// Ember buffers
pub mod buffer;
/// Devices, queues and errors
pub mod core;
/// Launch completion tokens
pub mod event;
/// Kernels and their execution model
pub mod kernel;
/// In-kernel debug output
pub mod stream;

/// Types that can be stored in buffers and group-local memory.
pub trait Element: 'static + Copy + Send + Sync + Debug + Zeroable {}
impl<T: 'static + Copy + Send + Sync + Debug + Zeroable> Element for T {}
