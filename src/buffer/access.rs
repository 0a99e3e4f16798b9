use std::{marker::PhantomData, fmt::Debug};
use crossbeam::atomic::AtomicCell;
use crate::Element;

/// Memory access mode, as seen by a kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemAccess {
    /// Kernels may only read the buffer
    Read,
    /// Kernels may read and write the buffer
    ReadWrite,
    /// Kernels may only write the buffer. Previous contents are discarded when the accessor is created.
    DiscardWrite
}

impl MemAccess {
    #[inline(always)]
    pub const fn can_read (self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }

    #[inline(always)]
    pub const fn can_write (self) -> bool {
        matches!(self, Self::ReadWrite | Self::DiscardWrite)
    }
}

/// Type-level access mode of an [`Accessor`]
pub trait AccessMode: 'static + Send + Sync {
    const ACCESS : MemAccess;
}

/// Access modes that allow reading
pub trait Readable: AccessMode {}
/// Access modes that allow writing
pub trait Writable: AccessMode {}

/// `read` access mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Read;
/// `read_write` access mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReadWrite;
/// `discard_write` access mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DiscardWrite;

impl AccessMode for Read {
    const ACCESS : MemAccess = MemAccess::Read;
}

impl AccessMode for ReadWrite {
    const ACCESS : MemAccess = MemAccess::ReadWrite;
}

impl AccessMode for DiscardWrite {
    const ACCESS : MemAccess = MemAccess::DiscardWrite;
}

impl Readable for Read {}
impl Readable for ReadWrite {}
impl Writable for ReadWrite {}
impl Writable for DiscardWrite {}

/// In-kernel view of a [`Buffer`](super::Buffer), with its access mode encoded in the type.
pub struct Accessor<'a, T, M> {
    data: &'a [AtomicCell<T>],
    phtm: PhantomData<M>
}

impl<'a, T: Element, M: AccessMode> Accessor<'a, T, M> {
    #[inline(always)]
    pub(super) fn new (data: &'a [AtomicCell<T>]) -> Self {
        Self { data, phtm: PhantomData }
    }

    #[inline(always)]
    pub fn len (&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty (&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    pub fn mode (&self) -> MemAccess {
        M::ACCESS
    }
}

impl<T: Element, M: Readable> Accessor<'_, T, M> {
    /// Reads the element at `idx`.
    /// # Panics
    /// Panics if `idx` is out of bounds
    #[inline(always)]
    pub fn get (&self, idx: usize) -> T {
        self.data[idx].load()
    }
}

impl<T: Element, M: Writable> Accessor<'_, T, M> {
    /// Writes `v` at `idx`.
    /// # Panics
    /// Panics if `idx` is out of bounds
    #[inline(always)]
    pub fn set (&self, idx: usize, v: T) {
        self.data[idx].store(v)
    }
}

impl<T, M> Clone for Accessor<'_, T, M> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self { data: self.data, phtm: PhantomData }
    }
}

impl<T, M: AccessMode> Debug for Accessor<'_, T, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accessor")
            .field("len", &self.data.len())
            .field("mode", &M::ACCESS)
            .finish()
    }
}
