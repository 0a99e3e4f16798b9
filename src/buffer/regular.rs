use std::{ops::{RangeBounds, Bound}, fmt::Debug};
use crossbeam::atomic::AtomicCell;
use crate::{core::*, Element};
use super::{Accessor, AccessMode, MemAccess};

/// Device-visible memory region.\
/// A buffer either owns its contents or wraps a mutable host slice, in which case the contents are written back to the
/// host slice when the buffer is dropped.
/// ```rust
/// use ember_rs::prelude::*;
///
/// let mut host = [1, 2, 3];
/// {
///     let mut buffer = Buffer::from_host(&mut host);
///     let acc = buffer.access::<ReadWrite>();
///     acc.set(0, 10);
/// }
///
/// assert_eq!(host, [10, 2, 3]);
/// ```
pub struct Buffer<'host, T: Element> {
    storage: Box<[AtomicCell<T>]>,
    host: Option<&'host mut [T]>
}

impl<T: Element> Buffer<'static, T> {
    /// Creates a new buffer with a copy of `v`
    #[inline]
    pub fn new (v: &[T]) -> Self {
        Self { storage: copy_in(v), host: None }
    }

    /// Creates a new zero-initialized buffer
    #[inline]
    pub fn zeroed (len: usize) -> Self {
        let storage = (0..len).map(|_| AtomicCell::new(T::zeroed())).collect();
        Self { storage, host: None }
    }
}

impl<'host, T: Element> Buffer<'host, T> {
    /// Wraps a host slice. The buffer's contents are written back into `host` when it's dropped.
    #[inline]
    pub fn from_host (host: &'host mut [T]) -> Self {
        Self { storage: copy_in(host), host: Some(host) }
    }

    #[inline(always)]
    pub fn len (&self) -> usize {
        self.storage.len()
    }

    #[inline(always)]
    pub fn is_empty (&self) -> bool {
        self.storage.is_empty()
    }

    /// Returns `true` if the buffer writes back to host memory on drop
    #[inline(always)]
    pub fn is_host_backed (&self) -> bool {
        self.host.is_some()
    }

    /// Creates an accessor to be passed to a kernel. [`DiscardWrite`](super::DiscardWrite) accessors zero the buffer's contents.
    pub fn access<M: AccessMode> (&mut self) -> Accessor<'_, T, M> {
        if let MemAccess::DiscardWrite = M::ACCESS {
            self.storage.iter().for_each(|x| x.store(T::zeroed()));
        }

        Accessor::new(&self.storage)
    }

    /// Returns a copy of the element at `idx`, or `None` if out of bounds
    #[inline(always)]
    pub fn get (&self, idx: usize) -> Option<T> {
        self.storage.get(idx).map(AtomicCell::load)
    }

    #[inline]
    pub fn to_vec (&self) -> Vec<T> {
        self.storage.iter().map(AtomicCell::load).collect()
    }

    /// Reads the specified range of the buffer into a new vector.
    pub fn read (&self, range: impl RangeBounds<usize>) -> Result<Vec<T>> {
        let (start, end) = offset_range(range, self.len())?;
        Ok(self.storage[start..end].iter().map(AtomicCell::load).collect())
    }

    /// Writes `src` into the buffer, starting at `offset`.
    pub fn write (&mut self, offset: usize, src: &[T]) -> Result<()> {
        let end = offset.checked_add(src.len())
            .filter(|&end| end <= self.len())
            .ok_or_else(|| Error::new(ErrorType::InvalidValue, format!("write of {} elements at offset {offset} overflows a buffer of {} elements", src.len(), self.len())))?;

        self.storage[offset..end].iter()
            .zip(src)
            .for_each(|(dst, &v)| dst.store(v));

        Ok(())
    }
}

impl<T: Element> Drop for Buffer<'_, T> {
    fn drop(&mut self) {
        if let Some(host) = self.host.take() {
            host.iter_mut()
                .zip(self.storage.iter())
                .for_each(|(dst, src)| *dst = src.load());
        }
    }
}

impl<T: Element> Debug for Buffer<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.storage.iter().map(AtomicCell::load)).finish()
    }
}

impl<T: Element + PartialEq> PartialEq for Buffer<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.storage.iter().zip(other.storage.iter()).all(|(x, y)| x.load() == y.load())
    }
}

#[inline(always)]
fn copy_in<T: Element> (v: &[T]) -> Box<[AtomicCell<T>]> {
    v.iter().copied().map(AtomicCell::new).collect()
}

pub(crate) fn offset_range (range: impl RangeBounds<usize>, len: usize) -> Result<(usize, usize)> {
    let start = match range.start_bound() {
        Bound::Included(&x) => Some(x),
        Bound::Excluded(&x) => x.checked_add(1),
        Bound::Unbounded => Some(0)
    };

    let end = match range.end_bound() {
        Bound::Included(&x) => x.checked_add(1),
        Bound::Excluded(&x) => Some(x),
        Bound::Unbounded => Some(len)
    };

    match (start, end) {
        (Some(start), Some(end)) if start <= end && end <= len => Ok((start, end)),
        _ => Err(Error::new(ErrorType::InvalidValue, format!("range out of bounds for a buffer of {len} elements")))
    }
}
