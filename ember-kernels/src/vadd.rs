use ember_rs::prelude::*;
use crate::Real;

/// Element-wise `c = a + b`
pub struct VectorAdd<'a, T: Real> {
    /// Left operand. Read-only.
    pub a: Accessor<'a, T, Read>,
    /// Right operand. Read-only.
    pub b: Accessor<'a, T, Read>,
    /// Result. Write-only.
    pub c: Accessor<'a, T, DiscardWrite>
}

impl<T: Real> SimpleKernel for VectorAdd<'_, T> {
    #[inline(always)]
    fn name (&self) -> &str {
        "vector_add"
    }

    #[inline(always)]
    fn run (&self, item: Item<'_>) {
        let i = item.id();
        self.c.set(i, self.a.get(i) + self.b.get(i));
    }
}

/// Computes `c = a + b`.
/// # Errors
/// Returns [`ErrorType::InvalidKernelArgs`] if the buffers don't have the same length.
/// ```rust
/// use ember_rs::prelude::*;
/// use ember_kernels::vadd::vector_add;
///
/// # fn main () -> Result<()> {
/// let mut a = buffer![1f32, 2., 3., 4.];
/// let mut b = buffer![5f32, 6., 7., 8.];
/// let mut c = Buffer::zeroed(4);
///
/// vector_add(Queue::global()?, &mut a, &mut b, &mut c)?;
/// assert_eq!(c.to_vec(), vec![6., 8., 10., 12.]);
/// # Ok(())
/// # }
/// ```
pub fn vector_add<T: Real> (queue: &Queue, a: &mut Buffer<'_, T>, b: &mut Buffer<'_, T>, c: &mut Buffer<'_, T>) -> Result<KernelEvent> {
    let len = a.len();
    if b.len() != len || c.len() != len {
        return Err(Error::new(
            ErrorType::InvalidKernelArgs,
            format!("operand lengths differ (a: {len}, b: {}, c: {})", b.len(), c.len())
        ));
    }

    let kernel = VectorAdd {
        a: a.access(),
        b: b.access(),
        c: c.access()
    };

    queue.parallel_for(len, &kernel)
}
