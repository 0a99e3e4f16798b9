use ember_rs::prelude::*;
use crate::Real;

/// Tree reduction of consecutive chunks of `2 × work_group_size` elements.\
/// Launched over `len / 2` work items: every item adds up a pair of inputs into group-local memory, and the group then
/// folds its arena in `log2(work_group_size)` halving rounds, separated by barriers. The first item of every group
/// writes the group's total into `output[group_id]`.
///
/// The group size must be a power of two. Use [`reduction_range`] to build a valid launch geometry.
pub struct ReduceSum<'a, T: Real> {
    /// Values to add up. Read-only.
    pub input: Accessor<'a, T, Read>,
    /// One partial sum per group. Write-only.
    pub output: Accessor<'a, T, DiscardWrite>,
    /// Number of live elements at the start of `input`. Read-only.
    pub len: usize
}

impl<T: Real> Kernel for ReduceSum<'_, T> {
    type Local = T;

    #[inline(always)]
    fn name (&self) -> &str {
        "reduce_sum"
    }

    #[inline(always)]
    fn local_len (&self, range: &NdRange) -> usize {
        range.local_size()
    }

    fn run (&self, item: &NdItem<'_, T>) {
        let local_id = item.local_id();
        let global_id = item.global_id();
        let wgs = item.local_range();
        let scratch = item.local_mem();

        item.debug(format_args!("local id: {local_id}"));
        item.debug(format_args!("global_id: {global_id}"));

        // Load into local memory, adding up pairs on the way
        scratch.set(local_id, T::zero());
        let first = 2 * global_id;
        if first < self.len {
            let mut pair = self.input.get(first);
            if first + 1 < self.len {
                pair = pair + self.input.get(first + 1);
            }
            scratch.set(local_id, pair);
        }

        item.barrier();

        // Reduce into one element
        let mut stride = 1;
        while stride < wgs {
            let idx = 2 * stride * local_id;
            if idx < wgs {
                scratch.set(idx, scratch.get(idx) + scratch.get(idx + stride));
            }

            item.barrier();
            stride *= 2;
        }

        // Write group result
        if local_id == 0 {
            self.output.set(item.group_id(), scratch.get(0));
        }
    }
}

/// Launch geometry of a [`ReduceSum`] over `len` elements.
/// # Errors
/// - [`ErrorType::InvalidWorkGroupSize`] if `work_group_size` is zero or not a power of two
/// - [`ErrorType::InvalidGlobalWorkSize`] if `len` is zero or not a multiple of `2 × work_group_size`
pub fn reduction_range (len: usize, work_group_size: usize) -> Result<NdRange> {
    if !work_group_size.is_power_of_two() {
        return Err(Error::new(
            ErrorType::InvalidWorkGroupSize,
            format!("work-group size must be a power of two, found {work_group_size}")
        ));
    }

    let chunk = work_group_size.checked_mul(2)
        .ok_or_else(|| Error::new(ErrorType::InvalidWorkGroupSize, format!("work-group size {work_group_size} is too large")))?;

    if len == 0 || len % chunk != 0 {
        return Err(Error::new(
            ErrorType::InvalidGlobalWorkSize,
            format!("input length must be a non-zero multiple of {chunk} (2 × work-group size), found {len}")
        ));
    }

    NdRange::new(len / 2, work_group_size)
}

/// Reduces `buffer` in place: after the call, element `g` holds the sum of elements `[2wg, 2wg + 2w)`, where `w` is
/// `work_group_size`. Elements past the partial sums are left untouched.
///
/// Returns the number of partial sums.
/// ```rust
/// use ember_rs::prelude::*;
/// use ember_kernels::reduce::reduce_sum;
///
/// # fn main () -> Result<()> {
/// let queue = Queue::global()?;
/// let mut buffer = buffer![3f32, 2., 3., 4., 5., 6., 7., 8.];
///
/// assert_eq!(reduce_sum(queue, &mut buffer, 4)?, 1);
/// assert_eq!(buffer.get(0), Some(38.));
/// # Ok(())
/// # }
/// ```
#[inline(always)]
pub fn reduce_sum<T: Real> (queue: &Queue, buffer: &mut Buffer<'_, T>, work_group_size: usize) -> Result<usize> {
    let len = buffer.len();
    reduce_sum_prefix(queue, buffer, len, work_group_size)
}

/// Same as [`reduce_sum`], but only reduces the first `len` elements of `buffer`.
pub fn reduce_sum_prefix<T: Real> (queue: &Queue, buffer: &mut Buffer<'_, T>, len: usize, work_group_size: usize) -> Result<usize> {
    if len > buffer.len() {
        return Err(Error::new(ErrorType::InvalidValue, format!("cannot reduce {len} elements of a buffer of {}", buffer.len())));
    }

    let range = reduction_range(len, work_group_size)?;
    let groups = range.group_count();

    // Groups write their results into a separate buffer, since a group's output slot may lie within the input of
    // another group that hasn't run yet.
    let mut partials = Buffer::<T>::zeroed(groups);
    let kernel = ReduceSum {
        input: buffer.access(),
        output: partials.access(),
        len
    };

    queue.submit(range, &kernel)?;
    buffer.write(0, &partials.to_vec())?;

    log::debug!("reduced {len} {}s into {groups} partial sum(s)", T::NAME);
    Ok(groups)
}

/// Largest power-of-two work-group size no larger than `max` that evenly splits `len` elements into
/// [`ReduceSum`] groups, or `None` if `len` cannot be reduced on the device.
pub fn work_group_size_for (len: usize, max: usize) -> Option<usize> {
    if len < 2 || len % 2 != 0 || max == 0 {
        return None;
    }

    let by_len = 1usize << (len / 2).trailing_zeros();
    let by_max = 1usize << (usize::BITS - 1 - max.leading_zeros());
    Some(usize::min(by_len, by_max))
}

/// Adds up every element of `buffer`.\
/// Runs [`ReduceSum`] passes over the partial sums for as long as they can be launched, and adds up whatever is left
/// on the host. The contents of `buffer` are overwritten with intermediate results.
pub fn sum<T: Real> (queue: &Queue, buffer: &mut Buffer<'_, T>) -> Result<T> {
    let max = max_work_group_size::<T>(queue.device());
    let mut len = buffer.len();

    while let Some(wgs) = work_group_size_for(len, max) {
        len = reduce_sum_prefix(queue, buffer, len, wgs)?;
    }

    let rest = buffer.read(..len)?;
    Ok(rest.into_iter().fold(T::zero(), |acc, x| acc + x))
}

/// Largest work-group size whose group-local arena fits the device
#[inline]
fn max_work_group_size<T: Real> (device: &Device) -> usize {
    let by_local = device.local_mem_size() / core::mem::size_of::<T>().max(1);
    device.max_work_group_size().get().min(by_local)
}
