use std::{panic::{catch_unwind, AssertUnwindSafe}, sync::atomic::{AtomicUsize, Ordering}, any::Any};
use crossbeam::thread::Scope;
use once_cell::sync::OnceCell;
use crate::{core::*, stream::DebugSink};
use super::{Kernel, SimpleKernel, NdRange, NdItem, Item, LocalMemory, GroupBarrier, Poisoned};

/// Runs every group of `range`, with at most `workers` groups in flight.
/// The first failing group stops new groups from starting.
pub(crate) fn nd_range<K: ?Sized + Kernel> (kernel: &K, range: NdRange, workers: usize, sink: &dyn DebugSink) -> Result<()> {
    let groups = range.group_count();
    let workers = workers.clamp(1, groups);
    let local_len = kernel.local_len(&range);

    if workers == 1 {
        for group in 0..groups {
            run_group(kernel, range, group, local_len, sink)?;
        }
        return Ok(());
    }

    let next = AtomicUsize::new(0);
    let failure = OnceCell::<Error>::new();

    crossbeam::thread::scope(|s| {
        for worker in 0..workers {
            let spawned = spawn(s, || loop {
                if failure.get().is_some() { break }

                let group = next.fetch_add(1, Ordering::Relaxed);
                if group >= groups { break }

                if let Err(e) = run_group(kernel, range, group, local_len, sink) {
                    let _ = failure.set(e);
                    break;
                }
            });

            if let Err(e) = spawned {
                let _ = failure.set(Error::new(ErrorType::OutOfResources, format!("cannot start compute unit {worker}: {e}")));
                break;
            }
        }
    }).map_err(|_| Error::new(ErrorType::WorkItemPanic, "compute unit thread panicked"))?;

    match failure.into_inner() {
        Some(e) => Err(e),
        None => Ok(())
    }
}

/// Runs a single group, one thread per work item.
fn run_group<K: ?Sized + Kernel> (kernel: &K, range: NdRange, group: usize, local_len: usize, sink: &dyn DebugSink) -> Result<()> {
    let local = LocalMemory::<K::Local>::new(local_len);
    let barrier = GroupBarrier::new(range.local_size());
    let fault = OnceCell::<Error>::new();

    let run_item = |local_id: usize| {
        let item = NdItem::new(local_id, group, range, &barrier, &local, sink);
        match catch_unwind(AssertUnwindSafe(|| kernel.run(&item))) {
            Ok(()) => barrier.depart(),
            Err(payload) if payload.is::<Poisoned>() => {},
            Err(payload) => {
                let desc = format!("work item {} (group {group}) panicked: {}", item.global_id(), panic_message(&*payload));
                let _ = fault.set(Error::new(ErrorType::WorkItemPanic, desc));
                barrier.poison(ErrorType::WorkItemPanic);
            }
        }
    };

    log::trace!("running group {group} of {}", range.group_count());
    match range.local_size() {
        1 => run_item(0),
        wgs => {
            let run_item = &run_item;
            crossbeam::thread::scope(|s| {
                for local_id in 1..wgs {
                    if let Err(e) = spawn(s, move || run_item(local_id)) {
                        // items already started unwind out of the barrier
                        let _ = fault.set(Error::new(
                            ErrorType::OutOfResources,
                            format!("cannot start work item {local_id} of group {group}: {e}")
                        ));
                        barrier.poison(ErrorType::OutOfResources);
                        return;
                    }
                }
                run_item(0);
            }).map_err(|_| Error::new(ErrorType::WorkItemPanic, format!("work item thread of group {group} panicked")))?;
        }
    }

    if let Some(e) = fault.into_inner() {
        return Err(e);
    }

    if let Some(ty) = barrier.fault() {
        return Err(Error::new(ty, format!("work items of group {group} reached a different number of barriers")));
    }

    Ok(())
}

/// Runs `len` items, split into contiguous chunks over at most `workers` threads.
pub(crate) fn flat<K: ?Sized + SimpleKernel> (kernel: &K, len: usize, workers: usize, sink: &dyn DebugSink) -> Result<()> {
    if len == 0 {
        return Ok(());
    }

    let workers = workers.clamp(1, len);
    let chunk = len.div_ceil(workers);

    let run_chunk = |start: usize| -> Result<()> {
        let end = usize::min(start + chunk, len);
        catch_unwind(AssertUnwindSafe(|| (start..end).for_each(|id| kernel.run(Item::new(id, len, sink)))))
            .map_err(|payload| Error::new(ErrorType::WorkItemPanic, format!("work item in {start}..{end} panicked: {}", panic_message(&*payload))))
    };

    if workers == 1 {
        return run_chunk(0);
    }

    let failure = OnceCell::<Error>::new();
    crossbeam::thread::scope(|s| {
        let run_chunk = &run_chunk;
        let failure = &failure;

        for start in (chunk..len).step_by(chunk) {
            let spawned = spawn(s, move || {
                if let Err(e) = run_chunk(start) {
                    let _ = failure.set(e);
                }
            });

            if let Err(e) = spawned {
                let _ = failure.set(Error::new(ErrorType::OutOfResources, format!("cannot start work items {start}..: {e}")));
                return;
            }
        }

        if let Err(e) = run_chunk(0) {
            let _ = failure.set(e);
        }
    }).map_err(|_| Error::new(ErrorType::WorkItemPanic, "compute unit thread panicked"))?;

    match failure.into_inner() {
        Some(e) => Err(e),
        None => Ok(())
    }
}

/// Starts `f` on a new scoped thread, reporting OS refusals instead of panicking.
#[inline]
fn spawn<'env, F: 'env + Send + FnOnce()> (s: &Scope<'env>, f: F) -> std::io::Result<()> {
    #[cfg(test)]
    if !tests::take_spawn() {
        return Err(std::io::Error::new(std::io::ErrorKind::WouldBlock, "thread limit reached"));
    }

    s.builder()
        .spawn(move |_| f())
        .map(|_| ())
}

#[inline]
fn panic_message (payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        return msg;
    }

    match payload.downcast_ref::<String>() {
        Some(msg) => msg,
        None => "non-string panic payload"
    }
}
