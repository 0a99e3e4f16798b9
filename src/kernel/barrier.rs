use std::{sync::{Mutex, Condvar, MutexGuard, PoisonError}, panic::resume_unwind};
use crate::core::ErrorType;

/// Unwind payload used to abort the remaining work items of a failed group.
pub(crate) struct Poisoned;

struct State {
    parties: usize,
    arrived: usize,
    exited: usize,
    generation: u64,
    fault: Option<ErrorType>
}

impl State {
    #[inline(always)]
    fn live (&self) -> usize {
        self.parties - self.exited
    }

    #[inline(always)]
    fn release (&mut self) {
        self.arrived = 0;
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Synchronization point shared by the work items of a group.\
/// [`wait`](GroupBarrier::wait) blocks until every work item of the group has reached the barrier,
/// after which all group-local writes made before the barrier are visible to the whole group.
///
/// If a work item of the group fails, the barrier is poisoned and every item waiting on it (or reaching it later)
/// unwinds instead of blocking forever.
pub struct GroupBarrier {
    state: Mutex<State>,
    cvar: Condvar
}

impl GroupBarrier {
    #[inline]
    pub fn new (parties: usize) -> Self {
        Self {
            state: Mutex::new(State { parties, arrived: 0, exited: 0, generation: 0, fault: None }),
            cvar: Condvar::new()
        }
    }

    /// Blocks the calling work item until the whole group has arrived.
    pub fn wait (&self) {
        let mut state = self.lock();
        if state.fault.is_some() {
            drop(state);
            resume_unwind(Box::new(Poisoned));
        }

        cfg_if::cfg_if! {
            if #[cfg(feature = "strict")] {
                // some other item already returned, so it will never reach this barrier
                if state.exited > 0 {
                    state.fault = Some(ErrorType::BarrierDivergence);
                    drop(state);
                    self.cvar.notify_all();
                    resume_unwind(Box::new(Poisoned));
                }
            }
        }

        state.arrived += 1;
        if state.arrived >= state.live() {
            state.release();
            drop(state);
            self.cvar.notify_all();
            return;
        }

        let generation = state.generation;
        while state.generation == generation && state.fault.is_none() {
            state = self.cvar.wait(state).unwrap_or_else(PoisonError::into_inner);
        }

        if state.generation == generation {
            drop(state);
            resume_unwind(Box::new(Poisoned));
        }
    }

    /// Signals that a work item returned from the kernel.
    pub(crate) fn depart (&self) {
        let mut state = self.lock();
        state.exited += 1;

        cfg_if::cfg_if! {
            if #[cfg(feature = "strict")] {
                if state.arrived > 0 && state.fault.is_none() {
                    state.fault = Some(ErrorType::BarrierDivergence);
                    drop(state);
                    self.cvar.notify_all();
                }
            } else {
                if state.arrived > 0 && state.arrived >= state.live() {
                    state.release();
                    drop(state);
                    self.cvar.notify_all();
                }
            }
        }
    }

    /// Poisons the barrier, waking up every waiting work item. Only the first fault is kept.
    pub(crate) fn poison (&self, ty: ErrorType) {
        let mut state = self.lock();
        if state.fault.is_none() {
            state.fault = Some(ty);
        }
        drop(state);
        self.cvar.notify_all();
    }

    #[inline(always)]
    pub(crate) fn fault (&self) -> Option<ErrorType> {
        self.lock().fault
    }

    #[inline(always)]
    fn lock (&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
