//! The single gate serializing every record load and save in the process.
//!
//! While Open, `acquire` hands out one [`GateGuard`] at a time and the guard
//! releases on drop. `close_permanently` waits for the current holder, then
//! moves the gate to Closed, after which every acquire fails immediately.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Gate states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Operations are admitted one at a time
    Open,
    /// Shut down - every acquire fails fast
    Closed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Store gate is closed")]
    Closed,

    #[error("Timed out after {waited:?} waiting for the store gate")]
    Timeout { waited: Duration },
}

pub type GateResult<T> = std::result::Result<T, GateError>;

#[derive(Debug, Default)]
struct GateSlot {
    held: bool,
    closed: bool,
}

#[derive(Debug, Default)]
pub struct ConcurrencyGate {
    slot: Mutex<GateSlot>,
    released: Condvar,
}

impl ConcurrencyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until the gate is free.
    pub fn acquire(&self) -> GateResult<GateGuard<'_>> {
        let mut slot = self.lock_slot();
        loop {
            if slot.closed {
                return Err(GateError::Closed);
            }
            if !slot.held {
                slot.held = true;
                return Ok(GateGuard { gate: self });
            }
            slot = self
                .released
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Like [`acquire`](Self::acquire) but gives up after `timeout`. A timeout
    /// too large to represent as a deadline waits without one.
    pub fn acquire_timeout(&self, timeout: Duration) -> GateResult<GateGuard<'_>> {
        let started = Instant::now();
        let Some(deadline) = started.checked_add(timeout) else {
            return self.acquire();
        };
        let mut slot = self.lock_slot();
        loop {
            if slot.closed {
                return Err(GateError::Closed);
            }
            if !slot.held {
                slot.held = true;
                return Ok(GateGuard { gate: self });
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(GateError::Timeout {
                    waited: now - started,
                });
            }

            let (next, _) = self
                .released
                .wait_timeout(slot, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            slot = next;
        }
    }

    /// Dispatches to a timed or untimed acquire.
    pub fn acquire_within(&self, timeout: Option<Duration>) -> GateResult<GateGuard<'_>> {
        match timeout {
            Some(timeout) => self.acquire_timeout(timeout),
            None => self.acquire(),
        }
    }

    /// Waits for the current holder to finish, then closes the gate for good.
    /// Waiters are woken and fail with [`GateError::Closed`].
    pub fn close_permanently(&self) {
        let mut slot = self.lock_slot();
        while slot.held {
            slot = self
                .released
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
        if !slot.closed {
            slot.closed = true;
            log::info!("Store gate closed");
        }
        self.released.notify_all();
    }

    pub fn state(&self) -> GateState {
        if self.lock_slot().closed {
            GateState::Closed
        } else {
            GateState::Open
        }
    }

    pub fn is_held(&self) -> bool {
        self.lock_slot().held
    }

    fn release(&self) {
        let mut slot = self.lock_slot();
        slot.held = false;
        drop(slot);
        // close_permanently may be waiting alongside acquirers
        self.released.notify_all();
    }

    fn lock_slot(&self) -> MutexGuard<'_, GateSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Proof of holding the gate. Dropping it releases the gate.
#[derive(Debug)]
#[must_use = "the gate is released as soon as the guard is dropped"]
pub struct GateGuard<'a> {
    gate: &'a ConcurrencyGate,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.release();
    }
}
