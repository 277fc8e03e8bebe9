//! Parking a caller until a completion handler running in event context
//! wakes it up again.
//!
//! The firmware reports scan and lookup results through callbacks fired from
//! its event loop. [`SuspensionBridge::arm`] hands out the two ends of a
//! single-slot rendezvous: the caller keeps the [`Parked`] end and awaits it,
//! the completion handler receives the [`Resumer`] end and sends exactly once.

use alloc::sync::Arc;
use core::cell::Cell;

use critical_section::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::{Error, Result};

type Slot<T> = Signal<CriticalSectionRawMutex, T>;

/// Allows at most one outstanding suspension at a time.
///
/// Arming the bridge while a previous [`Parked`] is still alive fails with
/// [`Error::Busy`]; overlapping scan and lookup calls through the same bridge
/// are rejected instead of corrupting each other's slot.
pub struct SuspensionBridge {
    armed: Mutex<Cell<bool>>,
    suspensions: Mutex<Cell<u32>>,
}

impl SuspensionBridge {
    pub const fn new() -> Self {
        Self {
            armed: Mutex::new(Cell::new(false)),
            suspensions: Mutex::new(Cell::new(0)),
        }
    }

    /// Opens the slot and returns both ends of it.
    ///
    /// The slot must be armed before the request is submitted to the driver,
    /// because some drivers complete synchronously from inside the submit call.
    pub fn arm<T: Send>(&self) -> Result<(Parked<'_, T>, Resumer<T>)> {
        let busy = critical_section::with(|cs| self.armed.borrow(cs).replace(true));
        if busy {
            log::warn!("Suspension requested while another one is outstanding");
            return Err(Error::Busy);
        }

        let slot = Arc::new(Slot::new());
        log::trace!("Bridge armed");

        Ok((
            Parked {
                bridge: self,
                slot: slot.clone(),
            },
            Resumer { slot },
        ))
    }

    pub fn is_armed(&self) -> bool {
        critical_section::with(|cs| self.armed.borrow(cs).get())
    }

    /// Number of times a caller actually parked on this bridge.
    pub fn suspensions(&self) -> u32 {
        critical_section::with(|cs| self.suspensions.borrow(cs).get())
    }

    fn disarm(&self) {
        critical_section::with(|cs| self.armed.borrow(cs).set(false));
    }

    fn count_suspension(&self) {
        critical_section::with(|cs| {
            let counter = self.suspensions.borrow(cs);
            counter.set(counter.get().wrapping_add(1));
        });
    }
}

impl Default for SuspensionBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// The caller's end of an armed bridge. Dropping it releases the slot.
pub struct Parked<'a, T: Send> {
    bridge: &'a SuspensionBridge,
    slot: Arc<Slot<T>>,
}

impl<T: Send> Parked<'_, T> {
    /// Parks until the matching [`Resumer::resume`] has run.
    ///
    /// There is no timeout: if the completion never fires the caller stays
    /// parked. Wrap the future in `embassy_time::with_timeout` when a bound
    /// is required.
    pub async fn suspend(self) -> T {
        self.bridge.count_suspension();
        log::trace!("Caller parked");

        let value = self.slot.wait().await;

        log::trace!("Caller resumed");
        value
    }
}

impl<T: Send> Drop for Parked<'_, T> {
    fn drop(&mut self) {
        self.bridge.disarm();
    }
}

/// The completion handler's end of an armed bridge.
///
/// `resume` consumes the handle, so a completion can only be delivered once.
/// Resuming after the parked side was dropped is harmless: the value lands in
/// a slot nobody reads and the bridge itself is not touched.
pub struct Resumer<T: Send> {
    slot: Arc<Slot<T>>,
}

impl<T: Send> Resumer<T> {
    pub fn resume(self, value: T) {
        log::trace!("Resuming parked caller");
        self.slot.signal(value);
    }
}
