//! Link-time symbols that `embassy-sync` and `async-io-mini` expect a
//! platform to provide.  On the host these come from `critical-section`'s
//! std impl and `embassy-time`'s std driver; on ESP-IDF they are defined
//! here on top of std threads and `esp_timer`.

use core::cell::{Cell, RefCell};
use core::task::Waker;
use core::time::Duration;
use std::sync::{Mutex, MutexGuard, PoisonError};

static SECTION_LOCK: Mutex<()> = Mutex::new(());

thread_local! {
    static NESTING: Cell<u8> = const { Cell::new(0) };
    static HELD: RefCell<Option<MutexGuard<'static, ()>>> = const { RefCell::new(None) };
}

/// Enter a critical section.  Re-entrant per thread; only the outermost
/// entry takes the lock.
#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_acquire() -> u8 {
    let depth = NESTING.get();
    if depth == 0 {
        let guard = SECTION_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        HELD.with(|held| *held.borrow_mut() = Some(guard));
    }
    let depth = depth.saturating_add(1);
    NESTING.set(depth);
    depth
}

/// Leave a critical section; the lock is dropped with the outermost exit.
#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_release(_token: u8) {
    let depth = NESTING.get();
    if depth == 0 {
        return;
    }
    NESTING.set(depth - 1);
    if depth == 1 {
        HELD.with(|held| held.borrow_mut().take());
    }
}

/// Microseconds since boot, the tick unit `embassy-time` is built with.
#[unsafe(no_mangle)]
pub extern "C" fn _embassy_time_now() -> u64 {
    // SAFETY: esp_timer is started by the IDF before `main`.
    let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
    u64::try_from(us).unwrap_or(0)
}

/// Wake `waker` once tick `at` is reached.
#[unsafe(no_mangle)]
pub extern "C" fn _embassy_time_schedule_wake(at: u64, waker: *mut core::ffi::c_void) {
    if waker.is_null() {
        return;
    }
    // SAFETY: embassy-time hands over a pointer to a live `Waker` for the
    // duration of this call; it is cloned before returning.
    let waker = unsafe { &*(waker as *const Waker) }.clone();
    let delay = at.saturating_sub(_embassy_time_now());
    if delay == 0 {
        waker.wake();
        return;
    }
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_micros(delay));
        waker.wake();
    });
}
