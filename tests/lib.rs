//! Shared helpers for the tickmatch integration suites.

use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

pub use tickmatch_core::{CatalogAdapter, CompanySource, Disambiguator, ProviderChain};

/// Offline reference catalog as a chain member.
pub fn catalog() -> Arc<dyn CompanySource> {
    Arc::new(CatalogAdapter::default())
}

/// Disambiguator over an explicit primary and fallback list.
pub fn chain_of(
    primary: Arc<dyn CompanySource>,
    fallbacks: Vec<Arc<dyn CompanySource>>,
) -> Disambiguator {
    Disambiguator::new(ProviderChain::new(primary, fallbacks))
}

/// Drives a future to completion on the current thread.
pub fn block_on<F>(future: F) -> F::Output
where
    F: Future,
{
    let waker = noop_waker();
    let mut context = Context::from_waker(&waker);
    let mut future = std::pin::pin!(future);

    loop {
        match future.as_mut().poll(&mut context) {
            Poll::Ready(output) => return output,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}

fn noop_waker() -> Waker {
    // SAFETY: The vtable functions never dereference the data pointer and are no-op operations.
    unsafe { Waker::from_raw(noop_raw_waker()) }
}

fn noop_raw_waker() -> RawWaker {
    RawWaker::new(std::ptr::null(), &NOOP_RAW_WAKER_VTABLE)
}

unsafe fn noop_raw_waker_clone(_: *const ()) -> RawWaker {
    noop_raw_waker()
}

unsafe fn noop_raw_waker_wake(_: *const ()) {}

unsafe fn noop_raw_waker_wake_by_ref(_: *const ()) {}

unsafe fn noop_raw_waker_drop(_: *const ()) {}

static NOOP_RAW_WAKER_VTABLE: RawWakerVTable = RawWakerVTable::new(
    noop_raw_waker_clone,
    noop_raw_waker_wake,
    noop_raw_waker_wake_by_ref,
    noop_raw_waker_drop,
);
