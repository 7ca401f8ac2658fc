//! Timer abstraction for the submission lifecycle.

use std::future::Future;

/// Suspends for a number of milliseconds.
pub trait Timer {
    fn sleep(&self, ms: u32) -> impl Future<Output = ()>;
}

/// `setTimeout`-backed timer in the browser; resolves immediately elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    async fn sleep(&self, ms: u32) {
        #[cfg(feature = "hydrate")]
        {
            gloo_timers::future::TimeoutFuture::new(ms).await;
        }
        #[cfg(not(feature = "hydrate"))]
        {
            log::trace!("skipping {ms}ms sleep outside the browser");
        }
    }
}
