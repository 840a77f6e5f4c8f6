//! Suspension handles for suspend-capable interface calls
//!
//! A call to a suspend-capable entry returns a [`Suspend`] without running
//! anything. The caller drives it: [`Suspend::resume`] runs the body up to its
//! next suspension point (or to completion), and `Suspend` is also a `Future`
//! for callers that live inside an executor. A body that never suspends simply
//! completes on the first resume; callers do not special-case it.
//!
//! There is no cancellation protocol. Dropping a pending `Suspend` drops the
//! retained state without telling the implementation; forgetting one leaks it.

use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::future::LocalBoxFuture;
use futures::task::noop_waker_ref;

/// An in-flight call to a suspend-capable method
#[must_use = "a suspended call does nothing until resumed or awaited"]
pub struct Suspend<'a, R> {
    future: Option<LocalBoxFuture<'a, R>>,
}

impl<'a, R> Suspend<'a, R> {
    #[inline]
    pub fn new(future: LocalBoxFuture<'a, R>) -> Self {
        Self { future: Some(future) }
    }

    /// Run until the next suspension point
    ///
    /// State changes made before that point are visible once this returns.
    ///
    /// # Panics
    /// Resuming a call that already returned `Ready` is a programmer error.
    pub fn resume(&mut self) -> Poll<R> {
        let mut cx = Context::from_waker(noop_waker_ref());
        self.poll_step(&mut cx)
    }

    /// Resume until the call completes, counting the suspensions
    pub fn run_to_completion(mut self) -> (R, usize) {
        let mut suspensions = 0;
        loop {
            match self.resume() {
                Poll::Ready(value) => return (value, suspensions),
                Poll::Pending => suspensions += 1,
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.future.is_none()
    }

    fn poll_step(&mut self, cx: &mut Context<'_>) -> Poll<R> {
        let Some(future) = self.future.as_mut() else {
            panic!("suspended call resumed after completion");
        };

        match future.as_mut().poll(cx) {
            Poll::Ready(value) => {
                self.future = None;
                Poll::Ready(value)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<'a, R> Future for Suspend<'a, R> {
    type Output = R;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<R> {
        self.get_mut().poll_step(cx)
    }
}

impl<'a, R> fmt::Debug for Suspend<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suspend")
            .field("complete", &self.is_complete())
            .finish()
    }
}

/// Re-tag a suspend slot's future with the receiver borrow it was built from
///
/// Dispatch thunks cannot name the concrete type's own lifetimes, so the
/// future is created under a body-local borrow and widened here.
///
/// # Safety
/// Everything the future captures must stay valid for `'a`. `Storage`
/// guarantees this for the receiver; arguments pass through [`static_arg`].
#[doc(hidden)]
#[inline(always)]
pub unsafe fn extend_future<'a, 'b, R>(future: LocalBoxFuture<'b, R>) -> LocalBoxFuture<'a, R> {
    core::mem::transmute::<LocalBoxFuture<'b, R>, LocalBoxFuture<'a, R>>(future)
}

/// Arguments of suspend-capable entries outlive the call, so they may not borrow
#[doc(hidden)]
#[inline(always)]
pub fn static_arg<X: 'static>(value: X) -> X {
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::cell::Cell;

    #[test]
    fn immediate_body_completes_on_first_resume() {
        let mut call = Suspend::new(async { 7 }.boxed_local());
        assert!(!call.is_complete());
        assert_eq!(call.resume(), Poll::Ready(7));
        assert!(call.is_complete());
    }

    #[test]
    fn state_before_suspension_is_visible() {
        let steps = Cell::new(0);
        let mut call = Suspend::new(
            async {
                steps.set(1);
                futures::pending!();
                steps.set(2);
                "done"
            }
            .boxed_local(),
        );

        assert_eq!(steps.get(), 0);
        assert_eq!(call.resume(), Poll::Pending);
        assert_eq!(steps.get(), 1);
        assert_eq!(call.resume(), Poll::Ready("done"));
        assert_eq!(steps.get(), 2);
    }

    #[test]
    fn run_to_completion_counts_suspensions() {
        let call = Suspend::new(
            async {
                futures::pending!();
                futures::pending!();
                futures::pending!();
                3u8
            }
            .boxed_local(),
        );
        assert_eq!(call.run_to_completion(), (3, 3));
    }

    #[test]
    #[should_panic(expected = "resumed after completion")]
    fn resume_after_completion_panics() {
        let mut call = Suspend::new(async {}.boxed_local());
        let _ = call.resume();
        let _ = call.resume();
    }

    #[test]
    fn suspend_is_awaitable() {
        let call = Suspend::new(async { 40 + 2 }.boxed_local());
        assert_eq!(futures::executor::block_on(call), 42);
    }
}
