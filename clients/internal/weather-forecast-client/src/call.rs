// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Cancelable request futures
//!
//! A [`ForecastCall`] moves through `Pending` into exactly one of
//! `Fulfilled`, `Rejected` or `Canceled`, and never leaves that terminal
//! state. The transition is a compare-and-swap on a shared cell, so a
//! cancel racing with a response has a single winner: if the cancel lands
//! first the response is discarded and the call resolves to
//! [`ForecastError::Canceled`].

use crate::error::ForecastError;
use futures_util::FutureExt;
use futures_util::future::{AbortHandle, Abortable, BoxFuture};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::task::{Context, Poll};

/// Where a call is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    /// Not yet settled
    Pending,
    /// Resolved with a value
    Fulfilled,
    /// Failed with a transport, server or payload error
    Rejected,
    /// Aborted by the caller
    Canceled,
}

impl CallState {
    const PENDING: u8 = 0;
    const FULFILLED: u8 = 1;
    const REJECTED: u8 = 2;
    const CANCELED: u8 = 3;

    fn as_u8(self) -> u8 {
        match self {
            CallState::Pending => Self::PENDING,
            CallState::Fulfilled => Self::FULFILLED,
            CallState::Rejected => Self::REJECTED,
            CallState::Canceled => Self::CANCELED,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            Self::FULFILLED => CallState::Fulfilled,
            Self::REJECTED => CallState::Rejected,
            Self::CANCELED => CallState::Canceled,
            _ => CallState::Pending,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != CallState::Pending
    }
}

/// State cell shared by a call and its cancel handles
#[derive(Debug)]
struct SharedState(AtomicU8);

impl SharedState {
    fn new() -> Self {
        SharedState(AtomicU8::new(CallState::PENDING))
    }

    fn get(&self) -> CallState {
        CallState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Move from `Pending` to `terminal`. Returns false if the call had
    /// already settled.
    fn settle(&self, terminal: CallState) -> bool {
        self.0
            .compare_exchange(
                CallState::PENDING,
                terminal.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

/// Cancels a [`ForecastCall`] from anywhere
///
/// Handles are cheap to clone; all clones refer to the same call.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    abort: AbortHandle,
    state: Arc<SharedState>,
}

impl CancelHandle {
    /// Cancel the call if it is still pending
    ///
    /// Aborts the in-flight request, dropping its connection. Returns true
    /// if this invocation canceled the call, false if it had already
    /// settled (including an earlier cancel).
    pub fn cancel(&self) -> bool {
        if !self.state.settle(CallState::Canceled) {
            return false;
        }
        self.abort.abort();
        tracing::debug!("forecast request canceled");
        true
    }

    pub fn state(&self) -> CallState {
        self.state.get()
    }

    pub fn is_canceled(&self) -> bool {
        self.state() == CallState::Canceled
    }
}

/// An in-flight request that can be awaited or canceled
///
/// Resolves to `Ok(value)`, `Err(error)` for transport and server failures,
/// or `Err(ForecastError::Canceled)` once canceled. Like any future, it
/// does nothing until polled. Dropping a pending call cancels it.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct ForecastCall<T> {
    inner: Abortable<BoxFuture<'static, Result<T, ForecastError>>>,
    handle: CancelHandle,
}

impl<T> ForecastCall<T> {
    /// Wrap a request future so it can be canceled
    pub fn new<F>(request: F) -> Self
    where
        F: Future<Output = Result<T, ForecastError>> + Send + 'static,
    {
        let (abort, registration) = AbortHandle::new_pair();
        Self {
            inner: Abortable::new(request.boxed(), registration),
            handle: CancelHandle {
                abort,
                state: Arc::new(SharedState::new()),
            },
        }
    }

    /// Get a handle that can cancel this call while it is being awaited
    pub fn cancel_handle(&self) -> CancelHandle {
        self.handle.clone()
    }

    /// Cancel the call; see [`CancelHandle::cancel`]
    pub fn cancel(&self) -> bool {
        self.handle.cancel()
    }

    pub fn state(&self) -> CallState {
        self.handle.state()
    }
}

impl<T> Future for ForecastCall<T> {
    type Output = Result<T, ForecastError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let outcome = match Pin::new(&mut this.inner).poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(outcome) => outcome,
        };

        let state = &this.handle.state;
        Poll::Ready(match outcome {
            Ok(Ok(value)) if state.settle(CallState::Fulfilled) => Ok(value),
            Ok(Err(error)) if state.settle(CallState::Rejected) => Err(error),
            // Aborted, or a cancel won the race against the response
            _ => Err(ForecastError::Canceled),
        })
    }
}

impl<T> Drop for ForecastCall<T> {
    fn drop(&mut self) {
        self.handle.cancel();
    }
}

impl<T> std::fmt::Debug for ForecastCall<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastCall")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
