//! Cancellable task handle and the polling engine.
//!
//! A [`Handle`] wraps one logical operation, which may issue the underlying
//! request any number of times when a polling predicate is supplied. The
//! state machine is `idle -> in-flight -> {in-flight (loop) | finalized}`.
//! Response cycles for one handle are strictly sequential; distinct handles
//! are independent.
//!
//! Cancellation invariants, enforced here rather than left to timing:
//! - `cancel()` is non-blocking and callable from any thread.
//! - The completion fires exactly once, on terminal success or failure.
//! - After `cancel()` the polling predicate is never invoked, even for a
//!   response that was already in flight; the terminal result is always
//!   `Failure(None, Cancelled)` regardless of what the transport reports.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::ApiRequest;
use crate::decode::{decode_response, FromJson};
use crate::result::{ApiResult, FailureReason};
use crate::transport::{RawResponse, Transport};

/// Caller-supplied predicate invoked after each response cycle with the
/// decoded result and the raw response; returning `true` re-issues the
/// request.
pub type PollHandler<T> =
    Arc<dyn Fn(&ApiResult<T>, Option<&RawResponse>) -> bool + Send + Sync>;

/// Cancellable, resumable unit of work wrapping one logical operation.
pub struct Handle<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

struct Shared<T> {
    request: ApiRequest,
    transport: Arc<dyn Transport>,
    key_path: Option<String>,
    poll_handler: Option<PollHandler<T>>,
    cancel: CancellationToken,
    resumed: AtomicBool,
    finalized: AtomicBool,
    last_response: Mutex<Option<RawResponse>>,
    completion: watch::Sender<Option<ApiResult<T>>>,
}

impl<T> Shared<T> {
    fn finalize(&self, result: ApiResult<T>) {
        if self.finalized.swap(true, Ordering::SeqCst) {
            return;
        }
        // send_replace stores the value even when no receiver is subscribed
        // yet; a plain send would drop it.
        self.completion.send_replace(Some(result));
    }

    fn cancelled_result(&self) -> ApiResult<T> {
        ApiResult::Failure(None, FailureReason::Cancelled)
    }
}

impl<T> Handle<T>
where
    T: FromJson + Clone + Send + Sync + 'static,
{
    pub(crate) fn new(
        request: ApiRequest,
        transport: Arc<dyn Transport>,
        key_path: Option<String>,
        poll_handler: Option<PollHandler<T>>,
    ) -> Self {
        let (completion, _) = watch::channel(None);
        Self {
            shared: Arc::new(Shared {
                request,
                transport,
                key_path,
                poll_handler,
                cancel: CancellationToken::new(),
                resumed: AtomicBool::new(false),
                finalized: AtomicBool::new(false),
                last_response: Mutex::new(None),
                completion,
            }),
        }
    }

    /// Transition from idle to in-flight. Calling more than once is a no-op;
    /// the underlying transport never double-fires.
    pub fn resume(&self) {
        if self.shared.finalized.load(Ordering::SeqCst) {
            return;
        }
        if self.shared.resumed.swap(true, Ordering::SeqCst) {
            return;
        }
        let shared = Arc::clone(&self.shared);
        tokio::spawn(drive(shared));
    }

    /// Abort the operation.
    ///
    /// Aborts the in-flight transport call, suppresses any pending predicate
    /// invocation, and finalizes with `Failure(None, Cancelled)`. Cancelling
    /// a finalized handle, or cancelling twice, has no further effect.
    pub fn cancel(&self) {
        self.shared.cancel.cancel();
        // A handle that was never resumed has no driver to deliver the
        // cancellation, so finalize it here.
        if !self.shared.resumed.load(Ordering::SeqCst) {
            self.shared.finalize(self.shared.cancelled_result());
        }
    }

    /// The terminal result, readable once the handle has finalized.
    #[must_use]
    pub fn result(&self) -> Option<ApiResult<T>> {
        self.shared.completion.borrow().clone()
    }

    /// The most recent raw response, readable after at least one cycle has
    /// received one.
    #[must_use]
    pub fn raw_response(&self) -> Option<RawResponse> {
        self.shared
            .last_response
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    /// Wait for the terminal result. This is the completion boundary: it
    /// resolves exactly once per handle, and every waiter observes the same
    /// result.
    pub async fn outcome(&self) -> ApiResult<T> {
        let mut receiver = self.shared.completion.subscribe();
        loop {
            if let Some(result) = receiver.borrow_and_update().clone() {
                return result;
            }
            if receiver.changed().await.is_err() {
                // The sender lives as long as the handle; closing without a
                // value means the runtime tore the driver down.
                return ApiResult::Failure(None, FailureReason::Other);
            }
        }
    }
}

async fn drive<T>(shared: Arc<Shared<T>>)
where
    T: FromJson + Clone + Send + Sync + 'static,
{
    let mut cycle: u64 = 0;
    loop {
        if shared.cancel.is_cancelled() {
            shared.finalize(shared.cancelled_result());
            return;
        }

        let executed = tokio::select! {
            biased;
            () = shared.cancel.cancelled() => None,
            outcome = shared.transport.execute(&shared.request) => Some(outcome),
        };
        let Some(outcome) = executed else {
            shared.finalize(shared.cancelled_result());
            return;
        };

        cycle += 1;
        let result: ApiResult<T> = match outcome {
            Ok(response) => {
                let decoded = decode_response(&response, shared.key_path.as_deref());
                if let Ok(mut last) = shared.last_response.lock() {
                    *last = Some(response);
                }
                decoded
            }
            Err(failure) => ApiResult::Failure(None, failure.reason()),
        };
        debug!(cycle, success = result.is_success(), "response cycle");

        // A response that raced with cancel() is ignored: the predicate must
        // not observe it and the terminal result is the cancellation.
        if shared.cancel.is_cancelled() {
            shared.finalize(shared.cancelled_result());
            return;
        }

        let keep_polling = match &shared.poll_handler {
            Some(handler) => {
                // Clone out of the mutex so the predicate runs without the
                // lock, free to inspect the handle itself.
                let raw = shared
                    .last_response
                    .lock()
                    .ok()
                    .and_then(|guard| guard.clone());
                handler(&result, raw.as_ref())
            }
            None => false,
        };

        if keep_polling && !shared.cancel.is_cancelled() {
            continue;
        }

        if shared.cancel.is_cancelled() {
            shared.finalize(shared.cancelled_result());
        } else {
            shared.finalize(result);
        }
        return;
    }
}
