//! Delayed request submission
//!
//! While a view is panned or zoomed quickly, most chunks it asks for are
//! out of view again before they could be loaded. [`DelayQueue`] holds
//! each request back for a fixed delay and only then hands it to the
//! loader, so requests that are cancelled in the meantime never cost a
//! load.
//!
//! A single background thread submits requests once they are due, oldest
//! first. Every request gets the same delay, so the queue is always in
//! due-time order.

use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use lodtree_octree::OctreeConfig;
use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, trace};

/// Default delay before a request is submitted.
pub const DEFAULT_DELAY_MS: u64 = lodtree_octree::DEFAULT_DELAY_QUEUE_MS;

/// Callback that receives each request once it is due.
pub type SubmitFn<R> = Arc<dyn Fn(R) + Send + Sync>;

struct QueueEntry<R> {
    request: R,
    due: Instant,
}

struct QueueState<R> {
    entries: VecDeque<QueueEntry<R>>,
    shutdown: bool,
}

struct Shared<R> {
    state: Mutex<QueueState<R>>,
    wake: Condvar,
}

/// Submits requests to a callback after a fixed delay.
///
/// # Examples
///
/// ```
/// use std::sync::mpsc;
/// use std::time::Duration;
/// use lodtree_loader::DelayQueue;
///
/// let (tx, rx) = mpsc::channel();
/// let queue = DelayQueue::new(Duration::from_millis(10), move |n: u32| {
///     tx.send(n).ok();
/// });
/// queue.add(7);
/// assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(7));
/// ```
pub struct DelayQueue<R: Send + 'static> {
    delay: Duration,
    shared: Arc<Shared<R>>,
    submit: SubmitFn<R>,
    worker: Option<JoinHandle<()>>,
}

impl<R: Send + 'static> DelayQueue<R> {
    /// Create a queue that calls `submit` for each request `delay` after it
    /// was added.
    ///
    /// With a zero delay no thread is started and [`add`](Self::add)
    /// submits on the caller's thread.
    pub fn new<F>(delay: Duration, submit: F) -> Self
    where
        F: Fn(R) + Send + Sync + 'static,
    {
        let submit: SubmitFn<R> = Arc::new(submit);
        let shared = Arc::new(Shared {
            state: Mutex::new(QueueState {
                entries: VecDeque::new(),
                shutdown: false,
            }),
            wake: Condvar::new(),
        });

        let worker = if delay.is_zero() {
            None
        } else {
            let shared = Arc::clone(&shared);
            let submit = Arc::clone(&submit);
            Some(thread::spawn(move || run(&shared, &submit)))
        };

        Self {
            delay,
            shared,
            submit,
            worker,
        }
    }

    /// Create a queue with the default delay.
    pub fn with_default_delay<F>(submit: F) -> Self
    where
        F: Fn(R) + Send + Sync + 'static,
    {
        Self::new(Duration::from_millis(DEFAULT_DELAY_MS), submit)
    }

    /// Create a queue with the delay set by `config.delay_queue_ms`.
    pub fn from_config<F>(config: &OctreeConfig, submit: F) -> Self
    where
        F: Fn(R) + Send + Sync + 'static,
    {
        Self::new(config.delay_queue_delay(), submit)
    }

    /// Queue a request for submission once the delay has passed.
    pub fn add(&self, request: R) {
        if self.worker.is_none() {
            (self.submit)(request);
            return;
        }

        let due = Instant::now() + self.delay;
        let mut state = self.shared.state.lock();
        let was_empty = state.entries.is_empty();
        state.entries.push_back(QueueEntry { request, due });
        trace!(entries = state.entries.len(), "Request queued");
        drop(state);

        // A non-empty queue already has the worker waiting on an earlier
        // due time
        if was_empty {
            self.shared.wake.notify_one();
        }
    }

    /// Remove every pending request for which `should_cancel` returns true
    /// and return them, oldest first.
    pub fn cancel_requests<P>(&self, mut should_cancel: P) -> Vec<R>
    where
        P: FnMut(&R) -> bool,
    {
        let mut state = self.shared.state.lock();
        let mut cancelled = Vec::new();
        let mut kept = VecDeque::with_capacity(state.entries.len());
        for entry in state.entries.drain(..) {
            if should_cancel(&entry.request) {
                cancelled.push(entry.request);
            } else {
                kept.push_back(entry);
            }
        }
        state.entries = kept;

        if !cancelled.is_empty() {
            debug!(
                cancelled = cancelled.len(),
                remaining = state.entries.len(),
                "Cancelled queued requests"
            );
        }
        cancelled
    }

    /// Submit every pending request now, oldest first.
    pub fn flush(&self) {
        let entries: Vec<QueueEntry<R>> = self.shared.state.lock().entries.drain(..).collect();
        if !entries.is_empty() {
            debug!(count = entries.len(), "Flushing queued requests");
        }
        for entry in entries {
            (self.submit)(entry.request);
        }
    }

    /// Number of requests waiting.
    pub fn len(&self) -> usize {
        self.shared.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The delay applied to each request.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<R: Send + 'static> Drop for DelayQueue<R> {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock();
            state.shutdown = true;
            let discarded = state.entries.len();
            if discarded > 0 {
                debug!(discarded, "Delay queue dropped with pending requests");
            }
            state.entries.clear();
        }
        self.shared.wake.notify_one();
        if let Some(handle) = self.worker.take() {
            handle.join().ok();
        }
    }
}

/// Worker loop: submit due entries, then sleep until the next is due or a
/// new entry arrives.
fn run<R>(shared: &Shared<R>, submit: &SubmitFn<R>) {
    let mut state = shared.state.lock();
    loop {
        if state.shutdown {
            return;
        }

        submit_due(&mut state, submit);
        if state.shutdown {
            return;
        }

        match state.entries.front().map(|entry| entry.due) {
            Some(due) => {
                shared.wake.wait_until(&mut state, due);
            }
            None => shared.wake.wait(&mut state),
        }
    }
}

fn submit_due<R>(state: &mut MutexGuard<'_, QueueState<R>>, submit: &SubmitFn<R>) {
    let now = Instant::now();
    while state.entries.front().is_some_and(|entry| entry.due <= now) {
        let Some(entry) = state.entries.pop_front() else {
            break;
        };
        // The callback may block or re-enter the queue
        MutexGuard::unlocked(state, || submit(entry.request));
        if state.shutdown {
            return;
        }
    }
}
