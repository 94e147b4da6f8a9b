//! A debounced task: run an action once input has been quiet for a delay.
//!
//! `schedule` replaces whatever is pending, so a burst of values produces a
//! single run with the last one. A superseded value is dropped, never run.
//! Timed runs happen on tokio's blocking pool, so the action may do
//! blocking I/O.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::error;

type Action<T> = Arc<dyn Fn(T) + Send + Sync>;

struct Pending<T> {
    generation: u64,
    value: Option<T>,
    timer: Option<JoinHandle<()>>,
}

pub struct DebouncedTask<T> {
    delay: Duration,
    action: Action<T>,
    pending: Arc<Mutex<Pending<T>>>,
}

impl<T: Send + 'static> DebouncedTask<T> {
    pub fn new(delay: Duration, action: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            action: Arc::new(action),
            pending: Arc::new(Mutex::new(Pending {
                generation: 0,
                value: None,
                timer: None,
            })),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending value and restarts the quiet window.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, value: T) {
        let mut pending = lock(&self.pending);
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
        pending.generation = pending.generation.wrapping_add(1);
        pending.value = Some(value);

        let generation = pending.generation;
        let shared = Arc::clone(&self.pending);
        let action = Arc::clone(&self.action);
        let delay = self.delay;
        pending.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let value = {
                let mut pending = lock(&shared);
                // A newer schedule or a cancel got here first.
                if pending.generation != generation {
                    return;
                }
                pending.timer = None;
                pending.value.take()
            };
            if let Some(value) = value {
                // Aborting the timer from here on does not stop the run.
                if let Err(e) = tokio::task::spawn_blocking(move || action(value)).await {
                    error!("Debounced action failed: {e}");
                }
            }
        }));
    }

    /// Drops the pending value, if any. Returns whether something was pending.
    pub fn cancel(&self) -> bool {
        let mut pending = lock(&self.pending);
        pending.generation = pending.generation.wrapping_add(1);
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
        pending.value.take().is_some()
    }

    /// Runs the pending value now, on the calling thread, instead of waiting
    /// out the delay. Returns whether anything ran.
    pub fn flush(&self) -> bool {
        let value = {
            let mut pending = lock(&self.pending);
            pending.generation = pending.generation.wrapping_add(1);
            if let Some(timer) = pending.timer.take() {
                timer.abort();
            }
            pending.value.take()
        };
        match value {
            Some(value) => {
                (self.action)(value);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.pending).value.is_some()
    }
}

impl<T> Drop for DebouncedTask<T> {
    fn drop(&mut self) {
        let mut pending = lock(&self.pending);
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
