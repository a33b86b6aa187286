use std::collections::HashMap;
use std::time::Duration;

use stayview_contracts::TimerHost;
use stayview_model::{TimerId, TimerKind};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::trace;

/// Shortest repeat period; `interval_at` rejects a zero period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// [`TimerHost`] backed by tokio tasks.
///
/// Fired ids arrive on the receiver returned by [`TokioTimers::new`]; feed
/// them to [`super::Mounted::fire`]. Cancelling aborts the task, and so does
/// dropping the host, so no timer outlives its owner.
#[derive(Debug)]
pub struct TokioTimers {
    handle: Handle,
    tx: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioTimers {
    /// # Panics
    ///
    /// Outside a tokio runtime, like [`tokio::spawn`].
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        Self::with_handle(Handle::current())
    }

    pub fn with_handle(handle: Handle) -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let timers = Self {
            handle,
            tx,
            tasks: HashMap::new(),
        };
        (timers, rx)
    }

    /// Timers still armed.
    pub fn armed(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl TimerHost for TokioTimers {
    fn schedule(&mut self, id: TimerId, kind: TimerKind, after: Duration) {
        self.tasks.retain(|_, task| !task.is_finished());
        if let Some(previous) = self.tasks.remove(&id) {
            previous.abort();
        }

        let tx = self.tx.clone();
        let task = if kind.is_repeating() {
            let period = after.max(MIN_PERIOD);
            self.handle.spawn(async move {
                let start = time::Instant::now() + period;
                let mut ticks = time::interval_at(start, period);
                ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticks.tick().await;
                    if tx.send(id).is_err() {
                        break;
                    }
                }
            })
        } else {
            self.handle.spawn(async move {
                time::sleep(after).await;
                let _ = tx.send(id);
            })
        };
        trace!(%id, ?kind, ?after, "timer armed");
        self.tasks.insert(id, task);
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
            trace!(%id, "timer aborted");
        }
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
