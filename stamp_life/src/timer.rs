// timer.rs - Cancellable periodic step timer
//
// A tokio task ticks at the configured period and posts tick messages to a
// one-slot channel. The owner takes them on its own thread, so board state is
// only ever touched by whoever owns the timer. Ticks that arrive while one is
// still pending are dropped: an owner that falls behind runs one step when it
// catches up, not a backlog of them.
//
// Each run of the task is tagged with an epoch; stopping or retargeting bumps
// the epoch, and ticks from an older epoch are ignored. That makes `stop` take
// effect the moment it returns, even if the aborted task managed one last send.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Shortest period the timer will run at.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Callback run on the timer task after every tick, e.g. to wake a UI.
pub type Notify = Arc<dyn Fn() + Send + Sync>;

pub struct StepTimer {
    handle: Handle,
    period: Duration,
    epoch: u64,
    task: Option<JoinHandle<()>>,
    tx: Sender<u64>,
    rx: Receiver<u64>,
    // A tick from a previous epoch was pending when the period changed
    carried: bool,
    notify: Option<Notify>,
}

impl StepTimer {
    /// Creates a stopped timer that will spawn its task on `handle`.
    pub fn new(handle: Handle, period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(1);
        Self {
            handle,
            period: period.max(MIN_PERIOD),
            epoch: 0,
            task: None,
            tx,
            rx,
            carried: false,
            notify: None,
        }
    }

    /// Installs a callback run after each tick. Takes effect on the next start.
    pub fn set_notify(&mut self, notify: impl Fn() + Send + Sync + 'static) {
        self.notify = Some(Arc::new(notify));
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        log::debug!("Step timer started at {:?}", self.period);
        self.spawn();
    }

    /// Stops ticking. A pending tick is discarded.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.epoch += 1;
            self.carried = false;
            self.drain();
            log::debug!("Step timer stopped");
        }
    }

    /// Changes the period, restarting the task if it is running.
    ///
    /// A tick already delivered at the old rate is kept; none are delivered
    /// at the old rate after this returns.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period.max(MIN_PERIOD);
        if let Some(task) = self.task.take() {
            task.abort();
            self.carried |= self.drain();
            self.epoch += 1;
            log::debug!("Step timer retargeted to {:?}", self.period);
            self.spawn();
        }
    }

    /// True when the timer ticked at least once since the last call.
    pub fn take_tick(&mut self) -> bool {
        let ticked = std::mem::take(&mut self.carried) | self.drain();
        debug_assert!(self.is_running() || !ticked, "tick delivered while stopped");
        ticked
    }

    fn drain(&mut self) -> bool {
        let mut ticked = false;
        while let Ok(epoch) = self.rx.try_recv() {
            ticked |= epoch == self.epoch;
        }
        ticked
    }

    fn spawn(&mut self) {
        let tx = self.tx.clone();
        let epoch = self.epoch;
        let period = self.period;
        let notify = self.notify.clone();
        let first = Instant::now() + period;

        self.task = Some(self.handle.spawn(async move {
            let mut interval = time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                match tx.try_send(epoch) {
                    // Full means a tick is still pending; drop this one
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Closed(_)) => break,
                }
                if let Some(notify) = &notify {
                    notify();
                }
            }
        }));
    }
}

impl Drop for StepTimer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for StepTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepTimer")
            .field("period", &self.period)
            .field("running", &self.is_running())
            .field("epoch", &self.epoch)
            .finish()
    }
}
