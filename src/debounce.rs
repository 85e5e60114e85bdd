//! Trailing-edge debouncing for input widgets.
//!
//! Every update cancels the pending emission and schedules a new one, so a
//! value is only emitted once the input has been stable for the whole delay.
//! Only the most recent value survives.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Capacity of the channel returned by [`Debouncer::new`].
const CHANNEL_CAPACITY: usize = 8;

type Slot<T> = Arc<Mutex<Option<T>>>;

fn take<T>(slot: &Slot<T>) -> Option<T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}

struct Pending<T> {
    token: CancellationToken,
    value: Slot<T>,
}

/// Delays values and forwards only the last one of each burst.
///
/// Must be used from within a tokio runtime: each update spawns a timer task.
pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::Sender<T>,
    pending: Option<Pending<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer and the receiver its emissions are delivered to.
    pub fn new(delay: Duration) -> (Self, mpsc::Receiver<T>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (Self::with_sender(delay, tx), rx)
    }

    pub fn with_sender(delay: Duration, tx: mpsc::Sender<T>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `value`, replacing any emission not yet fired.
    pub fn push(&mut self, value: T) {
        self.cancel();

        let token = CancellationToken::new();
        let slot: Slot<T> = Arc::new(Mutex::new(Some(value)));

        let task_token = token.clone();
        let task_slot = Arc::clone(&slot);
        let tx = self.tx.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if let Some(value) = take(&task_slot) {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(?delay, "debounced value settled");
                        if tx.send(value).await.is_err() {
                            #[cfg(feature = "tracing")]
                            tracing::debug!("debounce receiver dropped");
                        }
                    }
                }
            }
        });

        self.pending = Some(Pending { token, value: slot });
    }

    /// Drops the pending emission, if any.
    ///
    /// Returns `true` when a value was discarded.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.token.cancel();
                take(&pending.value).is_some()
            }
            None => false,
        }
    }

    /// Emits the pending value now instead of waiting for the delay.
    ///
    /// Returns `true` when a value was sent.
    pub async fn flush(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        pending.token.cancel();
        match take(&pending.value) {
            Some(value) => self.tx.send(value).await.is_ok(),
            None => false,
        }
    }

    /// Whether an emission is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|pending| {
            pending
                .value
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_some()
        })
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.token.cancel();
        }
    }
}

/// What a settled search input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchSignal {
    /// Run a search for this input.
    Search(String),
    /// Input is blank; clear the results.
    Clear,
}

impl SearchSignal {
    pub fn from_input(input: &str) -> Self {
        if input.trim().is_empty() {
            SearchSignal::Clear
        } else {
            SearchSignal::Search(input.to_string())
        }
    }
}

/// Debounced search box: turns keystrokes into [`SearchSignal`]s.
pub struct SearchTrigger {
    debouncer: Debouncer<SearchSignal>,
}

impl SearchTrigger {
    pub fn new(delay: Duration) -> (Self, mpsc::Receiver<SearchSignal>) {
        let (debouncer, rx) = Debouncer::new(delay);
        (Self { debouncer }, rx)
    }

    /// Records the current content of the search box.
    pub fn input(&mut self, text: &str) {
        self.debouncer.push(SearchSignal::from_input(text));
    }

    /// Fires the pending search immediately (e.g. on Enter).
    pub async fn flush(&mut self) -> bool {
        self.debouncer.flush().await
    }

    pub fn cancel(&mut self) -> bool {
        self.debouncer.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
