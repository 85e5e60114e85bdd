//! Artist search box wired to the DNP actions.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::actions::DnpActions;
use crate::api::{ActionResult, ApiClient};
use crate::config::ClientConfig;
use crate::debounce::{SearchSignal, SearchTrigger};
use crate::models::Artist;

/// Debounced artist search.
///
/// Keystrokes go to [`input`](Self::input); [`next`](Self::next) waits for
/// the input to settle and runs the search (or clears the results). A search
/// already in flight is not cancelled by newer input.
pub struct ArtistSearch {
    trigger: SearchTrigger,
    signals: mpsc::Receiver<SearchSignal>,
}

impl ArtistSearch {
    pub fn new(delay: Duration) -> Self {
        let (trigger, signals) = SearchTrigger::new(delay);
        Self { trigger, signals }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.search_debounce)
    }

    pub fn input(&mut self, text: &str) {
        self.trigger.input(text);
    }

    /// Skips the remaining delay, e.g. when the user presses Enter.
    pub async fn submit(&mut self) -> bool {
        self.trigger.flush().await
    }

    pub fn is_pending(&self) -> bool {
        self.trigger.is_pending()
    }

    /// Waits for the next settled input and applies it to `dnp`.
    pub async fn next<C: ApiClient>(
        &mut self,
        dnp: &mut DnpActions<C>,
    ) -> Option<ActionResult<Vec<Artist>>> {
        let result = match self.signals.recv().await? {
            SearchSignal::Search(query) => dnp.search_artists(&query).await,
            SearchSignal::Clear => {
                dnp.clear_search();
                ActionResult::ok(Vec::new())
            }
        };
        Some(result)
    }
}
